use crate::types::RelationResult;

/// Formats results as a Markdown table, one row per member in input order.
///
/// The `name` column is filled from a string `name` field carried on the
/// record, when there is one.
pub fn format_relations_as_markdown(results: &[RelationResult]) -> String {
    let mut out = String::new();

    out.push_str("## Family Relations\n\n");
    if results.is_empty() {
        out.push_str("_No members._\n");
        return out;
    }

    out.push_str("| id | name | gender | generation | relation |\n");
    out.push_str("|----|------|--------|------------|----------|\n");
    for result in results {
        let person = &result.person;
        let name = person
            .extra
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        let generation = person
            .generation
            .map(|g| g.to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            person.id,
            escape_cell(name),
            person.gender.as_str(),
            generation,
            result.relation,
        ));
    }

    out
}

/// Formats results as pretty-printed JSON: the input records with a
/// `relation` field added.
pub fn format_relations_as_json(results: &[RelationResult]) -> String {
    serde_json::to_string_pretty(results).unwrap_or_default()
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    #[test]
    fn test_markdown_empty() {
        let md = format_relations_as_markdown(&[]);
        assert!(md.contains("## Family Relations"));
        assert!(md.contains("_No members._"));
    }

    #[test]
    fn test_markdown_escapes_pipes_in_names() {
        let mut person = PersonRecord::new(1, Gender::Female);
        person
            .extra
            .insert("name".to_string(), serde_json::json!("Ann|Marie"));
        let md = format_relations_as_markdown(&[RelationResult::new(&person, "self".to_string())]);
        assert!(md.contains("| 1 | Ann\\|Marie | female |  | self |"));
    }
}
