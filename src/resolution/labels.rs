use crate::types::Gender;

/// Label given to the reference person.
pub const SELF_LABEL: &str = "self";

/// Label given to anyone no rule or generation heuristic can place.
pub const FALLBACK_LABEL: &str = "relative";

const IN_LAW_SUFFIX: &str = "-in-law";

/// Blood labels and their married-in equivalents. Children are not in-laws
/// of the re-based spouse, so they map to themselves. Labels missing from
/// the table take the generic suffix.
const IN_LAW_TABLE: &[(&str, &str)] = &[
    ("father", "father-in-law"),
    ("mother", "mother-in-law"),
    ("brother", "brother-in-law"),
    ("sister", "sister-in-law"),
    ("uncle", "uncle-in-law"),
    ("aunt", "aunt-in-law"),
    ("son", "son"),
    ("daughter", "daughter"),
];

/// Picks the male or female label; unknown gender takes the male form.
pub fn gendered(gender: &Gender, male: &str, female: &str) -> String {
    gender.pick(male, female).to_string()
}

/// Deepest grandparent/grandchild label produced; wider gaps are not given a
/// generational label.
pub const MAX_GREAT_PREFIXES: u64 = 16;

/// Grandparent/grandchild label for a generation difference
/// (`person - reference`), or `None` when the gap is less than two or more
/// than `MAX_GREAT_PREFIXES` beyond that.
///
/// Each generation beyond the second adds one `great-` prefix.
pub fn generational(gen_diff: i64, gender: &Gender) -> Option<String> {
    let base = if gen_diff > 1 {
        gender.pick("grandfather", "grandmother")
    } else if gen_diff < -1 {
        gender.pick("grandson", "granddaughter")
    } else {
        return None;
    };
    let greats = gen_diff.unsigned_abs() - 2;
    if greats > MAX_GREAT_PREFIXES {
        return None;
    }
    Some(format!("{}{}", "great-".repeat(greats as usize), base))
}

/// Converts a blood label into its in-law form.
pub fn to_in_law(label: &str) -> String {
    if is_in_law(label) {
        return label.to_string();
    }
    IN_LAW_TABLE
        .iter()
        .find(|(blood, _)| *blood == label)
        .map(|(_, in_law)| (*in_law).to_string())
        .unwrap_or_else(|| format!("{}{}", label, IN_LAW_SUFFIX))
}

/// True for labels that already describe a relative by marriage.
pub fn is_in_law(label: &str) -> bool {
    label.ends_with(IN_LAW_SUFFIX)
}
