use kinship::config::ReferencePolicy;
use kinship::errors::KinshipError;
use kinship::types::*;
use kinship::{resolve, RelationResolver};
use serde_json::json;

/// Parses a `json!` array of member documents.
fn members(value: serde_json::Value) -> Vec<PersonRecord> {
    serde_json::from_value(value).expect("fixture should deserialize")
}

/// Returns the relation computed for the member with the given id.
fn relation_of(results: &[RelationResult], id: impl Into<PersonId>) -> &str {
    let id = id.into();
    results
        .iter()
        .find(|r| r.id() == &id)
        .map(|r| r.relation.as_str())
        .unwrap_or_else(|| panic!("no result for id {}", id))
}

/// Self with two parents, a sibling, a spouse with family, and descendants.
fn extended_family() -> Vec<PersonRecord> {
    members(json!([
        { "id": 1, "gender": "male", "isSelf": true, "parentId": 2, "spouse": 5 },
        { "id": 2, "gender": "male", "spouse": 3, "parentId": 40 },
        { "id": 3, "gender": "female" },
        { "id": 5, "gender": "female", "parentId": 6, "spouse": 1 },
        { "id": 6, "gender": "male" },
        { "id": 7, "gender": "male", "parentId": 6, "spouse": 8 },
        { "id": 8, "gender": "female", "spouse": 7 },
        { "id": 9, "gender": "female", "parentId": 2, "spouse": 10 },
        { "id": 10, "gender": "male", "spouse": 9 },
        { "id": 11, "gender": "female", "parentId": 9 },
        { "id": 12, "gender": "female", "parentId": 1, "spouse": 13 },
        { "id": 13, "gender": "male", "spouse": 12 },
        { "id": 41, "gender": "male", "parentId": 40, "spouse": 42 },
        { "id": 42, "gender": "female", "spouse": 41 },
        { "id": 43, "gender": "male", "parentId": 42 }
    ]))
}

#[test]
fn test_wife_and_son() {
    let input = members(json!([
        { "id": 1, "isSelf": true, "gender": "male" },
        { "id": 2, "spouse": 1, "gender": "female" },
        { "id": 3, "parentId": 1, "gender": "male" }
    ]));
    let results = resolve(&input).unwrap();
    assert_eq!(relation_of(&results, 1), "self");
    assert_eq!(relation_of(&results, 2), "wife");
    assert_eq!(relation_of(&results, 3), "son");
}

#[test]
fn test_daughter_or_sister_depending_on_reference() {
    let mut input = members(json!([
        { "id": 1, "isSelf": true, "gender": "male" },
        { "id": 2, "spouse": 1, "gender": "female" },
        { "id": 3, "parentId": 1, "gender": "male" },
        { "id": 4, "parentId": 1, "gender": "female" }
    ]));
    let results = resolve(&input).unwrap();
    assert_eq!(relation_of(&results, 4), "daughter");

    input[0].is_self = false;
    input[2].is_self = true;
    let results = resolve(&input).unwrap();
    assert_eq!(relation_of(&results, 4), "sister");
    assert_eq!(relation_of(&results, 1), "father");
    assert_eq!(relation_of(&results, 2), "mother");
}

#[test]
fn test_mother_found_through_fathers_spouse() {
    let input = members(json!([
        { "id": 1, "isSelf": true, "gender": "female", "parentId": 10 },
        { "id": 10, "gender": "male", "spouse": 11 },
        { "id": 11, "gender": "female" }
    ]));
    let results = resolve(&input).unwrap();
    assert_eq!(relation_of(&results, 10), "father");
    assert_eq!(relation_of(&results, 11), "mother");
}

#[test]
fn test_sibling_recorded_under_mother() {
    let input = members(json!([
        { "id": 1, "isSelf": true, "gender": "female", "parentId": 10 },
        { "id": 10, "gender": "male", "spouse": 11 },
        { "id": 11, "gender": "female" },
        { "id": 12, "gender": "male", "parentId": 11 }
    ]));
    let results = resolve(&input).unwrap();
    assert_eq!(relation_of(&results, 12), "brother");
}

#[test]
fn test_extended_family_labels() {
    let results = resolve(&extended_family()).unwrap();
    assert_eq!(relation_of(&results, 1), "self");
    assert_eq!(relation_of(&results, 2), "father");
    assert_eq!(relation_of(&results, 3), "mother");
    assert_eq!(relation_of(&results, 5), "wife");
    assert_eq!(relation_of(&results, 6), "father-in-law");
    assert_eq!(relation_of(&results, 7), "brother-in-law");
    assert_eq!(relation_of(&results, 8), "sister-in-law");
    assert_eq!(relation_of(&results, 9), "sister");
    assert_eq!(relation_of(&results, 10), "brother-in-law");
    assert_eq!(relation_of(&results, 11), "niece");
    assert_eq!(relation_of(&results, 12), "daughter");
    assert_eq!(relation_of(&results, 13), "son-in-law");
    assert_eq!(relation_of(&results, 43), "cousin");
}

#[test]
fn test_fathers_sibling_is_uncle_not_parent() {
    let results = resolve(&extended_family()).unwrap();
    assert_eq!(relation_of(&results, 41), "uncle");
    assert_eq!(relation_of(&results, 42), "aunt");
}

#[test]
fn test_mothers_sibling_is_aunt() {
    let input = members(json!([
        { "id": 1, "isSelf": true, "gender": "male", "parentId": 2 },
        { "id": 2, "gender": "male", "spouse": 3 },
        { "id": 3, "gender": "female", "parentId": 30 },
        { "id": 31, "gender": "female", "parentId": 30 },
        { "id": 32, "gender": "male", "parentId": 31 }
    ]));
    let results = resolve(&input).unwrap();
    assert_eq!(relation_of(&results, 31), "aunt");
    assert_eq!(relation_of(&results, 32), "cousin");
    // 30 is not in the collection.
    assert_eq!(relation_of(&results, 3), "mother");
}

#[test]
fn test_spouse_uncle_is_uncle_in_law() {
    let input = members(json!([
        { "id": 1, "isSelf": true, "gender": "male", "parentId": 2, "spouse": 5 },
        { "id": 2, "gender": "male" },
        { "id": 5, "gender": "female", "parentId": 6 },
        { "id": 6, "gender": "male", "parentId": 60 },
        { "id": 61, "gender": "female", "parentId": 60 }
    ]));
    let results = resolve(&input).unwrap();
    assert_eq!(relation_of(&results, 61), "aunt-in-law");
}

#[test]
fn test_grandparents_by_generation() {
    let input = members(json!([
        { "id": 1, "isSelf": true, "gender": "male", "parentId": 2, "generation": 0 },
        { "id": 2, "gender": "male", "generation": 1 },
        { "id": 3, "gender": "female", "generation": 2 },
        { "id": 4, "gender": "male", "generation": 3 },
        { "id": 5, "gender": "female", "generation": 5 }
    ]));
    let results = resolve(&input).unwrap();
    assert_eq!(relation_of(&results, 3), "grandmother");
    assert_eq!(relation_of(&results, 4), "great-grandfather");
    assert_eq!(relation_of(&results, 5), "great-great-great-grandmother");
}

#[test]
fn test_grandchildren_by_generation() {
    let input = members(json!([
        { "id": 1, "isSelf": true, "gender": "female", "generation": 4 },
        { "id": 2, "gender": "male", "generation": 2 },
        { "id": 3, "gender": "female", "generation": 1 },
        { "id": 4, "gender": "female", "generation": 3 }
    ]));
    let results = resolve(&input).unwrap();
    assert_eq!(relation_of(&results, 2), "grandson");
    assert_eq!(relation_of(&results, 3), "great-granddaughter");
    assert_eq!(relation_of(&results, 4), "relative");
}

#[test]
fn test_dangling_parent_is_relative() {
    let input = members(json!([
        { "id": 1, "isSelf": true, "gender": "male" },
        { "id": 2, "gender": "female", "parentId": 99 }
    ]));
    let results = resolve(&input).unwrap();
    assert_eq!(relation_of(&results, 2), "relative");
}

#[test]
fn test_dangling_shared_parent_still_makes_siblings() {
    let input = members(json!([
        { "id": 1, "isSelf": true, "gender": "male", "parentId": 99 },
        { "id": 2, "gender": "female", "parentId": 99 }
    ]));
    let results = resolve(&input).unwrap();
    assert_eq!(relation_of(&results, 2), "sister");
}

#[test]
fn test_disconnected_member_is_relative() {
    let input = members(json!([
        { "id": 1, "isSelf": true },
        { "id": 2 }
    ]));
    let results = resolve(&input).unwrap();
    assert_eq!(relation_of(&results, 2), "relative");
}

#[test]
fn test_spouse_label_follows_gender_both_ways() {
    let input = members(json!([
        { "id": 1, "isSelf": true, "gender": "female", "spouse": 2 },
        { "id": 2, "gender": "male", "spouse": 1 }
    ]));
    let results = resolve(&input).unwrap();
    assert_eq!(relation_of(&results, 2), "husband");

    let input = members(json!([
        { "id": 1, "isSelf": true, "gender": "male", "spouse": 2 },
        { "id": 2, "gender": "female", "spouse": 1 }
    ]));
    let results = resolve(&input).unwrap();
    assert_eq!(relation_of(&results, 2), "wife");
}

/// Unknown or non-exact gender values take the male label. Changing this
/// default must show up as a deliberate test change.
#[test]
fn test_unknown_gender_defaults_to_male_labels() {
    let input = members(json!([
        { "id": 1, "isSelf": true, "spouse": 2 },
        { "id": 2, "spouse": 1 },
        { "id": 3, "parentId": 1, "gender": null },
        { "id": 4, "parentId": 1, "gender": "Female" },
        { "id": 5, "parentId": 1, "gender": "other" }
    ]));
    let results = resolve(&input).unwrap();
    assert_eq!(relation_of(&results, 2), "husband");
    assert_eq!(relation_of(&results, 3), "son");
    assert_eq!(relation_of(&results, 4), "son");
    assert_eq!(relation_of(&results, 5), "son");
}

#[test]
fn test_empty_input_has_no_reference() {
    let err = resolve(&[]).unwrap_err();
    assert!(matches!(err, KinshipError::NoReferencePerson));
}

#[test]
fn test_missing_self_flag_has_no_reference() {
    let input = vec![PersonRecord::new(1, Gender::Male)];
    let err = resolve(&input).unwrap_err();
    assert!(matches!(err, KinshipError::NoReferencePerson));
}

#[test]
fn test_two_self_flags_are_ambiguous() {
    let input = vec![
        PersonRecord::new(1, Gender::Male).as_self(),
        PersonRecord::new("b", Gender::Female).as_self(),
    ];
    let err = resolve(&input).unwrap_err();
    assert!(err.to_string().contains("2 members have isSelf = true (1, b)"));
    match err {
        KinshipError::AmbiguousReferencePerson { ids } => {
            assert_eq!(ids, vec!["1".to_string(), "b".to_string()]);
        }
        other => panic!("expected AmbiguousReferencePerson, got {:?}", other),
    }
}

#[test]
fn test_first_wins_policy_takes_first_self() {
    let input = vec![
        PersonRecord::new(1, Gender::Male).as_self(),
        PersonRecord::new(2, Gender::Female).as_self().with_spouse(1),
    ];
    let resolver = RelationResolver::new().reference_policy(ReferencePolicy::FirstWins);
    let results = resolver.resolve(&input).unwrap();
    assert_eq!(relation_of(&results, 1), "self");
    assert_eq!(relation_of(&results, 2), "wife");
}

#[test]
fn test_resolve_for_ignores_self_flags() {
    let input = members(json!([
        { "id": 1, "isSelf": true, "gender": "male" },
        { "id": 2, "gender": "female", "parentId": 1 },
        { "id": 3, "gender": "male", "parentId": 1 }
    ]));
    let results = RelationResolver::new()
        .resolve_for(&input, &PersonId::from(2))
        .unwrap();
    assert_eq!(relation_of(&results, 2), "self");
    assert_eq!(relation_of(&results, 1), "father");
    assert_eq!(relation_of(&results, 3), "brother");
}

#[test]
fn test_resolve_for_unknown_id() {
    let input = vec![PersonRecord::new(1, Gender::Male).as_self()];
    let err = RelationResolver::new()
        .resolve_for(&input, &PersonId::from("nobody"))
        .unwrap_err();
    assert!(matches!(err, KinshipError::UnknownReference { ref id } if id == "nobody"));
}

#[test]
fn test_resolve_is_idempotent_and_does_not_mutate_input() {
    let input = extended_family();
    let snapshot = input.clone();
    let first = resolve(&input).unwrap();
    let second = resolve(&input).unwrap();
    assert_eq!(first, second);
    assert_eq!(input, snapshot);
}

#[test]
fn test_output_is_total_and_in_input_order() {
    let input = extended_family();
    let results = resolve(&input).unwrap();
    assert_eq!(results.len(), input.len());
    for (person, result) in input.iter().zip(&results) {
        assert_eq!(&person.id, result.id());
        assert!(!result.relation.is_empty());
    }
}

#[test]
fn test_result_keeps_extra_fields_and_replaces_stale_relation() {
    let input = members(json!([
        { "id": "a", "isSelf": true, "name": "Ada", "relation": "uncle" },
        { "id": "b", "spouse": "a", "gender": "male", "photo": "b.png" }
    ]));
    let results = resolve(&input).unwrap();
    let self_json = serde_json::to_value(&results[0]).unwrap();
    assert_eq!(self_json["name"], "Ada");
    assert_eq!(self_json["relation"], "self");
    assert_eq!(self_json["isSelf"], true);

    let spouse_json = serde_json::to_value(&results[1]).unwrap();
    assert_eq!(spouse_json["photo"], "b.png");
    assert_eq!(spouse_json["relation"], "husband");
}

#[test]
fn test_grandparent_by_inferred_generation() {
    let input = members(json!([
        { "id": 1, "isSelf": true, "gender": "male", "parentId": 2 },
        { "id": 2, "gender": "male", "parentId": 3 },
        { "id": 3, "gender": "female", "parentId": 4 },
        { "id": 4, "gender": "male" },
        { "id": 5, "gender": "male", "parentId": 6 },
        { "id": 6, "gender": "female", "parentId": 1 }
    ]));

    let plain = resolve(&input).unwrap();
    assert_eq!(relation_of(&plain, 3), "relative");

    let inferred = RelationResolver::new()
        .infer_generations(true)
        .resolve(&input)
        .unwrap();
    assert_eq!(relation_of(&inferred, 3), "grandmother");
    assert_eq!(relation_of(&inferred, 4), "great-grandfather");
    assert_eq!(relation_of(&inferred, 5), "grandson");
}
