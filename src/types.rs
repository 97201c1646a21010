use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Opaque identifier of a family member.
///
/// Member documents carry either numeric or string ids; both are accepted and
/// serialized back in the shape they arrived in. `1` and `"1"` are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersonId {
    Number(i64),
    Text(String),
}

impl PersonId {
    /// Returns true for ids that cannot refer to anyone (empty or whitespace
    /// strings, which document stores use for "unset").
    pub fn is_blank(&self) -> bool {
        match self {
            PersonId::Number(_) => false,
            PersonId::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonId::Number(n) => write!(f, "{}", n),
            PersonId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for PersonId {
    fn from(n: i64) -> Self {
        PersonId::Number(n)
    }
}

impl From<i32> for PersonId {
    fn from(n: i32) -> Self {
        PersonId::Number(i64::from(n))
    }
}

impl From<&str> for PersonId {
    fn from(s: &str) -> Self {
        PersonId::Text(s.to_string())
    }
}

impl From<String> for PersonId {
    fn from(s: String) -> Self {
        PersonId::Text(s)
    }
}

/// Recorded gender of a member.
///
/// Only the exact strings `"male"` and `"female"` are recognized. Any other
/// string is kept verbatim as `Other` so it is written back unchanged; a
/// missing field or `null` is `Unknown` and is omitted on output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Gender {
    Male,
    Female,
    Other(String),
    #[default]
    Unknown,
}

#[allow(clippy::should_implement_trait)]
impl Gender {
    /// Returns the string representation of this gender.
    pub fn as_str(&self) -> &str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other(raw) => raw,
            Gender::Unknown => "unknown",
        }
    }

    /// Parses a gender string. Never fails: unrecognized values are `Other`.
    pub fn from_str(s: &str) -> Gender {
        match s {
            "male" => Gender::Male,
            "female" => Gender::Female,
            other => Gender::Other(other.to_string()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Gender::Unknown)
    }

    /// Picks the female variant only for `Female`; every other value takes
    /// the male form.
    pub fn pick<'a>(&self, male: &'a str, female: &'a str) -> &'a str {
        match self {
            Gender::Female => female,
            Gender::Male | Gender::Other(_) | Gender::Unknown => male,
        }
    }
}

impl From<Option<String>> for Gender {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Gender::from_str).unwrap_or_default()
    }
}

impl From<Gender> for Option<String> {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Unknown => None,
            Gender::Other(raw) => Some(raw),
            known => Some(known.as_str().to_string()),
        }
    }
}

/// Reads an optional boolean, treating `null` like a missing field.
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// A single family member as supplied by the caller.
///
/// Fields the resolver does not interpret (name, photo, timestamps, ...) are
/// preserved in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub id: PersonId,
    #[serde(default, skip_serializing_if = "Gender::is_unknown")]
    pub gender: Gender,
    /// The one recorded parent; the other parent is that parent's spouse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<PersonId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse: Option<PersonId>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_self: bool,
    /// Relative depth; larger is older.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PersonRecord {
    /// Creates a record with no links, no generation and `isSelf = false`.
    pub fn new(id: impl Into<PersonId>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            gender,
            parent_id: None,
            spouse: None,
            is_self: false,
            generation: None,
            extra: Map::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<PersonId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_spouse(mut self, spouse: impl Into<PersonId>) -> Self {
        self.spouse = Some(spouse.into());
        self
    }

    pub fn with_generation(mut self, generation: i64) -> Self {
        self.generation = Some(generation);
        self
    }

    pub fn as_self(mut self) -> Self {
        self.is_self = true;
        self
    }

    /// The recorded parent id, ignoring blank placeholders.
    pub fn parent_ref(&self) -> Option<&PersonId> {
        self.parent_id.as_ref().filter(|id| !id.is_blank())
    }

    /// The recorded spouse id, ignoring blank placeholders.
    pub fn spouse_ref(&self) -> Option<&PersonId> {
        self.spouse.as_ref().filter(|id| !id.is_blank())
    }
}

/// A member record enriched with its computed relation label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationResult {
    #[serde(flatten)]
    pub person: PersonRecord,
    pub relation: String,
}

impl RelationResult {
    /// Builds a result from a borrowed input record. Any stale `relation`
    /// carried in the record's extra fields is dropped.
    pub fn new(person: &PersonRecord, relation: String) -> Self {
        let mut person = person.clone();
        person.extra.remove("relation");
        Self { person, relation }
    }

    pub fn id(&self) -> &PersonId {
        &self.person.id
    }
}
