/// Indexed, read-only view over a flat member collection.
pub mod family;

/// Relative sets (siblings, cousins, in-laws, ...) derived for one anchor.
pub mod kindred;

pub use family::FamilyGraph;
pub use kindred::Kindred;
