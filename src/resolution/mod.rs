/// Relationship resolution.
///
/// Turns a flat member collection into one kinship label per member,
/// relative to a reference person, using an ordered rule table over the
/// derived relative sets with generation-based fallbacks.
pub mod labels;
mod rebase;
mod resolver;
pub mod rules;

pub use resolver::{resolve, RelationResolver};
