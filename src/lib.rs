pub mod config;
pub mod errors;
pub mod format;
pub mod graph;
pub mod input;
pub mod resolution;
pub mod types;

pub use errors::{KinshipError, Result};
pub use resolution::{resolve, RelationResolver};
pub use types::{Gender, PersonId, PersonRecord, RelationResult};
