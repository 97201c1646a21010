use thiserror::Error;

/// Errors that can occur while resolving family relationships.
#[derive(Error, Debug)]
pub enum KinshipError {
    #[error("no reference person: exactly one member must have isSelf = true")]
    NoReferencePerson,

    #[error("ambiguous reference person: {} members have isSelf = true ({})", .ids.len(), .ids.join(", "))]
    AmbiguousReferencePerson { ids: Vec<String> },

    #[error("unknown reference person: {id} is not in the member collection")]
    UnknownReference { id: String },

    #[error("input error: {message}")]
    Input { message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `KinshipError`.
pub type Result<T> = std::result::Result<T, KinshipError>;
