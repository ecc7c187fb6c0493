use thiserror::Error;

/// Dataset authoring errors. Any of these means the embedded catalog is
/// broken; none of them can be caused by a user at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog is empty")]
    Empty,

    #[error("duplicate pattern id {id:?}")]
    DuplicateId { id: String },

    #[error("pattern {id:?}: required field `{field}` is empty")]
    EmptyField { id: String, field: &'static str },

    #[error("pattern {id:?}: `{field}` must be longer than {min} characters (got {actual})")]
    TooShort {
        id: String,
        field: &'static str,
        min: usize,
        actual: usize,
    },

    #[error("pattern {id:?}: `before` and `after` code are identical")]
    IdenticalCode { id: String },

    #[error("pattern {id:?} references unknown related pattern {related:?}")]
    DanglingReference { id: String, related: String },

    #[error("pattern {id:?} lists itself as a related pattern")]
    SelfReference { id: String },

    #[error("difficulty {value} is outside 1..=5")]
    DifficultyOutOfRange { value: u8 },

    #[error("unknown pattern category {0:?}")]
    UnknownCategory(String),

    #[error("embedded catalog could not be parsed: {0}")]
    Parse(String),
}
