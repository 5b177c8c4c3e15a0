#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("node #{index} has no uuid")]
    MissingUuid { index: usize },
    #[error("uuid appears on more than one node: {uuid}")]
    DuplicateUuid { uuid: String },
    #[error("unsupported body shape type: {shape_type}")]
    UnsupportedShape { shape_type: String },
    #[error("caps exceeded: {what}")]
    CapsExceeded { what: String },
    #[error("value out of bounds: {what}")]
    OutOfBounds { what: String },
    #[error("invalid document: {message}")]
    InvalidDocument { message: String },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {message}")]
    InvalidSettings { message: String },
}

impl Error {
    /// Stable machine-readable code, used by bindings.
    pub fn code(&self) -> &'static str {
        match self {
            Error::MissingUuid { .. } => "missing_uuid",
            Error::DuplicateUuid { .. } => "duplicate_uuid",
            Error::UnsupportedShape { .. } => "unsupported_shape",
            Error::CapsExceeded { .. } => "caps_exceeded",
            Error::OutOfBounds { .. } => "out_of_bounds",
            Error::InvalidDocument { .. } => "invalid_document",
            Error::Json(_) => "json_parse",
            Error::InvalidSettings { .. } => "invalid_settings",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
