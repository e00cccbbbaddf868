use crate::model::MetricField;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("topic source unavailable at {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed topic source: {message}")]
    MalformedSource { message: String },

    #[error(transparent)]
    InvalidTopicShape(#[from] ShapeViolation),
}

/// A structural problem found while validating a topic mapping.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeViolation {
    #[error("topics must be an object mapping labels to topic metrics")]
    NotAMapping,

    #[error("topic `{label}` must be an object")]
    NotAnObject { label: String },

    #[error("topic `{label}` is missing a `{field}` of type number")]
    NotANumber { label: String, field: MetricField },
}

impl ShapeViolation {
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::NotAMapping => None,
            Self::NotAnObject { label } | Self::NotANumber { label, .. } => Some(label),
        }
    }

    pub fn field(&self) -> Option<MetricField> {
        match self {
            Self::NotANumber { field, .. } => Some(*field),
            _ => None,
        }
    }
}
