//! Errors raised while building or querying the skeleton model.

/// Failures of the raw data layer and blueprint validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("No series for segment '{segment}' on axis {axis}")]
    UnknownSegmentAxis { segment: String, axis: char },

    #[error("Invalid axis '{value}': expected one of x, y, z")]
    InvalidAxis { value: String },

    #[error("Series '{key}' has {found} samples, expected {expected}")]
    RaggedSeries {
        key: String,
        expected: usize,
        found: usize,
    },

    #[error("Non-numeric sample {value:?} in column '{column}' at data row {row}")]
    MalformedSample {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Duplicate column '{key}'")]
    DuplicateColumn { key: String },

    #[error("Table has no columns")]
    EmptyTable,

    #[error("Invalid blueprint: {message}")]
    InvalidBlueprint { message: String },
}

impl ModelError {
    pub fn unknown_segment_axis(segment: impl Into<String>, axis: impl Into<char>) -> Self {
        Self::UnknownSegmentAxis {
            segment: segment.into(),
            axis: axis.into(),
        }
    }

    pub fn invalid_blueprint(msg: impl Into<String>) -> Self {
        Self::InvalidBlueprint {
            message: msg.into(),
        }
    }
}
