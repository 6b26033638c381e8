//! Coordinate engine errors.

use gaitrig_skeleton_model::ModelError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// A chain or the reference needs a `(segment, axis)` series the store
    /// does not have. Fatal to actor construction.
    #[error("No series for segment '{segment}' on axis {axis}")]
    UnknownSegmentAxis { segment: String, axis: char },

    /// None of the segments requested for tracing are in the blueprint.
    #[error("Segments not found in blueprint: {}", .segments.join(", "))]
    SegmentNotFound { segments: Vec<String> },

    #[error(transparent)]
    Model(ModelError),
}

impl From<ModelError> for CoreError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnknownSegmentAxis { segment, axis } => {
                Self::UnknownSegmentAxis { segment, axis }
            }
            other => Self::Model(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_segment_axis_is_lifted() {
        let err: CoreError = ModelError::unknown_segment_axis("Tail", 'x').into();
        assert_eq!(
            err,
            CoreError::UnknownSegmentAxis {
                segment: "Tail".to_string(),
                axis: 'x'
            }
        );
        assert_eq!(err.to_string(), "No series for segment 'Tail' on axis x");
    }

    #[test]
    fn segment_not_found_names_everything() {
        let err = CoreError::SegmentNotFound {
            segments: vec!["BogusA".to_string(), "BogusB".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Segments not found in blueprint: BogusA, BogusB"
        );
    }
}
