/// Errors raised while turning a project record into timeline geometry.
///
/// These are per-record: a failing record is reported and skipped, the rest
/// of the layout pass carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("Malformed interval for project {id}: {field} {value:?} is not a YYYY-MM-DD date")]
    MalformedInterval {
        id: String,
        field: &'static str,
        value: String,
    },

    #[error("Unknown work classification for project {id}: {value:?}")]
    UnknownClassification { id: String, value: String },
}

impl LayoutError {
    pub fn project_id(&self) -> &str {
        match self {
            Self::MalformedInterval { id, .. } | Self::UnknownClassification { id, .. } => id,
        }
    }
}
