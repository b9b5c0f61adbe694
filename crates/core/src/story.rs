//! Story lifecycle status.

use crate::error::CoreError;

/// Lifecycle of a story row. Stored as text in the database.
///
/// `Generating` is written before any asset exists, `Completed` after
/// the final update, `Failed` when generation dies after the row was
/// created. A crash between creation and the final update leaves the
/// row in `Generating`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryStatus {
    Generating,
    Completed,
    Failed,
}

impl StoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generating => "generating",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "generating" => Ok(Self::Generating),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(CoreError::validation(format!(
                "unknown story status: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for StoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
