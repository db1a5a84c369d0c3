use std::path::PathBuf;

use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] folio_core::ValidationError),

    #[error("usage error: {0}")]
    Usage(String),

    #[error("strict mode failed: warnings={warning_count}")]
    StrictModeViolation { warning_count: usize },

    #[error("failed to load settings: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("failed to read snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Timestamp(#[from] time::error::Format),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::Usage(_) => 2,
            Self::StrictModeViolation { .. } => 5,
            Self::Settings(_)
            | Self::Snapshot { .. }
            | Self::Serialization(_)
            | Self::Timestamp(_)
            | Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_categories() {
        assert_eq!(CliError::Usage("missing".into()).exit_code(), 2);
        assert_eq!(
            CliError::Validation(folio_core::ValidationError::EmptyTicker).exit_code(),
            2
        );
        assert_eq!(CliError::StrictModeViolation { warning_count: 1 }.exit_code(), 5);
    }
}
