//! Domain error types.

/// Top-level error type for fundfacts.
#[derive(Debug, thiserror::Error)]
pub enum FactsError {
    #[error("cannot read data directory {path}: {reason}")]
    DataDirectory { path: String, reason: String },

    #[error("failed to load {file}: {reason}")]
    Load { file: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no valid datasets loaded")]
    EmptyRegistry,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&FactsError> for std::process::ExitCode {
    fn from(err: &FactsError) -> Self {
        let code: u8 = match err {
            FactsError::Io(_) => 1,
            FactsError::ConfigParse { .. } | FactsError::ConfigInvalid { .. } => 2,
            FactsError::DataDirectory { .. } | FactsError::Load { .. } => 3,
            FactsError::EmptyRegistry => 6,
        };
        std::process::ExitCode::from(code)
    }
}
