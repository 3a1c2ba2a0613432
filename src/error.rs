use thiserror::Error;

/// Result type alias for run setup
pub type Result<T> = std::result::Result<T, SetupError>;

/// Errors raised while preparing a run. The frame loop itself never fails.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Asset bundle has {0} parts, expected character, hurdle and track")]
    MissingParts(usize),

    #[error("Missing animation clip: {0}")]
    MissingClip(&'static str),

    #[error("Animation clip `{name}` has invalid duration {duration}")]
    InvalidClip { name: String, duration: f32 },
}
