use thiserror::Error;

/// Main error type for the MeLiF system
#[derive(Error, Debug)]
pub enum MfError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("Worker pool error: {0}")]
    Pool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for MeLiF operations
pub type MfResult<T> = Result<T, MfError>;

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::MfError::Config(format!($($arg)*))
    };
}

/// Macro for creating dataset errors
#[macro_export]
macro_rules! dataset_error {
    ($($arg:tt)*) => {
        $crate::MfError::Dataset(format!($($arg)*))
    };
}

/// Macro for creating evaluation errors
#[macro_export]
macro_rules! evaluation_error {
    ($($arg:tt)*) => {
        $crate::MfError::Evaluation(format!($($arg)*))
    };
}
