#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidEnv {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Catchment identifier is not numeric: {0}")]
    NonNumericCatchment(String),

    #[error(transparent)]
    Tool(#[from] crate::tools::executor::ToolError),
}
