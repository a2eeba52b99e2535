use thiserror::Error;

use crate::llm_client::LlmError;

/// Errors of the outer surfaces: input reading, configuration and the
/// refinement adapter. The extraction core itself never fails.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Refinement timed out after {0}s")]
    RefinementTimeout(u64),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Short machine-readable code, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Io(_) => "IO_ERROR",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Llm(_) => "LLM_ERROR",
            AppError::RefinementTimeout(_) => "REFINEMENT_TIMEOUT",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_converts() {
        let err: AppError = LlmError::EmptyContent.into();
        assert_eq!(err.code(), "LLM_ERROR");
        assert!(err.to_string().starts_with("LLM error:"));
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(
            AppError::RefinementTimeout(20).to_string(),
            "Refinement timed out after 20s"
        );
    }
}
