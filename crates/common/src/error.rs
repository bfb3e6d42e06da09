//! Error types shared across MatrixRain crates.

/// Top-level error type for MatrixRain operations.
#[derive(Debug, thiserror::Error)]
pub enum MatrixRainError {
    /// A required input was missing or invalid when an operation needed it.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A table lookup was keyed outside its domain.
    #[error("Index out of range: {message}")]
    IndexRange { message: String },

    /// A zoom factor that cannot produce a crop.
    #[error("Invalid zoom factor: {factor}")]
    InvalidFactor { factor: f64 },

    #[error("Diffusion error: {message}")]
    Diffusion { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using MatrixRainError.
pub type MatrixRainResult<T> = Result<T, MatrixRainError>;

impl MatrixRainError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration {
            message: msg.into(),
        }
    }

    pub fn index_range(msg: impl Into<String>) -> Self {
        Self::IndexRange {
            message: msg.into(),
        }
    }

    pub fn invalid_factor(factor: f64) -> Self {
        Self::InvalidFactor { factor }
    }

    pub fn diffusion(msg: impl Into<String>) -> Self {
        Self::Diffusion {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = MatrixRainError::configuration("source bitmap not set");
        assert_eq!(err.to_string(), "Configuration error: source bitmap not set");

        let err = MatrixRainError::invalid_factor(-1.5);
        assert_eq!(err.to_string(), "Invalid zoom factor: -1.5");
    }

    #[test]
    fn test_json_conversion() {
        let parse_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: MatrixRainError = parse_err.into();
        assert!(matches!(err, MatrixRainError::Json(_)));
    }
}
