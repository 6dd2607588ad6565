use std::result::Result as StdResult;

use gastos_config::ConfigError;
use gastos_core::CoreError;
use thiserror::Error;

/// Unified error type across engine, storage and configuration.
#[derive(Error, Debug)]
pub enum GastosError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = StdResult<T, GastosError>;

impl GastosError {
    /// `true` when the input was rejected before anything was changed.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GastosError::Core(CoreError::Validation(_)) | GastosError::Config(ConfigError::Invalid { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_recognised() {
        let err: GastosError = CoreError::Validation("empty".into()).into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation failed: empty");

        let err: GastosError = CoreError::Storage("disk full".into()).into();
        assert!(!err.is_validation());
    }
}
