//! Crate-wide error type.
//!
//! Every variant maps to a process exit code so the `dl` binary can report
//! failures the same way regardless of which layer raised them:
//!
//! - `2`: unreadable input or invalid settings
//! - `3`: inventory / table shape problems
//! - `4`: unit or distribution problems during conversion

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// File, CSV or JSON problems (message carries the file context).
    #[error("{0}")]
    Input(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Missing required building attribute `{0}`")]
    MissingField(String),

    #[error("Building attribute `{field}` is invalid: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Building #{index}: {source}")]
    Building {
        index: usize,
        #[source]
        source: Box<AppError>,
    },

    #[error("{what} has {found} entries but the parameter table has {expected} rows")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Undefined unit: `{0}`")]
    UndefinedUnit(String),

    #[error("Unsupported distribution: `{0}`")]
    UnsupportedDistribution(String),

    #[error("Invalid parameter for {key}: {reason}")]
    InvalidParameter { key: String, reason: String },
}

impl AppError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_parameter(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Input(_) | AppError::Config(_) => 2,
            AppError::MissingField(_)
            | AppError::InvalidField { .. }
            | AppError::LengthMismatch { .. } => 3,
            AppError::Building { source, .. } => source.exit_code(),
            AppError::UndefinedUnit(_)
            | AppError::UnsupportedDistribution(_)
            | AppError::InvalidParameter { .. } => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn building_error_inherits_inner_exit_code() {
        let err = AppError::Building {
            index: 7,
            source: Box::new(AppError::MissingField("YearBuilt".to_string())),
        };
        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            err.to_string(),
            "Building #7: Missing required building attribute `YearBuilt`"
        );
    }

    #[test]
    fn conversion_errors_use_exit_code_4() {
        assert_eq!(AppError::UndefinedUnit("furlong".into()).exit_code(), 4);
        assert_eq!(AppError::UnsupportedDistribution("gamma".into()).exit_code(), 4);
    }
}
