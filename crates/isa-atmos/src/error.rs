//! Atmosphere model errors.

use isa_core::IsaError;
use thiserror::Error;

/// Result type for atmosphere operations.
pub type AtmosResult<T> = Result<T, AtmosError>;

/// Errors that can occur while building or querying an atmosphere.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AtmosError {
    /// Geopotential altitude outside the modelled range.
    #[error(
        "Altitude {altitude_km} km is outside the model (valid only from 0 to 47 km geopotential height)"
    )]
    OutOfRange { altitude_km: f64 },

    /// Name not found on the atmosphere or its active layer.
    #[error("No property named '{name}' on the atmosphere or its layer")]
    AttributeNotFound { name: String },

    /// Invalid argument (negative speed, non-physical offset, ...).
    #[error("Invalid input for {what}: {value}")]
    InvalidInput { what: &'static str, value: f64 },

    /// Configuration or unit error from the core crate.
    #[error(transparent)]
    Core(#[from] IsaError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AtmosError::OutOfRange { altitude_km: 50.0 };
        assert!(err.to_string().contains("50 km"));

        let err = AtmosError::AttributeNotFound {
            name: "humidity".into(),
        };
        assert!(err.to_string().contains("humidity"));
    }

    #[test]
    fn core_errors_pass_through() {
        let err: AtmosError = IsaError::ImmutableConstant { name: "g" }.into();
        assert_eq!(err.to_string(), "g is a constant and cannot be changed");
        assert!(matches!(err, AtmosError::Core(IsaError::ImmutableConstant { .. })));
    }
}
