use crate::units::{Quantity, UnitStandard};
use thiserror::Error;

pub type IsaResult<T> = Result<T, IsaError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IsaError {
    #[error("Unit standard has already been set to {current}")]
    StateLocked { current: UnitStandard },

    #[error("{name} is not an available unit standard (expected SI, USCS or IMPERIAL)")]
    InvalidUnitStandard { name: String },

    #[error("{name} is a constant and cannot be changed")]
    ImmutableConstant { name: &'static str },

    #[error("Unknown constant: {name}")]
    UnknownConstant { name: String },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("Cannot combine {lhs} with {rhs}")]
    QuantityMismatch { lhs: Quantity, rhs: Quantity },

    #[error("{quantity} is not dimensionless")]
    NotDimensionless { quantity: Quantity },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = IsaError::StateLocked {
            current: UnitStandard::Uscs,
        };
        assert!(err.to_string().contains("USCS"));

        let err = IsaError::ImmutableConstant { name: "g" };
        assert_eq!(err.to_string(), "g is a constant and cannot be changed");

        let err = IsaError::QuantityMismatch {
            lhs: Quantity::Temperature,
            rhs: Quantity::Pressure,
        };
        assert!(err.to_string().contains("Temperature"));
        assert!(err.to_string().contains("Pressure"));
    }
}
