//! isa-core: stable foundation for the standard atmosphere model.
//!
//! Contains:
//! - units (uom SI types, quantity tags, unit standards, SI <-> user conversion)
//! - quantity (dimensioned values crossing the SI/user boundary)
//! - registry (process-wide, set-once unit standard)
//! - constants (frozen physical constants + builder)
//! - numeric (tolerances, finiteness and sign checks)
//! - error (shared error types)

pub mod constants;
pub mod error;
pub mod numeric;
pub mod quantity;
pub mod registry;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use constants::{CONSTANTS, ConstantName, Constants, ConstantsBuilder};
pub use error::{IsaError, IsaResult};
pub use numeric::*;
pub use quantity::UnitQuantity;
pub use registry::{UnitRegistry, UnitTable};
pub use units::{Quantity, UnitStandard, from_si, interval_from_si, interval_to_si, to_si};
