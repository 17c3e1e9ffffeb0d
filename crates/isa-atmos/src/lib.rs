//! isa-atmos: the ICAO 1983 International Standard Atmosphere up to 47 km.
//!
//! Provides:
//! - Layer selection and the closed-form layer laws (troposphere, tropopause,
//!   lower and upper stratosphere)
//! - The `Atmosphere` facade with derived quantities (density, viscosity,
//!   speed of sound, Mach number, dynamic pressure, geometric height)
//! - Name-based property lookup that falls through to the active layer
//! - Altitude profiles
//!
//! # Units
//!
//! Computation is SI with altitudes in kilometers. Inputs and outputs cross
//! the boundary in the standard carried by [`ModelConfig`], which the plain
//! constructors take from [`isa_core::UnitRegistry`].
//!
//! # Example
//!
//! ```
//! use isa_atmos::{Atmosphere, ModelConfig};
//! use isa_core::UnitStandard;
//!
//! let atm = Atmosphere::new_with(ModelConfig::new(UnitStandard::Si), 0.0, 11.0).unwrap();
//! println!("{} at {}", atm.temperature(), atm.atmosphere());
//! let mach = atm.mach_number(250.0).unwrap();
//! assert!(mach > 0.8 && mach < 0.9);
//! ```

pub mod atmosphere;
pub mod config;
pub mod error;
pub mod layer;
pub mod profile;
pub mod property;

// Re-exports for ergonomics
pub use atmosphere::{ActiveLayer, Atmosphere};
pub use config::ModelConfig;
pub use error::{AtmosError, AtmosResult};
pub use layer::{Layer, MAX_ALTITUDE_KM, MIN_ALTITUDE_KM, select_layer};
pub use profile::{AltitudeKind, AltitudeSweep, ProfileRow, compute_profile};
pub use property::Property;
