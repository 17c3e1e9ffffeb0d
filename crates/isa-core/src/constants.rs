//! Physical and atmospheric constants (ICAO 1983), SI.
//!
//! [`Constants`] is a plain immutable value. [`CONSTANTS`] holds the standard
//! set for the lifetime of the process; alternates are produced with
//! [`ConstantsBuilder`], where each constant may be written at most once.

use crate::error::{IsaError, IsaResult};
use crate::numeric::{ensure_finite, ensure_positive};
use crate::units::Quantity;
use std::fmt;
use std::str::FromStr;

/// Standard gravitational acceleration [m/s²]
pub const G0_MPS2: f64 = 9.806_65;

pub static CONSTANTS: Constants = Constants::ICAO_1983;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constants {
    msl_temperature: f64,
    msl_pressure: f64,
    msl_density: f64,
    msl_dynamic_viscosity: f64,
    g: f64,
    gas_constant: f64,
    universal_gas_constant: f64,
    earth_radius: f64,
    molar_mass: f64,
    gamma: f64,
    c_p: f64,
    c_v: f64,
    sutherland: f64,
}

impl Constants {
    pub const ICAO_1983: Constants = Constants {
        msl_temperature: 288.15,
        msl_pressure: 101_325.0,
        msl_density: 1.225_012_265_990_7,
        msl_dynamic_viscosity: 1.7894e-5,
        g: G0_MPS2,
        gas_constant: 287.052_874,
        universal_gas_constant: 8.314_462_618,
        earth_radius: 6371.0,
        molar_mass: 0.028_964_4,
        gamma: 1.4,
        c_p: 1005.0,
        c_v: 718.0,
        sutherland: 110.4,
    };

    pub fn builder() -> ConstantsBuilder {
        ConstantsBuilder::new()
    }

    /// Sea-level temperature T0 [K]
    pub fn msl_temperature(&self) -> f64 {
        self.msl_temperature
    }

    /// Sea-level pressure P0 [Pa]
    pub fn msl_pressure(&self) -> f64 {
        self.msl_pressure
    }

    /// Sea-level density ρ0 [kg/m³]
    pub fn msl_density(&self) -> f64 {
        self.msl_density
    }

    /// Sea-level dynamic viscosity μ0 [Pa·s]
    pub fn msl_dynamic_viscosity(&self) -> f64 {
        self.msl_dynamic_viscosity
    }

    /// μ0 / ρ0 [m²/s]
    pub fn msl_kinematic_viscosity(&self) -> f64 {
        self.msl_dynamic_viscosity / self.msl_density
    }

    /// Gravitational acceleration g [m/s²]
    pub fn g(&self) -> f64 {
        self.g
    }

    /// Specific gas constant of air R [J/(kg·K)]
    pub fn gas_constant(&self) -> f64 {
        self.gas_constant
    }

    /// Universal gas constant R* [J/(mol·K)]
    pub fn universal_gas_constant(&self) -> f64 {
        self.universal_gas_constant
    }

    /// Mean Earth radius r [km]
    pub fn earth_radius(&self) -> f64 {
        self.earth_radius
    }

    /// Molar mass of air M [kg/mol]
    pub fn molar_mass(&self) -> f64 {
        self.molar_mass
    }

    /// Ratio of specific heats γ
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn c_p(&self) -> f64 {
        self.c_p
    }

    pub fn c_v(&self) -> f64 {
        self.c_v
    }

    /// Sutherland's constant S [K]
    pub fn sutherland(&self) -> f64 {
        self.sutherland
    }

    /// Sea-level speed of sound sqrt(γ·R·T0) [m/s]
    pub fn msl_speed_of_sound(&self) -> f64 {
        (self.gamma * self.gas_constant * self.msl_temperature).sqrt()
    }

    pub fn get(&self, name: ConstantName) -> f64 {
        match name {
            ConstantName::MslTemperature => self.msl_temperature,
            ConstantName::MslPressure => self.msl_pressure,
            ConstantName::MslDensity => self.msl_density,
            ConstantName::MslDynamicViscosity => self.msl_dynamic_viscosity,
            ConstantName::MslKinematicViscosity => self.msl_kinematic_viscosity(),
            ConstantName::Gravity => self.g,
            ConstantName::GasConstant => self.gas_constant,
            ConstantName::UniversalGasConstant => self.universal_gas_constant,
            ConstantName::EarthRadius => self.earth_radius,
            ConstantName::MolarMass => self.molar_mass,
            ConstantName::MslSpeedOfSound => self.msl_speed_of_sound(),
            ConstantName::Gamma => self.gamma,
            ConstantName::Cp => self.c_p,
            ConstantName::Cv => self.c_v,
            ConstantName::Sutherland => self.sutherland,
        }
    }

    fn slot(&mut self, name: ConstantName) -> Option<&mut f64> {
        match name {
            ConstantName::MslTemperature => Some(&mut self.msl_temperature),
            ConstantName::MslPressure => Some(&mut self.msl_pressure),
            ConstantName::MslDensity => Some(&mut self.msl_density),
            ConstantName::MslDynamicViscosity => Some(&mut self.msl_dynamic_viscosity),
            ConstantName::Gravity => Some(&mut self.g),
            ConstantName::GasConstant => Some(&mut self.gas_constant),
            ConstantName::UniversalGasConstant => Some(&mut self.universal_gas_constant),
            ConstantName::EarthRadius => Some(&mut self.earth_radius),
            ConstantName::MolarMass => Some(&mut self.molar_mass),
            ConstantName::Gamma => Some(&mut self.gamma),
            ConstantName::Cp => Some(&mut self.c_p),
            ConstantName::Cv => Some(&mut self.c_v),
            ConstantName::Sutherland => Some(&mut self.sutherland),
            ConstantName::MslKinematicViscosity | ConstantName::MslSpeedOfSound => None,
        }
    }
}

impl Default for Constants {
    fn default() -> Self {
        Self::ICAO_1983
    }
}

/// Canonical constant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantName {
    MslTemperature,
    MslPressure,
    MslDensity,
    MslDynamicViscosity,
    MslKinematicViscosity,
    Gravity,
    GasConstant,
    UniversalGasConstant,
    EarthRadius,
    MolarMass,
    MslSpeedOfSound,
    Gamma,
    Cp,
    Cv,
    Sutherland,
}

impl ConstantName {
    pub const ALL: [ConstantName; 15] = [
        Self::MslTemperature,
        Self::MslPressure,
        Self::MslDensity,
        Self::MslDynamicViscosity,
        Self::MslKinematicViscosity,
        Self::Gravity,
        Self::GasConstant,
        Self::UniversalGasConstant,
        Self::EarthRadius,
        Self::MolarMass,
        Self::MslSpeedOfSound,
        Self::Gamma,
        Self::Cp,
        Self::Cv,
        Self::Sutherland,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MslTemperature => "MSL_TEMPERATURE",
            Self::MslPressure => "MSL_PRESSURE",
            Self::MslDensity => "MSL_DENSITY",
            Self::MslDynamicViscosity => "MSL_DYNAMIC_VISCOSITY",
            Self::MslKinematicViscosity => "MSL_KINEMATIC_VISCOSITY",
            Self::Gravity => "g",
            Self::GasConstant => "R",
            Self::UniversalGasConstant => "R_",
            Self::EarthRadius => "r",
            Self::MolarMass => "M",
            Self::MslSpeedOfSound => "a_o",
            Self::Gamma => "y",
            Self::Cp => "c_p",
            Self::Cv => "c_v",
            Self::Sutherland => "S",
        }
    }

    /// Quantity tag of the constant; `None` for gravity, which has no
    /// presentation unit.
    pub fn quantity(self) -> Option<Quantity> {
        match self {
            Self::MslTemperature | Self::Sutherland => Some(Quantity::Temperature),
            Self::MslPressure => Some(Quantity::Pressure),
            Self::MslDensity => Some(Quantity::Density),
            Self::MslDynamicViscosity => Some(Quantity::DynamicViscosity),
            Self::MslKinematicViscosity => Some(Quantity::KinematicViscosity),
            Self::Gravity => None,
            Self::GasConstant | Self::Cp | Self::Cv => Some(Quantity::SpecHeatConstant),
            Self::UniversalGasConstant => Some(Quantity::UnivGasConstant),
            Self::EarthRadius => Some(Quantity::Distance),
            Self::MolarMass => Some(Quantity::EarthMolarMass),
            Self::MslSpeedOfSound => Some(Quantity::Speed),
            Self::Gamma => Some(Quantity::Ratio),
        }
    }

    /// Derived constants are computed from others and never written.
    pub fn is_derived(self) -> bool {
        matches!(self, Self::MslKinematicViscosity | Self::MslSpeedOfSound)
    }

    fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl fmt::Display for ConstantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstantName {
    type Err = IsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| IsaError::UnknownConstant {
                name: s.to_string(),
            })
    }
}

/// Produces a [`Constants`] value, starting from ICAO 1983.
///
/// Each primary constant may be overridden once; a second write, or any write
/// to a derived constant, fails with [`IsaError::ImmutableConstant`]. Values
/// must be finite and strictly positive.
#[derive(Debug, Clone)]
pub struct ConstantsBuilder {
    constants: Constants,
    written: u32,
}

impl ConstantsBuilder {
    pub fn new() -> Self {
        Self::from_base(Constants::ICAO_1983)
    }

    pub fn from_base(constants: Constants) -> Self {
        Self {
            constants,
            written: 0,
        }
    }

    pub fn set(mut self, name: ConstantName, value: f64) -> IsaResult<Self> {
        let what = name.as_str();
        let value = ensure_positive(ensure_finite(value, what)?, what)?;
        if self.written & name.bit() != 0 {
            return Err(IsaError::ImmutableConstant {
                name: name.as_str(),
            });
        }
        let slot = self
            .constants
            .slot(name)
            .ok_or(IsaError::ImmutableConstant {
                name: name.as_str(),
            })?;
        *slot = value;
        self.written |= name.bit();
        Ok(self)
    }

    pub fn set_by_name(self, name: &str, value: f64) -> IsaResult<Self> {
        self.set(name.parse()?, value)
    }

    pub fn build(self) -> Constants {
        self.constants
    }
}

impl Default for ConstantsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icao_values() {
        assert!((CONSTANTS.msl_temperature() - 288.15).abs() < 1e-9);
        assert!((CONSTANTS.g() - 9.80665).abs() < 1e-9);
        assert!((CONSTANTS.msl_density() - 1.225).abs() < 1e-4);
        assert!((CONSTANTS.msl_speed_of_sound() - 340.294).abs() < 1e-3);
        assert!((CONSTANTS.msl_kinematic_viscosity() - 1.4607e-5).abs() < 1e-8);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!("R".parse::<ConstantName>().unwrap(), ConstantName::GasConstant);
        assert_eq!("r".parse::<ConstantName>().unwrap(), ConstantName::EarthRadius);
        assert_eq!(CONSTANTS.get("S".parse().unwrap()), 110.4);
        assert!(matches!(
            "gravity".parse::<ConstantName>(),
            Err(IsaError::UnknownConstant { .. })
        ));
        for name in ConstantName::ALL {
            assert_eq!(name.as_str().parse::<ConstantName>().unwrap(), name);
        }
    }

    #[test]
    fn builder_overrides_once() {
        let constants = Constants::builder()
            .set(ConstantName::Gravity, 9.81)
            .unwrap()
            .set_by_name("MSL_TEMPERATURE", 300.0)
            .unwrap()
            .build();
        assert_eq!(constants.g(), 9.81);
        assert_eq!(constants.msl_temperature(), 300.0);
        assert_eq!(constants.gas_constant(), CONSTANTS.gas_constant());
        // the frozen set is untouched
        assert_eq!(CONSTANTS.g(), G0_MPS2);
    }

    #[test]
    fn second_write_is_rejected() {
        let err = Constants::builder()
            .set(ConstantName::Gravity, 10.0)
            .unwrap()
            .set(ConstantName::Gravity, 11.0)
            .unwrap_err();
        assert_eq!(err, IsaError::ImmutableConstant { name: "g" });
    }

    #[test]
    fn derived_constants_are_immutable() {
        let err = Constants::builder()
            .set(ConstantName::MslSpeedOfSound, 300.0)
            .unwrap_err();
        assert!(matches!(err, IsaError::ImmutableConstant { name: "a_o" }));
    }

    #[test]
    fn non_finite_rejected() {
        let err = Constants::builder()
            .set(ConstantName::Gamma, f64::NAN)
            .unwrap_err();
        assert!(matches!(err, IsaError::NonFinite { what: "y", .. }));
    }

    #[test]
    fn non_positive_rejected() {
        let err = Constants::builder()
            .set(ConstantName::Gravity, -9.81)
            .unwrap_err();
        assert!(matches!(err, IsaError::NonPositive { what: "g", .. }));
        assert!(Constants::builder().set_by_name("R", 0.0).is_err());
    }

    #[test]
    fn derived_values_follow_overrides() {
        let constants = Constants::builder()
            .set(ConstantName::MslDensity, 2.0)
            .unwrap()
            .build();
        assert!(
            (constants.msl_kinematic_viscosity() - constants.msl_dynamic_viscosity() / 2.0).abs()
                < 1e-15
        );
    }
}
