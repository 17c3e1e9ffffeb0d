//! Name-based property lookup.
//!
//! Names resolve first against the atmosphere itself and then against its
//! active layer; anything else is [`AtmosError::AttributeNotFound`].

use crate::atmosphere::Atmosphere;
use crate::error::{AtmosError, AtmosResult};
use isa_core::UnitQuantity;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Altitude,
    Offset,
    GeometricHeight,
    Temperature,
    Pressure,
    Density,
    DynamicViscosity,
    KinematicViscosity,
    SpeedOfSound,
    TemperatureRatio,
    DensityRatio,
    PressureRatio,
    // forwarded to the active layer
    LapseRate,
    BaseHeight,
    BaseTemperature,
    BasePressure,
}

impl Property {
    pub const ALL: [Property; 16] = [
        Self::Altitude,
        Self::Offset,
        Self::GeometricHeight,
        Self::Temperature,
        Self::Pressure,
        Self::Density,
        Self::DynamicViscosity,
        Self::KinematicViscosity,
        Self::SpeedOfSound,
        Self::TemperatureRatio,
        Self::DensityRatio,
        Self::PressureRatio,
        Self::LapseRate,
        Self::BaseHeight,
        Self::BaseTemperature,
        Self::BasePressure,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Altitude => "altitude",
            Self::Offset => "offset",
            Self::GeometricHeight => "geometric_height",
            Self::Temperature => "temperature",
            Self::Pressure => "pressure",
            Self::Density => "density",
            Self::DynamicViscosity => "dynamic_viscosity",
            Self::KinematicViscosity => "kinematic_viscosity",
            Self::SpeedOfSound => "speed_of_sound",
            Self::TemperatureRatio => "temperature_ratio",
            Self::DensityRatio => "density_ratio",
            Self::PressureRatio => "pressure_ratio",
            Self::LapseRate => "lapse_rate",
            Self::BaseHeight => "base_height",
            Self::BaseTemperature => "base_temperature",
            Self::BasePressure => "base_pressure",
        }
    }

    /// True for names answered by the active layer rather than the facade.
    pub fn is_layer_property(self) -> bool {
        matches!(
            self,
            Self::LapseRate | Self::BaseHeight | Self::BaseTemperature | Self::BasePressure
        )
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = AtmosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|p| p.name() == key)
            .ok_or_else(|| AtmosError::AttributeNotFound {
                name: s.to_string(),
            })
    }
}

impl Atmosphere {
    pub fn get(&self, property: Property) -> UnitQuantity {
        let layer = self.atmosphere();
        match property {
            Property::Altitude => self.altitude(),
            Property::Offset => self.offset(),
            Property::GeometricHeight => self.geometric_height(),
            Property::Temperature => self.temperature(),
            Property::Pressure => self.pressure(),
            Property::Density => self.density(),
            Property::DynamicViscosity => self.dynamic_viscosity(),
            Property::KinematicViscosity => self.kinematic_viscosity(),
            Property::SpeedOfSound => self.speed_of_sound(),
            Property::TemperatureRatio => UnitQuantity::ratio(self.temperature_ratio()),
            Property::DensityRatio => UnitQuantity::ratio(self.density_ratio()),
            Property::PressureRatio => UnitQuantity::ratio(self.pressure_ratio()),
            Property::LapseRate => layer.lapse_rate(),
            Property::BaseHeight => layer.base_height(),
            Property::BaseTemperature => layer.base_temperature(),
            Property::BasePressure => layer.base_pressure(),
        }
    }

    /// Look a property up by name.
    pub fn property(&self, name: &str) -> AtmosResult<UnitQuantity> {
        Ok(self.get(name.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelConfig;
    use isa_core::Quantity;

    fn atm(h: f64) -> Atmosphere {
        Atmosphere::new_with(ModelConfig::default(), 0.0, h).unwrap()
    }

    #[test]
    fn facade_names() {
        let atm = atm(5.0);
        assert_eq!(atm.property("temperature").unwrap(), atm.temperature());
        assert_eq!(atm.property("Speed of Sound").unwrap(), atm.speed_of_sound());
        let ratio = atm.property("pressure-ratio").unwrap();
        assert_eq!(ratio.quantity(), Quantity::Ratio);
        assert_eq!(ratio.value(), atm.pressure_ratio());
    }

    #[test]
    fn layer_names_fall_through() {
        let atm = atm(15.0);
        let lapse = atm.property("lapse_rate").unwrap();
        assert_eq!(lapse.value(), 0.0);
        assert_eq!(lapse.quantity(), Quantity::LapseRate);
        assert!((atm.property("base_pressure").unwrap().value() - 22_632.06).abs() < 0.05);
        assert!(Property::BaseHeight.is_layer_property());
        assert!(!Property::Density.is_layer_property());
    }

    #[test]
    fn unknown_name() {
        let err = atm(1.0).property("humidity").unwrap_err();
        assert_eq!(
            err,
            AtmosError::AttributeNotFound {
                name: "humidity".to_string()
            }
        );
    }

    #[test]
    fn every_name_parses() {
        for p in Property::ALL {
            assert_eq!(p.name().parse::<Property>().unwrap(), p);
        }
    }
}
