// isa-core/src/units.rs

use crate::error::IsaError;
use std::fmt;
use std::str::FromStr;
use uom::si::f64::{
    Area as UomArea, DiffusionCoefficient as UomDiffusionCoefficient,
    DynamicViscosity as UomDynamicViscosity, Length as UomLength, Mass as UomMass,
    MassDensity as UomMassDensity, Pressure as UomPressure,
    TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
    Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type DynVisc = UomDynamicViscosity;
/// Kinematic viscosity shares the m²/s dimension of a diffusion coefficient.
pub type KinVisc = UomDiffusionCoefficient;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;
pub type Velocity = UomVelocity;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn km(v: f64) -> Length {
    use uom::si::length::kilometer;
    Length::new::<kilometer>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

#[inline]
pub fn m2ps(v: f64) -> KinVisc {
    use uom::si::diffusion_coefficient::square_meter_per_second;
    KinVisc::new::<square_meter_per_second>(v)
}

/// Unit system used for values crossing the user boundary.
///
/// Internal computation is always SI (with distances in kilometers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitStandard {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "SI"))]
    Si,
    #[cfg_attr(feature = "serde", serde(rename = "USCS"))]
    Uscs,
    #[cfg_attr(feature = "serde", serde(rename = "IMPERIAL"))]
    Imperial,
}

impl UnitStandard {
    pub const ALL: [UnitStandard; 3] = [Self::Si, Self::Uscs, Self::Imperial];

    pub fn name(self) -> &'static str {
        match self {
            Self::Si => "SI",
            Self::Uscs => "USCS",
            Self::Imperial => "IMPERIAL",
        }
    }
}

impl fmt::Display for UnitStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnitStandard {
    type Err = IsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SI" => Ok(Self::Si),
            "USCS" => Ok(Self::Uscs),
            "IMPERIAL" => Ok(Self::Imperial),
            _ => Err(IsaError::InvalidUnitStandard {
                name: s.to_string(),
            }),
        }
    }
}

/// Physical quantity carried by a dimensioned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quantity {
    /// Absolute temperature (SI: K)
    Temperature,
    /// Temperature difference (SI: K)
    TemperatureInterval,
    /// Absolute pressure (SI: Pa)
    Pressure,
    /// Mass density (SI: kg/m³)
    Density,
    /// Altitude or length (SI: km)
    Distance,
    /// Speed (SI: m/s)
    Speed,
    /// Dynamic viscosity (SI: kg/(m·s))
    DynamicViscosity,
    /// Kinematic viscosity (SI: m²/s)
    KinematicViscosity,
    /// Temperature gradient with height (SI: K/m)
    LapseRate,
    /// Specific gas constant / specific heat (J/(kg·K) in every standard)
    SpecHeatConstant,
    /// Universal gas constant (J/(mol·K) in every standard)
    UnivGasConstant,
    /// Molar mass (kg/mol in every standard)
    EarthMolarMass,
    /// Dimensionless
    Ratio,
}

impl Quantity {
    pub const ALL: [Quantity; 13] = [
        Self::Temperature,
        Self::TemperatureInterval,
        Self::Pressure,
        Self::Density,
        Self::Distance,
        Self::Speed,
        Self::DynamicViscosity,
        Self::KinematicViscosity,
        Self::LapseRate,
        Self::SpecHeatConstant,
        Self::UnivGasConstant,
        Self::EarthMolarMass,
        Self::Ratio,
    ];

    /// Unit symbol used to present this quantity under `standard`.
    pub fn symbol(self, standard: UnitStandard) -> &'static str {
        use UnitStandard::*;
        match (self, standard) {
            (Self::Temperature, Si) => "K",
            (Self::Temperature, Uscs) => "°F",
            (Self::Temperature, Imperial) => "°C",
            (Self::TemperatureInterval, Si) => "K",
            (Self::TemperatureInterval, Uscs) => "°F",
            (Self::TemperatureInterval, Imperial) => "°C",
            (Self::Pressure, Si) => "Pa",
            (Self::Pressure, Uscs) => "inHg",
            (Self::Pressure, Imperial) => "lbf/ft²",
            (Self::Density, Si) => "kg/m³",
            (Self::Density, Uscs) => "slug/ft³",
            (Self::Density, Imperial) => "lb/ft³",
            (Self::Distance, Si) => "km",
            (Self::Distance, _) => "ft",
            (Self::Speed, Si) => "m/s",
            (Self::Speed, Uscs) => "ft/s",
            (Self::Speed, Imperial) => "kn",
            (Self::DynamicViscosity, Si) => "kg/(m·s)",
            (Self::DynamicViscosity, Uscs) => "slug/(ft·s)",
            (Self::DynamicViscosity, Imperial) => "lb/(ft·s)",
            (Self::KinematicViscosity, Si) => "m²/s",
            (Self::KinematicViscosity, _) => "ft²/s",
            (Self::LapseRate, Si) => "K/m",
            (Self::LapseRate, Uscs) => "°F/ft",
            (Self::LapseRate, Imperial) => "°C/ft",
            (Self::SpecHeatConstant, _) => "J/(kg·K)",
            (Self::UnivGasConstant, _) => "J/(mol·K)",
            (Self::EarthMolarMass, _) => "kg/mol",
            (Self::Ratio, _) => "",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "Temperature"),
            Self::TemperatureInterval => write!(f, "Temperature Interval"),
            Self::Pressure => write!(f, "Pressure"),
            Self::Density => write!(f, "Density"),
            Self::Distance => write!(f, "Distance"),
            Self::Speed => write!(f, "Speed"),
            Self::DynamicViscosity => write!(f, "Dynamic Viscosity"),
            Self::KinematicViscosity => write!(f, "Kinematic Viscosity"),
            Self::LapseRate => write!(f, "Lapse Rate"),
            Self::SpecHeatConstant => write!(f, "Specific Heat Constant"),
            Self::UnivGasConstant => write!(f, "Universal Gas Constant"),
            Self::EarthMolarMass => write!(f, "Molar Mass"),
            Self::Ratio => write!(f, "Ratio"),
        }
    }
}

/// Size of one degree of `standard`'s temperature scale, in kelvin.
fn degree_in_kelvin(standard: UnitStandard) -> f64 {
    use uom::si::temperature_interval::{degree_celsius, degree_fahrenheit, kelvin};
    match standard {
        UnitStandard::Si => 1.0,
        UnitStandard::Uscs => TempInterval::new::<degree_fahrenheit>(1.0).get::<kelvin>(),
        UnitStandard::Imperial => TempInterval::new::<degree_celsius>(1.0).get::<kelvin>(),
    }
}

fn foot() -> Length {
    use uom::si::length::foot;
    Length::new::<foot>(1.0)
}

fn second() -> Time {
    use uom::si::time::second;
    Time::new::<second>(1.0)
}

/// SI magnitude of one user unit of `quantity` under `standard`.
///
/// For `Temperature` this is the size of a degree; the zero point is handled
/// by [`to_si`] / [`from_si`].
fn si_per_user_unit(quantity: Quantity, standard: UnitStandard) -> f64 {
    use UnitStandard::*;
    if standard == Si {
        return 1.0;
    }
    match quantity {
        Quantity::Temperature | Quantity::TemperatureInterval => degree_in_kelvin(standard),
        Quantity::Pressure => {
            use uom::si::pressure::{inch_of_mercury, pascal, pound_force_per_square_foot};
            match standard {
                Uscs => Pressure::new::<inch_of_mercury>(1.0).get::<pascal>(),
                _ => Pressure::new::<pound_force_per_square_foot>(1.0).get::<pascal>(),
            }
        }
        Quantity::Density => {
            use uom::si::mass_density::{
                kilogram_per_cubic_meter, pound_per_cubic_foot, slug_per_cubic_foot,
            };
            match standard {
                Uscs => Density::new::<slug_per_cubic_foot>(1.0).get::<kilogram_per_cubic_meter>(),
                _ => Density::new::<pound_per_cubic_foot>(1.0).get::<kilogram_per_cubic_meter>(),
            }
        }
        Quantity::Distance => {
            use uom::si::length::kilometer;
            foot().get::<kilometer>()
        }
        Quantity::Speed => {
            use uom::si::velocity::{foot_per_second, knot, meter_per_second};
            match standard {
                Uscs => Velocity::new::<foot_per_second>(1.0).get::<meter_per_second>(),
                _ => Velocity::new::<knot>(1.0).get::<meter_per_second>(),
            }
        }
        Quantity::DynamicViscosity => {
            use uom::si::mass::{pound, slug};
            let mass = match standard {
                Uscs => Mass::new::<slug>(1.0),
                _ => Mass::new::<pound>(1.0),
            };
            (mass / (foot() * second())).value
        }
        Quantity::KinematicViscosity => {
            use uom::si::area::square_foot;
            (Area::new::<square_foot>(1.0) / second()).value
        }
        Quantity::LapseRate => {
            use uom::si::length::meter;
            degree_in_kelvin(standard) / foot().get::<meter>()
        }
        Quantity::SpecHeatConstant
        | Quantity::UnivGasConstant
        | Quantity::EarthMolarMass
        | Quantity::Ratio => 1.0,
    }
}

/// Convert `value`, expressed in `standard`'s unit for `quantity`, to SI.
pub fn to_si(value: f64, quantity: Quantity, standard: UnitStandard) -> f64 {
    use uom::si::thermodynamic_temperature::{degree_celsius, degree_fahrenheit, kelvin};
    match (quantity, standard) {
        (Quantity::Temperature, UnitStandard::Uscs) => {
            Temperature::new::<degree_fahrenheit>(value).get::<kelvin>()
        }
        (Quantity::Temperature, UnitStandard::Imperial) => {
            Temperature::new::<degree_celsius>(value).get::<kelvin>()
        }
        _ => value * si_per_user_unit(quantity, standard),
    }
}

/// Convert an SI `value` of `quantity` to `standard`'s unit.
pub fn from_si(value: f64, quantity: Quantity, standard: UnitStandard) -> f64 {
    use uom::si::thermodynamic_temperature::{degree_celsius, degree_fahrenheit};
    match (quantity, standard) {
        (Quantity::Temperature, UnitStandard::Uscs) => k(value).get::<degree_fahrenheit>(),
        (Quantity::Temperature, UnitStandard::Imperial) => k(value).get::<degree_celsius>(),
        _ => value / si_per_user_unit(quantity, standard),
    }
}

/// Convert a temperature difference in `standard` degrees to kelvin.
pub fn interval_to_si(value: f64, standard: UnitStandard) -> f64 {
    to_si(value, Quantity::TemperatureInterval, standard)
}

/// Convert a temperature difference in kelvin to `standard` degrees.
pub fn interval_from_si(value: f64, standard: UnitStandard) -> f64 {
    from_si(value, Quantity::TemperatureInterval, standard)
}
