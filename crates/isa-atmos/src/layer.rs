//! ISA layers up to the stratopause and the altitude → layer selector.
//!
//! Altitudes here are geopotential kilometers; temperatures in K, pressures in
//! Pa, lapse rates in K/m.
//!
//! Every layer integrates the hydrostatic equation from its own base values,
//! which are the top values of the layer below. Overriding a sea-level
//! constant therefore reshapes the whole profile without a step at any
//! boundary.
//! Pressure always follows the standard (offset-free) temperature profile, so
//! a temperature offset shifts the temperature a layer reports without moving
//! the pressure at any altitude.

use crate::error::{AtmosError, AtmosResult};
use isa_core::Constants;
use std::fmt;
use tracing::debug;

pub const MIN_ALTITUDE_KM: f64 = 0.0;
pub const MAX_ALTITUDE_KM: f64 = 47.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layer {
    /// 0–11 km, −6.5 K/km
    Troposphere,
    /// 11–20 km, isothermal
    Tropopause,
    /// 20–32 km, +1.0 K/km
    StratosphereLower,
    /// 32–47 km, +2.8 K/km
    StratosphereUpper,
}

/// Pick the layer for a geopotential altitude.
///
/// Each layer owns its upper boundary, so 11 km is troposphere, 20 km is
/// tropopause and 32 km is lower stratosphere. The profile is continuous there.
pub fn select_layer(altitude_km: f64) -> AtmosResult<Layer> {
    if !(MIN_ALTITUDE_KM..=MAX_ALTITUDE_KM).contains(&altitude_km) {
        return Err(AtmosError::OutOfRange { altitude_km });
    }
    let layer = Layer::ALL
        .into_iter()
        .find(|layer| altitude_km <= layer.top_height_km())
        .unwrap_or(Layer::StratosphereUpper);
    debug!(altitude_km, layer = %layer, "selected layer");
    Ok(layer)
}

impl Layer {
    pub const ALL: [Layer; 4] = [
        Self::Troposphere,
        Self::Tropopause,
        Self::StratosphereLower,
        Self::StratosphereUpper,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Troposphere => "ISA Troposphere",
            Self::Tropopause => "ISA Tropopause",
            Self::StratosphereLower => "ISA Stratosphere (lower)",
            Self::StratosphereUpper => "ISA Stratosphere (upper)",
        }
    }

    pub fn base_height_km(self) -> f64 {
        match self {
            Self::Troposphere => 0.0,
            Self::Tropopause => 11.0,
            Self::StratosphereLower => 20.0,
            Self::StratosphereUpper => 32.0,
        }
    }

    pub fn top_height_km(self) -> f64 {
        match self {
            Self::Troposphere => 11.0,
            Self::Tropopause => 20.0,
            Self::StratosphereLower => 32.0,
            Self::StratosphereUpper => MAX_ALTITUDE_KM,
        }
    }

    pub fn lapse_rate(self) -> f64 {
        match self {
            Self::Troposphere => -0.0065,
            Self::Tropopause => 0.0,
            Self::StratosphereLower => 0.0010,
            Self::StratosphereUpper => 0.0028,
        }
    }

    /// The layer directly underneath, `None` at sea level.
    pub fn below(self) -> Option<Layer> {
        match self {
            Self::Troposphere => None,
            Self::Tropopause => Some(Self::Troposphere),
            Self::StratosphereLower => Some(Self::Tropopause),
            Self::StratosphereUpper => Some(Self::StratosphereLower),
        }
    }

    /// Standard temperature at the layer base: the sea-level value carried up
    /// through the lapse rates of the layers below.
    pub fn base_temperature(self, constants: &Constants) -> f64 {
        match self.below() {
            None => constants.msl_temperature(),
            Some(lower) => lower.standard_temperature(self.base_height_km(), constants),
        }
    }

    /// Pressure at the layer base, integrated up from sea level under
    /// `constants`. With the ICAO values this reproduces the tabulated
    /// 22632.06, 5474.89 and 868.02 Pa to within 0.02 Pa.
    pub fn base_pressure(self, constants: &Constants) -> f64 {
        match self.below() {
            None => constants.msl_pressure(),
            Some(lower) => lower.pressure(self.base_height_km(), constants),
        }
    }

    /// Temperature of the standard day, with no offset.
    pub fn standard_temperature(self, altitude_km: f64, constants: &Constants) -> f64 {
        let dh_m = (altitude_km - self.base_height_km()) * 1000.0;
        self.base_temperature(constants) + self.lapse_rate() * dh_m
    }

    pub fn temperature(self, altitude_km: f64, offset_k: f64, constants: &Constants) -> f64 {
        self.standard_temperature(altitude_km, constants) + offset_k
    }

    pub fn pressure(self, altitude_km: f64, constants: &Constants) -> f64 {
        let g = constants.g();
        let r = constants.gas_constant();
        let base_t = self.base_temperature(constants);
        let base_p = self.base_pressure(constants);
        match self {
            Self::Tropopause => {
                let dh_m = (altitude_km - self.base_height_km()) * 1000.0;
                base_p * (-g * dh_m / (r * base_t)).exp()
            }
            Self::Troposphere | Self::StratosphereLower | Self::StratosphereUpper => {
                let ratio = self.standard_temperature(altitude_km, constants) / base_t;
                let exponent = -g / (r * self.lapse_rate());
                base_p * ratio.powf(exponent)
            }
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use isa_core::CONSTANTS;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn selected_layer_spans_altitude(h in MIN_ALTITUDE_KM..=MAX_ALTITUDE_KM) {
            let layer = select_layer(h).unwrap();
            prop_assert!(layer.base_height_km() <= h);
            prop_assert!(h <= layer.top_height_km());
        }

        #[test]
        fn pressure_falls_with_height(h in 0.0..46.0f64, dh in 0.01..1.0f64) {
            let lower = select_layer(h).unwrap().pressure(h, &CONSTANTS);
            let upper = select_layer(h + dh).unwrap().pressure(h + dh, &CONSTANTS);
            prop_assert!(upper < lower);
        }
    }
}
