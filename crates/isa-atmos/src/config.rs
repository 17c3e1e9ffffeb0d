//! Explicit model configuration: unit standard + constants.

use crate::error::{AtmosError, AtmosResult};
use isa_core::{CONSTANTS, Constants, Quantity, UnitQuantity, UnitRegistry, UnitStandard, to_si};

/// Everything a computation needs besides altitude and offset.
///
/// Inputs are read in `standard` and outputs presented in it; internal
/// computation is SI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelConfig {
    standard: UnitStandard,
    constants: Constants,
}

impl ModelConfig {
    pub const fn new(standard: UnitStandard) -> Self {
        Self {
            standard,
            constants: Constants::ICAO_1983,
        }
    }

    /// Snapshot of the process-wide unit standard with the frozen constants.
    pub fn from_registry() -> Self {
        Self {
            standard: UnitRegistry::unit_standard(),
            constants: CONSTANTS,
        }
    }

    pub fn with_constants(mut self, constants: Constants) -> Self {
        self.constants = constants;
        self
    }

    pub fn standard(&self) -> UnitStandard {
        self.standard
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    /// Geopotential height for a geometric height, both in this standard's
    /// distance unit: H = r·h / (r + h).
    ///
    /// Defined for h > -r.
    pub fn geopotential_height(&self, geometric_height: f64) -> AtmosResult<UnitQuantity> {
        let h_km = to_si(geometric_height, Quantity::Distance, self.standard);
        let r = self.constants.earth_radius();
        if !h_km.is_finite() || h_km <= -r {
            return Err(AtmosError::InvalidInput {
                what: "geometric height",
                value: geometric_height,
            });
        }
        Ok(UnitQuantity::from_si_value(
            r * h_km / (r + h_km),
            Quantity::Distance,
            self.standard,
        ))
    }

    /// Geometric height for a geopotential height: h = r·H / (r - H).
    ///
    /// Defined for H < r.
    pub fn geometric_height(&self, geopotential_height: f64) -> AtmosResult<UnitQuantity> {
        let h_km = to_si(geopotential_height, Quantity::Distance, self.standard);
        let r = self.constants.earth_radius();
        if !h_km.is_finite() || h_km >= r {
            return Err(AtmosError::InvalidInput {
                what: "geopotential height",
                value: geopotential_height,
            });
        }
        Ok(UnitQuantity::from_si_value(
            geometric_from_geopotential_km(h_km, r),
            Quantity::Distance,
            self.standard,
        ))
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new(UnitStandard::Si)
    }
}

pub(crate) fn geometric_from_geopotential_km(h_km: f64, earth_radius_km: f64) -> f64 {
    earth_radius_km * h_km / (earth_radius_km - h_km)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geopotential_below_geometric() {
        let config = ModelConfig::default();
        let h = config.geopotential_height(10.0).unwrap();
        assert!(h.value() < 10.0);
        assert!((h.value() - 9.984_33).abs() < 1e-4);
        assert_eq!(h.quantity(), Quantity::Distance);
    }

    #[test]
    fn transforms_invert() {
        let config = ModelConfig::new(UnitStandard::Uscs);
        let geometric = config.geometric_height(30_000.0).unwrap();
        let back = config.geopotential_height(geometric.value()).unwrap();
        assert!((back.value() - 30_000.0).abs() < 1e-6);
        assert_eq!(back.standard(), UnitStandard::Uscs);
    }

    #[test]
    fn custom_constants() {
        let constants = Constants::builder()
            .set(isa_core::ConstantName::EarthRadius, 1000.0)
            .unwrap()
            .build();
        let config = ModelConfig::default().with_constants(constants);
        assert_eq!(config.constants().earth_radius(), 1000.0);
        let h = config.geopotential_height(10.0).unwrap();
        assert!((h.value() - 10_000.0 / 1010.0).abs() < 1e-12);
    }

    #[test]
    fn transforms_reject_points_past_earth_radius() {
        let config = ModelConfig::default();
        assert!(matches!(
            config.geometric_height(6371.0),
            Err(AtmosError::InvalidInput {
                what: "geopotential height",
                ..
            })
        ));
        assert!(config.geometric_height(7000.0).is_err());
        assert!(config.geopotential_height(-6371.0).is_err());
        assert!(config.geopotential_height(f64::NAN).is_err());
        assert!(config.geometric_height(6370.0).unwrap().value().is_finite());
    }
}
