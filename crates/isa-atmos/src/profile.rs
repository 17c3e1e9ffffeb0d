//! Altitude profiles.
//!
//! A profile evaluates the atmosphere at evenly spaced altitudes between two
//! bounds, giving tables for plotting and comparison.

use crate::atmosphere::Atmosphere;
use crate::config::ModelConfig;
use crate::error::{AtmosError, AtmosResult};
use crate::layer::Layer;
use isa_core::UnitQuantity;
use std::fmt;
use tracing::debug;

/// Which altitude coordinate the sweep bounds are given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AltitudeKind {
    #[default]
    Geopotential,
    Geometric,
}

impl fmt::Display for AltitudeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geopotential => write!(f, "geopotential"),
            Self::Geometric => write!(f, "geometric"),
        }
    }
}

/// Linear sweep of altitudes, in the configured distance unit.
#[derive(Debug, Clone, PartialEq)]
pub struct AltitudeSweep {
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
    pub kind: AltitudeKind,
}

impl AltitudeSweep {
    pub fn new(start: f64, end: f64, num_points: usize, kind: AltitudeKind) -> AtmosResult<Self> {
        for (what, value) in [("sweep start", start), ("sweep end", end)] {
            if !value.is_finite() {
                return Err(AtmosError::InvalidInput { what, value });
            }
        }
        if num_points < 2 {
            return Err(AtmosError::InvalidInput {
                what: "sweep point count",
                value: num_points as f64,
            });
        }
        if (start - end).abs() < 1e-12 {
            return Err(AtmosError::InvalidInput {
                what: "sweep span",
                value: end - start,
            });
        }
        Ok(Self {
            start,
            end,
            num_points,
            kind,
        })
    }

    pub fn generate_points(&self) -> Vec<f64> {
        let delta = (self.end - self.start) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| self.start + i as f64 * delta)
            .collect();

        // Ensure exact endpoint
        if let Some(last) = points.last_mut() {
            *last = self.end;
        }
        points
    }
}

impl fmt::Display for AltitudeSweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} altitude from {} to {} ({} points)",
            self.kind, self.start, self.end, self.num_points
        )
    }
}

/// Atmospheric state at one profile altitude.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProfileRow {
    pub altitude: UnitQuantity,
    pub geometric_height: UnitQuantity,
    pub layer: Layer,
    pub temperature: UnitQuantity,
    pub pressure: UnitQuantity,
    pub density: UnitQuantity,
    pub speed_of_sound: UnitQuantity,
    pub dynamic_viscosity: UnitQuantity,
    pub kinematic_viscosity: UnitQuantity,
}

impl From<&Atmosphere> for ProfileRow {
    fn from(atm: &Atmosphere) -> Self {
        Self {
            altitude: atm.altitude(),
            geometric_height: atm.geometric_height(),
            layer: atm.layer(),
            temperature: atm.temperature(),
            pressure: atm.pressure(),
            density: atm.density(),
            speed_of_sound: atm.speed_of_sound(),
            dynamic_viscosity: atm.dynamic_viscosity(),
            kinematic_viscosity: atm.kinematic_viscosity(),
        }
    }
}

/// Evaluate the atmosphere at every sweep point.
///
/// Fails on the first altitude outside the model.
pub fn compute_profile(
    config: ModelConfig,
    offset: f64,
    sweep: &AltitudeSweep,
) -> AtmosResult<Vec<ProfileRow>> {
    debug!(%sweep, offset, "computing profile");
    sweep
        .generate_points()
        .into_iter()
        .map(|h| {
            let atm = match sweep.kind {
                AltitudeKind::Geopotential => Atmosphere::new_with(config, offset, h)?,
                AltitudeKind::Geometric => {
                    Atmosphere::from_geometric_height_with(config, offset, h)?
                }
            };
            Ok(ProfileRow::from(&atm))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use isa_core::UnitStandard;

    #[test]
    fn linear_points() {
        let sweep = AltitudeSweep::new(0.0, 20.0, 5, AltitudeKind::Geopotential).unwrap();
        let points = sweep.generate_points();
        assert_eq!(points.len(), 5);
        assert!((points[1] - 5.0).abs() < 1e-12);
        assert_eq!(points[4], 20.0);
    }

    #[test]
    fn descending_sweep() {
        let sweep = AltitudeSweep::new(20.0, 0.0, 3, AltitudeKind::Geopotential).unwrap();
        assert_eq!(sweep.generate_points(), vec![20.0, 10.0, 0.0]);
    }

    #[test]
    fn rejects_bad_sweeps() {
        assert!(AltitudeSweep::new(0.0, 10.0, 1, AltitudeKind::Geopotential).is_err());
        assert!(AltitudeSweep::new(5.0, 5.0, 3, AltitudeKind::Geopotential).is_err());
        assert!(AltitudeSweep::new(f64::NAN, 5.0, 3, AltitudeKind::Geometric).is_err());
    }

    #[test]
    fn profile_to_twenty_km() {
        let sweep = AltitudeSweep::new(0.0, 20.0, 201, AltitudeKind::Geopotential).unwrap();
        let rows = compute_profile(ModelConfig::default(), 0.0, &sweep).unwrap();
        assert_eq!(rows.len(), 201);
        assert_eq!(rows[0].layer, Layer::Troposphere);
        assert_eq!(rows[200].layer, Layer::Tropopause);
        assert!((rows[0].temperature.value() - 288.15).abs() < 1e-9);
        assert!(
            rows.windows(2)
                .all(|w| w[1].pressure.value() < w[0].pressure.value())
        );
    }

    #[test]
    fn geometric_profile_in_feet() {
        let config = ModelConfig::new(UnitStandard::Uscs);
        let sweep = AltitudeSweep::new(0.0, 40_000.0, 5, AltitudeKind::Geometric).unwrap();
        let rows = compute_profile(config, 0.0, &sweep).unwrap();
        assert_eq!(rows.len(), 5);
        assert!((rows[4].geometric_height.value() - 40_000.0).abs() < 1e-6);
        assert!(rows[4].altitude.value() < 40_000.0);
        assert_eq!(rows[4].temperature.symbol(), "°F");
    }

    #[test]
    fn profile_past_stratopause_fails() {
        let sweep = AltitudeSweep::new(40.0, 60.0, 3, AltitudeKind::Geopotential).unwrap();
        assert!(matches!(
            compute_profile(ModelConfig::default(), 0.0, &sweep),
            Err(AtmosError::OutOfRange { .. })
        ));
    }
}
