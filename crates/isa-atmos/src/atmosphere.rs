//! The `Atmosphere` facade.
//!
//! An `Atmosphere` is a frozen snapshot of one (altitude, offset) pair under a
//! [`ModelConfig`], together with the layer that altitude falls in. Changing
//! the altitude or offset builds a new instance, which re-selects the layer.

use crate::config::{ModelConfig, geometric_from_geopotential_km};
use crate::error::{AtmosError, AtmosResult};
use crate::layer::{Layer, select_layer};
use isa_core::units::{Density, DynVisc, KinVisc, Length, Pressure, Temperature, Velocity};
use isa_core::units::{k, kgpm3, km, m2ps, mps, pa, pa_s};
use isa_core::{
    Quantity, UnitQuantity, UnitStandard, interval_from_si, interval_to_si, to_si,
};
use std::fmt;
use std::ops::{Add, Sub};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    config: ModelConfig,
    /// Geopotential altitude [km]
    altitude_km: f64,
    /// Temperature offset [K]
    offset_k: f64,
    layer: Layer,
}

impl Atmosphere {
    /// Atmosphere at `geopotential_height` with a uniform temperature
    /// `offset`, both read in the process-wide unit standard.
    pub fn new(offset: f64, geopotential_height: f64) -> AtmosResult<Self> {
        Self::new_with(ModelConfig::from_registry(), offset, geopotential_height)
    }

    /// Atmosphere at a geometric height, read in the process-wide standard.
    pub fn from_geometric_height(offset: f64, geometric_height: f64) -> AtmosResult<Self> {
        Self::from_geometric_height_with(ModelConfig::from_registry(), offset, geometric_height)
    }

    /// Geopotential height for a geometric height, in the process-wide standard.
    pub fn geopotential_height(geometric_height: f64) -> AtmosResult<UnitQuantity> {
        ModelConfig::from_registry().geopotential_height(geometric_height)
    }

    pub fn new_with(
        config: ModelConfig,
        offset: f64,
        geopotential_height: f64,
    ) -> AtmosResult<Self> {
        let standard = config.standard();
        let altitude_km = to_si(geopotential_height, Quantity::Distance, standard);
        let offset_k = interval_to_si(offset, standard);
        Self::from_si(config, offset_k, altitude_km)
    }

    pub fn from_geometric_height_with(
        config: ModelConfig,
        offset: f64,
        geometric_height: f64,
    ) -> AtmosResult<Self> {
        let geopotential = config.geopotential_height(geometric_height)?;
        Self::new_with(config, offset, geopotential.value())
    }

    fn from_si(config: ModelConfig, offset_k: f64, altitude_km: f64) -> AtmosResult<Self> {
        if !offset_k.is_finite() {
            return Err(AtmosError::InvalidInput {
                what: "temperature offset",
                value: offset_k,
            });
        }
        // the tropopause is the coldest point of the standard profile
        let coldest = Layer::Tropopause.base_temperature(config.constants());
        if coldest <= 0.0 {
            return Err(AtmosError::InvalidInput {
                what: "standard tropopause temperature",
                value: coldest,
            });
        }
        let layer = select_layer(altitude_km)?;
        if altitude_km >= config.constants().earth_radius() {
            return Err(AtmosError::InvalidInput {
                what: "altitude at or above Earth radius",
                value: altitude_km,
            });
        }
        let temperature = layer.temperature(altitude_km, offset_k, config.constants());
        if temperature <= 0.0 {
            return Err(AtmosError::InvalidInput {
                what: "temperature offset",
                value: offset_k,
            });
        }
        debug!(altitude_km, offset_k, layer = %layer, "built atmosphere");
        Ok(Self {
            config,
            altitude_km,
            offset_k,
            layer,
        })
    }

    /// Same offset and configuration at another geopotential height.
    pub fn at_altitude(&self, geopotential_height: f64) -> AtmosResult<Self> {
        let altitude_km = to_si(geopotential_height, Quantity::Distance, self.standard());
        Self::from_si(self.config, self.offset_k, altitude_km)
    }

    /// Same altitude with a different offset.
    pub fn with_offset(&self, offset: f64) -> AtmosResult<Self> {
        Self::from_si(
            self.config,
            interval_to_si(offset, self.standard()),
            self.altitude_km,
        )
    }

    /// Same altitude with the offset changed by `delta`.
    pub fn offset_by(&self, delta: f64) -> AtmosResult<Self> {
        Self::from_si(
            self.config,
            self.offset_k + interval_to_si(delta, self.standard()),
            self.altitude_km,
        )
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn standard(&self) -> UnitStandard {
        self.config.standard()
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// The active layer, viewed through this atmosphere.
    pub fn atmosphere(&self) -> ActiveLayer<'_> {
        ActiveLayer { atmosphere: self }
    }

    fn present(&self, value_si: f64, quantity: Quantity) -> UnitQuantity {
        UnitQuantity::from_si_value(value_si, quantity, self.standard())
    }

    // SI internals

    fn temperature_k(&self) -> f64 {
        self.layer
            .temperature(self.altitude_km, self.offset_k, self.config.constants())
    }

    fn pressure_pa(&self) -> f64 {
        self.layer.pressure(self.altitude_km, self.config.constants())
    }

    fn density_kg_m3(&self) -> f64 {
        self.pressure_pa() / (self.config.constants().gas_constant() * self.temperature_k())
    }

    fn dynamic_viscosity_pa_s(&self) -> f64 {
        let c = self.config.constants();
        let t = self.temperature_k();
        let t0 = c.msl_temperature();
        let s = c.sutherland();
        c.msl_dynamic_viscosity() * (t / t0).powf(1.5) * (t0 + s) / (t + s)
    }

    fn speed_of_sound_mps(&self) -> f64 {
        let c = self.config.constants();
        (c.gamma() * c.gas_constant() * self.temperature_k()).sqrt()
    }

    fn velocity_mps(&self, velocity: f64) -> AtmosResult<f64> {
        if !velocity.is_finite() || velocity < 0.0 {
            return Err(AtmosError::InvalidInput {
                what: "velocity",
                value: velocity,
            });
        }
        Ok(to_si(velocity, Quantity::Speed, self.standard()))
    }

    // Typed SI accessors

    pub fn altitude_si(&self) -> Length {
        km(self.altitude_km)
    }

    pub fn temperature_si(&self) -> Temperature {
        k(self.temperature_k())
    }

    pub fn pressure_si(&self) -> Pressure {
        pa(self.pressure_pa())
    }

    pub fn density_si(&self) -> Density {
        kgpm3(self.density_kg_m3())
    }

    pub fn dynamic_viscosity_si(&self) -> DynVisc {
        pa_s(self.dynamic_viscosity_pa_s())
    }

    pub fn kinematic_viscosity_si(&self) -> KinVisc {
        m2ps(self.dynamic_viscosity_pa_s() / self.density_kg_m3())
    }

    pub fn speed_of_sound_si(&self) -> Velocity {
        mps(self.speed_of_sound_mps())
    }

    // Values in the configured standard

    /// Geopotential altitude.
    pub fn altitude(&self) -> UnitQuantity {
        self.present(self.altitude_km, Quantity::Distance)
    }

    /// Temperature offset, as an interval.
    pub fn offset(&self) -> UnitQuantity {
        UnitQuantity::new(
            interval_from_si(self.offset_k, self.standard()),
            Quantity::TemperatureInterval,
            self.standard(),
        )
    }

    pub fn temperature(&self) -> UnitQuantity {
        self.present(self.temperature_k(), Quantity::Temperature)
    }

    pub fn pressure(&self) -> UnitQuantity {
        self.present(self.pressure_pa(), Quantity::Pressure)
    }

    /// Ideal gas density from the pressure and the offset temperature.
    pub fn density(&self) -> UnitQuantity {
        self.present(self.density_kg_m3(), Quantity::Density)
    }

    /// Sutherland's law.
    pub fn dynamic_viscosity(&self) -> UnitQuantity {
        self.present(self.dynamic_viscosity_pa_s(), Quantity::DynamicViscosity)
    }

    pub fn kinematic_viscosity(&self) -> UnitQuantity {
        self.present(
            self.dynamic_viscosity_pa_s() / self.density_kg_m3(),
            Quantity::KinematicViscosity,
        )
    }

    pub fn speed_of_sound(&self) -> UnitQuantity {
        self.present(self.speed_of_sound_mps(), Quantity::Speed)
    }

    pub fn temperature_ratio(&self) -> f64 {
        self.temperature_k() / self.config.constants().msl_temperature()
    }

    pub fn density_ratio(&self) -> f64 {
        self.density_kg_m3() / self.config.constants().msl_density()
    }

    pub fn pressure_ratio(&self) -> f64 {
        self.pressure_pa() / self.config.constants().msl_pressure()
    }

    pub fn geometric_height(&self) -> UnitQuantity {
        let r = self.config.constants().earth_radius();
        self.present(
            geometric_from_geopotential_km(self.altitude_km, r),
            Quantity::Distance,
        )
    }

    /// Mach number for a speed given in the configured standard.
    ///
    /// Negative or non-finite speeds are rejected.
    pub fn mach_number(&self, velocity: f64) -> AtmosResult<f64> {
        Ok(self.velocity_mps(velocity)? / self.speed_of_sound_mps())
    }

    /// q = ½·ρ·v² for a speed given in the configured standard.
    pub fn dynamic_pressure(&self, velocity: f64) -> AtmosResult<UnitQuantity> {
        let v = self.velocity_mps(velocity)?;
        Ok(self.present(0.5 * self.density_kg_m3() * v * v, Quantity::Pressure))
    }
}

impl Add<f64> for &Atmosphere {
    type Output = AtmosResult<Atmosphere>;

    fn add(self, delta: f64) -> Self::Output {
        self.offset_by(delta)
    }
}

impl Sub<f64> for &Atmosphere {
    type Output = AtmosResult<Atmosphere>;

    fn sub(self, delta: f64) -> Self::Output {
        self.offset_by(-delta)
    }
}

impl fmt::Display for Atmosphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ISA(offset {}, {})", self.offset(), self.altitude())
    }
}

/// The layer an [`Atmosphere`] sits in, with that atmosphere's altitude and
/// offset.
#[derive(Debug, Clone, Copy)]
pub struct ActiveLayer<'a> {
    atmosphere: &'a Atmosphere,
}

impl ActiveLayer<'_> {
    pub fn kind(&self) -> Layer {
        self.atmosphere.layer
    }

    pub fn temperature(&self) -> UnitQuantity {
        self.atmosphere.temperature()
    }

    pub fn pressure(&self) -> UnitQuantity {
        self.atmosphere.pressure()
    }

    pub fn base_height(&self) -> UnitQuantity {
        self.atmosphere
            .present(self.kind().base_height_km(), Quantity::Distance)
    }

    pub fn base_temperature(&self) -> UnitQuantity {
        let c = self.atmosphere.config.constants();
        self.atmosphere
            .present(self.kind().base_temperature(c), Quantity::Temperature)
    }

    pub fn base_pressure(&self) -> UnitQuantity {
        let c = self.atmosphere.config.constants();
        self.atmosphere
            .present(self.kind().base_pressure(c), Quantity::Pressure)
    }

    pub fn lapse_rate(&self) -> UnitQuantity {
        self.atmosphere
            .present(self.kind().lapse_rate(), Quantity::LapseRate)
    }
}

impl fmt::Display for ActiveLayer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.atmosphere.altitude())
    }
}
