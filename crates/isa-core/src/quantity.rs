//! Dimensioned values at the SI/user-unit boundary.
//!
//! A [`UnitQuantity`] pairs a number with the physical quantity it measures and
//! the unit standard the number is expressed in. Values are immutable: every
//! conversion or arithmetic operation returns a new value.

use crate::error::{IsaError, IsaResult};
use crate::numeric::{Tolerances, nearly_equal};
use crate::registry::UnitRegistry;
use crate::units::{Quantity, UnitStandard, from_si, to_si};
use std::fmt;
use std::ops::{Div, Mul, Neg};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitQuantity {
    value: f64,
    quantity: Quantity,
    standard: UnitStandard,
}

impl UnitQuantity {
    /// A value already expressed in `standard`'s unit for `quantity`.
    pub const fn new(value: f64, quantity: Quantity, standard: UnitStandard) -> Self {
        Self {
            value,
            quantity,
            standard,
        }
    }

    pub const fn si(value: f64, quantity: Quantity) -> Self {
        Self::new(value, quantity, UnitStandard::Si)
    }

    pub const fn ratio(value: f64) -> Self {
        Self::si(value, Quantity::Ratio)
    }

    /// Present an SI value in `standard`.
    pub fn from_si_value(value_si: f64, quantity: Quantity, standard: UnitStandard) -> Self {
        Self::new(from_si(value_si, quantity, standard), quantity, standard)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn standard(&self) -> UnitStandard {
        self.standard
    }

    pub fn symbol(&self) -> &'static str {
        self.quantity.symbol(self.standard)
    }

    /// Numeric value in SI.
    pub fn si_value(&self) -> f64 {
        to_si(self.value, self.quantity, self.standard)
    }

    pub fn convert_to(&self, target: UnitStandard) -> Self {
        if target == self.standard {
            return *self;
        }
        Self::from_si_value(self.si_value(), self.quantity, target)
    }

    pub fn to_si(&self) -> Self {
        self.convert_to(UnitStandard::Si)
    }

    /// Convert to the process-wide standard held by [`UnitRegistry`].
    pub fn to_user_unit(&self) -> Self {
        self.convert_to(UnitRegistry::unit_standard())
    }

    fn mismatch(&self, other: &Self) -> IsaError {
        IsaError::QuantityMismatch {
            lhs: self.quantity,
            rhs: other.quantity,
        }
    }

    fn ensure_same_quantity(&self, other: &Self) -> IsaResult<()> {
        if self.quantity == other.quantity {
            Ok(())
        } else {
            Err(self.mismatch(other))
        }
    }

    /// Absolute temperature moved by `sign` times a temperature interval,
    /// in `self`'s standard.
    fn shifted(&self, interval: &Self, sign: f64) -> Self {
        let delta = interval.convert_to(self.standard).value;
        Self::new(self.value + sign * delta, Quantity::Temperature, self.standard)
    }

    /// Sum in `self`'s standard.
    ///
    /// Same quantities add directly. A temperature plus an interval (in either
    /// order) is a temperature; two absolute temperatures do not add.
    pub fn try_add(&self, other: &Self) -> IsaResult<Self> {
        use Quantity::{Temperature, TemperatureInterval};
        match (self.quantity, other.quantity) {
            (Temperature, Temperature) => Err(self.mismatch(other)),
            (Temperature, TemperatureInterval) => Ok(self.shifted(other, 1.0)),
            (TemperatureInterval, Temperature) => {
                Ok(other.shifted(self, 1.0).convert_to(self.standard))
            }
            _ => {
                self.ensure_same_quantity(other)?;
                let rhs = other.convert_to(self.standard);
                Ok(Self::new(self.value + rhs.value, self.quantity, self.standard))
            }
        }
    }

    /// Difference in `self`'s standard.
    ///
    /// Two temperatures differ by an interval, and a temperature less an
    /// interval is a temperature.
    pub fn try_sub(&self, other: &Self) -> IsaResult<Self> {
        use Quantity::{Temperature, TemperatureInterval};
        match (self.quantity, other.quantity) {
            (Temperature, Temperature) => Ok(Self::from_si_value(
                self.si_value() - other.si_value(),
                TemperatureInterval,
                self.standard,
            )),
            (Temperature, TemperatureInterval) => Ok(self.shifted(other, -1.0)),
            (TemperatureInterval, Temperature) => Err(self.mismatch(other)),
            _ => {
                self.ensure_same_quantity(other)?;
                let rhs = other.convert_to(self.standard);
                Ok(Self::new(self.value - rhs.value, self.quantity, self.standard))
            }
        }
    }

    /// Same quantity and equal within `tol` once both are in SI.
    pub fn approx_eq(&self, other: &Self, tol: Tolerances) -> bool {
        self.quantity == other.quantity && nearly_equal(self.si_value(), other.si_value(), tol)
    }

    /// Dimensionless ratio of two values of the same quantity, taken in SI so
    /// that absolute temperatures divide on the kelvin scale.
    pub fn try_ratio(&self, other: &Self) -> IsaResult<Self> {
        self.ensure_same_quantity(other)?;
        Ok(Self::ratio(self.si_value() / other.si_value()))
    }

    /// Raise a dimensionless value to a power.
    pub fn try_powf(&self, exponent: f64) -> IsaResult<Self> {
        if self.quantity != Quantity::Ratio {
            return Err(IsaError::NotDimensionless {
                quantity: self.quantity,
            });
        }
        Ok(Self::ratio(self.value.powf(exponent)))
    }
}

impl Mul<f64> for UnitQuantity {
    type Output = UnitQuantity;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.value * rhs, self.quantity, self.standard)
    }
}

impl Div<f64> for UnitQuantity {
    type Output = UnitQuantity;

    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.value / rhs, self.quantity, self.standard)
    }
}

impl Neg for UnitQuantity {
    type Output = UnitQuantity;

    fn neg(self) -> Self::Output {
        Self::new(-self.value, self.quantity, self.standard)
    }
}

impl fmt::Display for UnitQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.symbol();
        if let Some(precision) = f.precision() {
            write!(f, "{:.*}", precision, self.value)?;
        } else {
            write!(f, "{}", self.value)?;
        }
        if symbol.is_empty() {
            Ok(())
        } else {
            write!(f, " {symbol}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_round_trip() {
        let t = UnitQuantity::si(288.15, Quantity::Temperature);
        let f = t.convert_to(UnitStandard::Uscs);
        assert!((f.value() - 59.0).abs() < 1e-9);
        assert_eq!(f.symbol(), "°F");
        let back = f.to_si();
        assert!((back.value() - 288.15).abs() < 1e-9);
        assert_eq!(back.standard(), UnitStandard::Si);
    }

    #[test]
    fn add_converts_rhs() {
        let a = UnitQuantity::new(1.0, Quantity::Distance, UnitStandard::Si);
        let b = UnitQuantity::new(1000.0, Quantity::Distance, UnitStandard::Uscs);
        let sum = a.try_add(&b).unwrap();
        assert_eq!(sum.standard(), UnitStandard::Si);
        assert!((sum.value() - 1.3048).abs() < 1e-12);

        let diff = b.try_sub(&a).unwrap();
        assert_eq!(diff.standard(), UnitStandard::Uscs);
        assert!(diff.value() < 0.0);
    }

    #[test]
    fn temperature_plus_interval() {
        let t = UnitQuantity::new(15.0, Quantity::Temperature, UnitStandard::Imperial);
        let dt = UnitQuantity::new(10.0, Quantity::TemperatureInterval, UnitStandard::Imperial);
        let warmer = t.try_add(&dt).unwrap();
        assert_eq!(warmer.quantity(), Quantity::Temperature);
        assert!((warmer.value() - 25.0).abs() < 1e-12);

        // 9 °F is 5 K, whatever the zero point
        let dt_f = UnitQuantity::new(9.0, Quantity::TemperatureInterval, UnitStandard::Uscs);
        let cooler = t.try_sub(&dt_f).unwrap();
        assert!((cooler.value() - 10.0).abs() < 1e-9);

        let flipped = dt.try_add(&t).unwrap();
        assert_eq!(flipped.quantity(), Quantity::Temperature);
        assert_eq!(flipped.standard(), UnitStandard::Imperial);
        assert!((flipped.value() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn temperature_difference_is_interval() {
        let t = UnitQuantity::new(59.0, Quantity::Temperature, UnitStandard::Uscs);
        let t0 = UnitQuantity::si(273.15, Quantity::Temperature);
        let dt = t.try_sub(&t0).unwrap();
        assert_eq!(dt.quantity(), Quantity::TemperatureInterval);
        assert_eq!(dt.standard(), UnitStandard::Uscs);
        assert!((dt.value() - 27.0).abs() < 1e-9);
    }

    #[test]
    fn absolute_temperatures_do_not_add() {
        let t = UnitQuantity::new(15.0, Quantity::Temperature, UnitStandard::Imperial);
        assert!(matches!(
            t.try_add(&t),
            Err(IsaError::QuantityMismatch {
                lhs: Quantity::Temperature,
                rhs: Quantity::Temperature
            })
        ));
        let dt = UnitQuantity::si(5.0, Quantity::TemperatureInterval);
        assert!(dt.try_sub(&t).is_err());
    }

    #[test]
    fn approx_eq_across_standards() {
        let p = UnitQuantity::si(101_325.0, Quantity::Pressure);
        let p_psf = p.convert_to(UnitStandard::Imperial);
        assert!(p.approx_eq(&p_psf, Tolerances::default()));
        let t = UnitQuantity::si(101_325.0, Quantity::Temperature);
        assert!(!p.approx_eq(&t, Tolerances::default()));
    }

    #[test]
    fn mismatched_quantities_rejected() {
        let t = UnitQuantity::si(288.15, Quantity::Temperature);
        let p = UnitQuantity::si(101_325.0, Quantity::Pressure);
        assert!(matches!(
            t.try_add(&p),
            Err(IsaError::QuantityMismatch {
                lhs: Quantity::Temperature,
                rhs: Quantity::Pressure
            })
        ));
        assert!(t.try_ratio(&p).is_err());
    }

    #[test]
    fn temperature_ratio_uses_kelvin() {
        let t = UnitQuantity::new(32.0, Quantity::Temperature, UnitStandard::Uscs);
        let t0 = UnitQuantity::new(15.0, Quantity::Temperature, UnitStandard::Imperial);
        let ratio = t.try_ratio(&t0).unwrap();
        assert_eq!(ratio.quantity(), Quantity::Ratio);
        assert!((ratio.value() - 273.15 / 288.15).abs() < 1e-9);
    }

    #[test]
    fn power_only_for_ratios() {
        let r = UnitQuantity::ratio(4.0);
        assert!((r.try_powf(0.5).unwrap().value() - 2.0).abs() < 1e-12);
        let p = UnitQuantity::si(101_325.0, Quantity::Pressure);
        assert!(matches!(
            p.try_powf(2.0),
            Err(IsaError::NotDimensionless { .. })
        ));
    }

    #[test]
    fn scalar_ops_keep_quantity() {
        let q = UnitQuantity::si(100.0, Quantity::Pressure) * 0.5;
        assert_eq!(q.quantity(), Quantity::Pressure);
        assert_eq!(q.value(), 50.0);
        assert_eq!((q / 2.0).value(), 25.0);
        assert_eq!((-q).value(), -50.0);
    }

    #[test]
    fn display_with_symbol() {
        let p = UnitQuantity::si(101_325.0, Quantity::Pressure);
        assert_eq!(format!("{p:.1}"), "101325.0 Pa");
        assert_eq!(format!("{}", UnitQuantity::ratio(0.5)), "0.5");
    }
}
