//! Process-wide unit standard.
//!
//! The standard can be set exactly once. Until then every reader sees SI;
//! reading never locks it.

use crate::error::{IsaError, IsaResult};
use crate::units::{Quantity, UnitStandard};
use std::sync::OnceLock;
use tracing::{info, warn};

static UNIT_STANDARD: OnceLock<UnitStandard> = OnceLock::new();

/// Unit symbols for every quantity under one standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitTable {
    standard: UnitStandard,
}

impl UnitTable {
    pub const fn new(standard: UnitStandard) -> Self {
        Self { standard }
    }

    pub fn standard(&self) -> UnitStandard {
        self.standard
    }

    pub fn symbol(&self, quantity: Quantity) -> &'static str {
        quantity.symbol(self.standard)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Quantity, &'static str)> + '_ {
        Quantity::ALL.into_iter().map(|q| (q, self.symbol(q)))
    }
}

pub struct UnitRegistry;

impl UnitRegistry {
    /// Lock the process-wide standard by name (`"SI"`, `"USCS"`, `"IMPERIAL"`,
    /// case-insensitive).
    ///
    /// Fails with [`IsaError::StateLocked`] once a standard has been set, even
    /// if the name is not a valid standard.
    pub fn set_unit_standard(name: &str) -> IsaResult<UnitStandard> {
        if let Some(current) = UNIT_STANDARD.get() {
            warn!(requested = name, current = %current, "unit standard already locked");
            return Err(IsaError::StateLocked { current: *current });
        }
        Self::set(name.parse()?)
    }

    pub fn set(standard: UnitStandard) -> IsaResult<UnitStandard> {
        match UNIT_STANDARD.set(standard) {
            Ok(()) => {
                info!(standard = %standard, "unit standard locked");
                Ok(standard)
            }
            Err(requested) => {
                let current = Self::unit_standard();
                warn!(requested = %requested, current = %current, "unit standard already locked");
                Err(IsaError::StateLocked { current })
            }
        }
    }

    pub fn is_locked() -> bool {
        UNIT_STANDARD.get().is_some()
    }

    pub fn unit_standard() -> UnitStandard {
        UNIT_STANDARD.get().copied().unwrap_or_default()
    }

    pub fn get_unit_standard() -> UnitStandard {
        Self::unit_standard()
    }

    pub fn get_units() -> UnitTable {
        UnitTable::new(Self::unit_standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The latch itself is exercised in tests/unit_registry.rs, which runs in
    // its own process.

    #[test]
    fn table_lists_every_quantity() {
        let table = UnitTable::new(UnitStandard::Uscs);
        assert_eq!(table.iter().count(), Quantity::ALL.len());
        assert_eq!(table.symbol(Quantity::Pressure), "inHg");
        assert_eq!(table.standard(), UnitStandard::Uscs);
    }

    #[test]
    fn imperial_table() {
        let table = UnitTable::new(UnitStandard::Imperial);
        let symbols: Vec<_> = table.iter().map(|(_, s)| s).collect();
        assert!(symbols.contains(&"kn"));
        assert!(symbols.contains(&"lbf/ft²"));
        assert!(symbols.contains(&"°C"));
    }
}
