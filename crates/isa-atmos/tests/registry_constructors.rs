//! Plain constructors read the process-wide unit standard. Locking it is
//! process-wide, so this file holds a single test.

use isa_atmos::{Atmosphere, Layer};
use isa_core::{IsaError, UnitRegistry, UnitStandard};

#[test]
fn constructors_follow_the_registry() {
    // before the standard is set, everything is SI
    let si = Atmosphere::new(0.0, 11.0).unwrap();
    assert_eq!(si.standard(), UnitStandard::Si);
    assert_eq!(si.layer(), Layer::Troposphere);
    let geopotential = Atmosphere::geopotential_height(10.0).unwrap();
    assert!(geopotential.value() < 10.0);

    UnitRegistry::set_unit_standard("IMPERIAL").unwrap();

    // an existing atmosphere keeps the standard it was built with
    assert_eq!(si.temperature().symbol(), "K");

    let imperial = Atmosphere::new(0.0, 36_089.24).unwrap();
    assert_eq!(imperial.standard(), UnitStandard::Imperial);
    assert!((imperial.temperature().value() - -56.5).abs() < 1e-3);
    assert_eq!(imperial.temperature().to_user_unit(), imperial.temperature());

    let from_geometric = Atmosphere::from_geometric_height(0.0, 30_000.0).unwrap();
    assert!(from_geometric.altitude().value() < 30_000.0);
    assert_eq!(from_geometric.geometric_height().symbol(), "ft");

    assert!(matches!(
        UnitRegistry::set_unit_standard("SI"),
        Err(IsaError::StateLocked {
            current: UnitStandard::Imperial
        })
    ));
}
