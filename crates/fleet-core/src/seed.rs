//! Demo fleet used when the server starts without external data.

use crate::ambulance::Ambulance;
use crate::ampulario::{MaterialInput, Space};
use crate::error::Result;
use crate::material::{NewConsumable, NewEquipment};
use crate::store::Store;
use crate::types::{EquipmentStatus, Route, WorkflowStep};
use chrono::Duration;

/// Populate `store` with three ambulances at different workflow stages, their
/// stock, two cabinets and a spread of Ampulario expiries relative to the
/// store clock.
pub fn seed(store: &mut Store) -> Result<()> {
    let now = store.now();
    let today = now.date_naive();

    let mut alpha = Ambulance::new("amb-01", "Alpha 1", "4821-KLM");
    alpha.base = Some("North base".to_string());
    alpha.last_mechanical_review = Some(now - Duration::days(20));
    alpha.last_cleaning = Some(now - Duration::days(19));
    alpha.last_inventory_check = Some(now - Duration::days(19));

    let mut bravo = Ambulance::new("amb-02", "Bravo 2", "7310-PRT");
    bravo.base = Some("North base".to_string());

    let mut charlie = Ambulance::new("amb-03", "Charlie 3", "1957-GHJ");
    charlie.base = Some("South base".to_string());
    charlie.last_inventory_check = Some(now - Duration::days(2));

    store.add_ambulance(alpha)?;
    store.add_ambulance(bravo)?;
    store.add_ambulance(charlie)?;

    // Bravo has never been cleaned this cycle; Charlie is waiting on inventory.
    store.complete_step("amb-02", WorkflowStep::Mechanical)?;
    store.complete_step("amb-03", WorkflowStep::Mechanical)?;
    store.complete_step("amb-03", WorkflowStep::Cleaning)?;

    store.add_space(Space::cabinet("cabinet-a", "Main cabinet"))?;
    store.add_space(Space::cabinet("cabinet-b", "Controlled drugs safe"))?;
    store.add_space(Space::vehicle("amb-01-kit", "Alpha 1 drug kit", "amb-01"))?;

    let consumables = [
        ("amb-01", "Sterile gauze", 40, Some(-3)),
        ("amb-01", "Saline 500 ml", 6, Some(5)),
        ("amb-02", "Nitrile gloves (M)", 100, None),
        ("amb-02", "Burn dressing", 4, Some(60)),
        ("amb-03", "Glucose gel", 3, Some(7)),
    ];
    for (amb, name, quantity, offset) in consumables {
        store.add_consumable(
            amb,
            NewConsumable {
                name: name.to_string(),
                quantity,
                expiry_date: offset.map(|d| today + Duration::days(d)),
            },
        )?;
    }

    let equipment = [
        ("amb-01", "Defibrillator", EquipmentStatus::Operational),
        ("amb-01", "Scoop stretcher", EquipmentStatus::Operational),
        ("amb-02", "Oxygen regulator", EquipmentStatus::NeedsRepair),
        ("amb-03", "Suction unit", EquipmentStatus::Operational),
    ];
    for (amb, name, status) in equipment {
        store.add_equipment(
            amb,
            NewEquipment {
                name: name.to_string(),
                status,
                notes: None,
            },
        )?;
    }

    let stock = [
        ("Adrenaline", "1", "mg", 10, Route::Iv, -1, "cabinet-a"),
        ("Atropine", "1", "mg", 6, Route::Iv, 2, "cabinet-a"),
        ("Amiodarone", "150", "mg", 4, Route::Iv, 120, "cabinet-a"),
        ("Midazolam", "5", "mg", 5, Route::Im, 3, "cabinet-b"),
        ("Morphine", "10", "mg", 5, Route::Sc, 200, "cabinet-b"),
        ("Salbutamol", "5", "mg", 8, Route::Inhaled, 4, "amb-01-kit"),
        ("Naloxone", "0.4", "mg", 3, Route::Intranasal, 90, "amb-01-kit"),
    ];
    let inputs = stock
        .into_iter()
        .map(|(name, dose, unit, quantity, route, offset, space)| MaterialInput {
            name: name.to_string(),
            dose: dose.to_string(),
            unit: unit.to_string(),
            quantity,
            route,
            expiry_date: today + Duration::days(offset),
            space_id: space.to_string(),
        })
        .collect();
    store.import_materials(inputs)?;

    tracing::debug!(revision = store.revision(), "demo fleet seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlertConfig;
    use crate::types::{AlertKind, AlertSource, Stage};

    #[test]
    fn demo_fleet_covers_every_alert_kind() {
        let mut store = Store::new();
        seed(&mut store).unwrap();

        assert_eq!(store.ambulances().len(), 3);
        assert_eq!(store.ambulance("amb-03").unwrap().stage(), Stage::NeedsInventory);

        let alerts = store.alerts(&AlertConfig::default());
        for kind in [
            AlertKind::Expired,
            AlertKind::ExpiringSoon,
            AlertKind::ReviewPending,
            AlertKind::CleaningPending,
        ] {
            assert!(alerts.iter().any(|a| a.kind == kind), "missing {kind}");
        }
        assert!(alerts.iter().any(|a| a.source == AlertSource::Ampulario));
        assert!(alerts.iter().any(|a| a.source == AlertSource::Consumable));
    }
}
