//! Demo data for first launch and manual testing.

use super::inventory_model::{Inventory, InventoryResult};
use crate::store::inventory_store::InventoryStore;
use log::info;

const DEMO_PLACE_COUNT: u32 = 7;
const DEMO_DESCRIPTION: &str = "这是一个手机";
const DEMO_ITEMS: &[(&str, u32, u32)] = &[
    ("手机", 100, 100),
    ("毛巾", 100, 200),
    ("打火机", 100, 300),
    ("钱包", 200, 100),
    ("书包", 200, 200),
    ("港币", 200, 300),
];

/// Fills the inventory with cupboards `柜子1..柜子7` holding six items each.
///
/// Returns the number of places created. Existing data is left in place.
pub fn seed_demo<S: InventoryStore>(inventory: &mut Inventory<S>) -> InventoryResult<u32> {
    for index in 1..=DEMO_PLACE_COUNT {
        let place =
            inventory.create_place(&format!("柜子{index}"), &format!("images/{index}.jpg"))?;
        for (name, x, y) in DEMO_ITEMS {
            inventory.create_item(place.id, name, DEMO_DESCRIPTION, *x, *y)?;
        }
    }
    info!(
        "event=seed_demo module=inventory status=ok places={DEMO_PLACE_COUNT} items_per_place={}",
        DEMO_ITEMS.len()
    );
    Ok(DEMO_PLACE_COUNT)
}
