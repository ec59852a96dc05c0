use vf_core::inventory::Inventory;

use crate::{gfx_cache::GraphicsCache, preferences::Preferences};

/// Central application state threaded through every scene.
///
/// Owns the graphics cache, the inventory grid, and the loaded preferences.
pub struct AppState {
    pub gfx_cache: GraphicsCache,
    pub inventory: Inventory,
    pub preferences: Preferences,
}

impl AppState {
    pub fn new(gfx_cache: GraphicsCache, inventory: Inventory, preferences: Preferences) -> Self {
        Self {
            gfx_cache,
            inventory,
            preferences,
        }
    }
}
