use std::path::PathBuf;

/// Returns the base asset directory for the game.
///
/// When `CARGO_MANIFEST_DIR` is set (i.e. during a `cargo run`), the path is
/// resolved relative to the workspace. Otherwise it falls back to a path
/// relative to the current working directory.
///
/// # Returns
/// * `PathBuf` pointing to `game_assets/`.
fn get_asset_directory() -> PathBuf {
    let directory: PathBuf;
    if std::env::var("CARGO_MANIFEST_DIR").is_ok() {
        directory = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("game_assets");
    } else {
        directory = PathBuf::from(".").join("game_assets");
    }
    directory
}

/// Returns the path to the inventory screen background image.
pub fn get_inventory_background() -> PathBuf {
    get_asset_directory()
        .join("GUI")
        .join("Inventory_background.png")
}

/// Returns the path to the selected-slot highlight image.
pub fn get_selected_item_image() -> PathBuf {
    get_asset_directory().join("GUI").join("Selected_item.png")
}

/// Returns the path to the ASCII bitmap font sheet.
pub fn get_font_sheet() -> PathBuf {
    get_asset_directory().join("GUI").join("font.png")
}

/// Returns the icon path for an item id (`game_assets/items/<id>.png`).
pub fn get_item_icon(item_id: &str) -> PathBuf {
    get_asset_directory()
        .join("items")
        .join(format!("{}.png", item_id))
}
