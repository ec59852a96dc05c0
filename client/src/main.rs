use std::process;
use std::time::{Duration, Instant};

use sdl2::image::InitFlag;

use vf_core::inventory::Inventory;
use vf_core::types::item::Item;

use crate::gfx_cache::GraphicsCache;
use crate::preferences::Preferences;
use crate::scenes::scene::{SceneManager, SceneType};
use crate::state::AppState;

mod filepaths;
mod font_cache;
mod gfx_cache;
mod preferences;
mod scenes;
mod state;

/// Inventory grid dimensions.
const GRID_ROWS: usize = 3;
const GRID_COLS: usize = 5;

/// Seeds the inventory shown on startup.
fn populate_demo_inventory(inventory: &mut Inventory) {
    let items = [
        ("Sword", "sword_001"),
        ("Shield", "shield_001"),
        ("Potion", "potion_001"),
        ("Key", "key_001"),
        ("Scroll", "scroll_001"),
    ];
    let positions = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1)];

    for ((name, id), (row, col)) in items.into_iter().zip(positions) {
        let icon_path = filepaths::get_item_icon(id);
        let item = if icon_path.is_file() {
            Item::with_icon(name, id, icon_path)
        } else {
            Item::new(name, id)
        };
        if !inventory.add_item(item, row, col) {
            log::warn!("Could not place demo item {} at ({}, {})", name, row, col);
        }
    }

    inventory.select_slot(0, 0);
}

fn main() -> Result<(), String> {
    vf_core::initialize_logger(log::LevelFilter::Info, Some("voidfallen.log")).unwrap_or_else(
        |e| {
            eprintln!("Failed to initialize logger: {}. Exiting.", e);
            process::exit(1);
        },
    );

    let preferences = Preferences::load();

    log::info!("Initializing SDL2 contexts...");
    let sdl_context = sdl2::init()?;
    let _image_context = sdl2::image::init(InitFlag::PNG)?;

    log::info!("Creating window and event pump...");
    let video = sdl_context.video()?;
    let window = video
        .window(
            "Voidfallen",
            preferences.window_width,
            preferences.window_height,
        )
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut event_pump = sdl_context.event_pump()?;

    log::info!("Initializing canvas...");
    let mut canvas = window
        .into_canvas()
        .accelerated()
        .build()
        .map_err(|e| e.to_string())?;

    log::info!("Initializing graphics cache...");
    let gfx_cache = GraphicsCache::new(canvas.texture_creator());

    let mut inventory = Inventory::new(GRID_ROWS, GRID_COLS);
    populate_demo_inventory(&mut inventory);

    let mut app_state = AppState::new(gfx_cache, inventory, preferences);

    let mut scene_manager = SceneManager::new();
    let mut last_frame = Instant::now();

    'running: loop {
        let now = Instant::now();
        let dt = now.duration_since(last_frame);
        last_frame = now;

        for event in event_pump.poll_iter() {
            if let sdl2::event::Event::Quit { .. } = event {
                scene_manager.request_scene_change(SceneType::Exit);
            }

            scene_manager.handle_event(&mut app_state, &event);

            if scene_manager.get_scene() == SceneType::Exit {
                break 'running;
            }
        }

        scene_manager.update(&mut app_state, dt);
        scene_manager.render(&mut app_state, &mut canvas);
        canvas.present();

        if scene_manager.get_scene() == SceneType::Exit {
            break 'running;
        }

        std::thread::sleep(Duration::from_millis(16));
    }

    app_state.preferences.save();

    Ok(())
}
