use std::time::Duration;

use sdl2::{
    event::Event,
    keyboard::Keycode,
    mouse::MouseButton,
    pixels::Color,
    rect::Rect,
    render::Canvas,
    video::Window,
};

use vf_core::inventory::Inventory;

use crate::{
    filepaths, font_cache,
    gfx_cache::GraphicsCache,
    scenes::scene::{Scene, SceneType},
    state::AppState,
};

// ---- Layout constants ---- //

const SLOT_W: u32 = 80;
const SLOT_H: u32 = 80;
const GRID_PADDING: i32 = 20;
const GRID_START_X: i32 = 100;
const GRID_START_Y: i32 = 100;

/// Item icons are drawn smaller than the slot and centered in it.
const ICON_SIZE: u32 = 60;

const TITLE_Y: i32 = 40;
const COUNT_Y: i32 = 70;
const SELECTED_INFO_BOTTOM_MARGIN: i32 = 50;

/// Fill used when the background image is missing.
const BACKGROUND_FILL: Color = Color::RGB(30, 30, 30);
const SLOT_FILL: Color = Color::RGB(50, 50, 50);
const SLOT_BORDER: Color = Color::RGB(100, 100, 100);
/// Highlight used when the selection image is missing.
const SELECTED_BORDER: Color = Color::RGB(255, 200, 0);

const TITLE_COLOR: Color = Color::RGB(255, 255, 255);
const SUMMARY_COLOR: Color = Color::RGB(200, 200, 200);
const LABEL_COLOR: Color = Color::RGB(200, 200, 200);
const SELECTED_INFO_COLOR: Color = Color::RGB(100, 200, 255);

/// Screen rectangle of the slot at `(row, col)`.
fn slot_rect(row: usize, col: usize) -> Rect {
    let x = GRID_START_X + col as i32 * (SLOT_W as i32 + GRID_PADDING);
    let y = GRID_START_Y + row as i32 * (SLOT_H as i32 + GRID_PADDING);
    Rect::new(x, y, SLOT_W, SLOT_H)
}

/// Maps a pointer position to the slot whose rectangle contains it.
///
/// Slots are tested in row-major order and the first hit wins; a point in
/// the padding between slots maps to nothing.
fn slot_at_point(inventory: &Inventory, x: i32, y: i32) -> Option<(usize, usize)> {
    for row in 0..inventory.rows() {
        for col in 0..inventory.cols() {
            if slot_rect(row, col).contains_point((x, y)) {
                return Some((row, col));
            }
        }
    }
    None
}

/// Draws a `thickness`-pixel border as nested one-pixel rectangles.
fn draw_border(canvas: &mut Canvas<Window>, rect: Rect, thickness: u32) -> Result<(), String> {
    for i in 0..thickness as i32 {
        let w = rect.width() as i32 - 2 * i;
        let h = rect.height() as i32 - 2 * i;
        if w <= 0 || h <= 0 {
            break;
        }
        canvas.draw_rect(Rect::new(rect.x() + i, rect.y() + i, w as u32, h as u32))?;
    }
    Ok(())
}

/// The inventory screen: grid, icons, selection highlight, summary text.
pub struct InventoryScene;

impl InventoryScene {
    pub fn new() -> Self {
        InventoryScene
    }

    fn draw_background(
        canvas: &mut Canvas<Window>,
        gfx_cache: &mut GraphicsCache,
    ) -> Result<(), String> {
        let bg_path = filepaths::get_inventory_background();
        match gfx_cache.get_texture(&bg_path) {
            // A `None` destination stretches the image over the whole canvas.
            Some(texture) => canvas.copy(texture, None, None)?,
            None => {
                canvas.set_draw_color(BACKGROUND_FILL);
                canvas.clear();
            }
        }
        Ok(())
    }

    fn draw_grid(
        canvas: &mut Canvas<Window>,
        gfx_cache: &mut GraphicsCache,
        inventory: &Inventory,
    ) -> Result<(), String> {
        let selected_path = filepaths::get_selected_item_image();

        for row in 0..inventory.rows() {
            for col in 0..inventory.cols() {
                let rect = slot_rect(row, col);

                if inventory.selected_slot() == Some((row, col)) {
                    match gfx_cache.get_texture(&selected_path) {
                        Some(texture) => canvas.copy(texture, None, Some(rect))?,
                        None => {
                            canvas.set_draw_color(SELECTED_BORDER);
                            draw_border(canvas, rect, 3)?;
                        }
                    }
                } else {
                    canvas.set_draw_color(SLOT_FILL);
                    canvas.fill_rect(rect)?;
                    canvas.set_draw_color(SLOT_BORDER);
                    draw_border(canvas, rect, 2)?;
                }
            }
        }
        Ok(())
    }

    fn draw_items(
        canvas: &mut Canvas<Window>,
        gfx_cache: &mut GraphicsCache,
        inventory: &Inventory,
    ) -> Result<(), String> {
        for row in 0..inventory.rows() {
            for col in 0..inventory.cols() {
                let Some(item) = inventory.item_at(row, col) else {
                    continue;
                };
                let rect = slot_rect(row, col);

                let mut drew_icon = false;
                if let Some(icon_path) = item.icon_path() {
                    if let Some(texture) = gfx_cache.get_texture(icon_path) {
                        let dst = Rect::new(
                            rect.x() + ((SLOT_W - ICON_SIZE) / 2) as i32,
                            rect.y() + ((SLOT_H - ICON_SIZE) / 2) as i32,
                            ICON_SIZE,
                            ICON_SIZE,
                        );
                        canvas.copy(texture, None, Some(dst))?;
                        drew_icon = true;
                    }
                }

                if !drew_icon {
                    font_cache::draw_text_centered(
                        canvas,
                        gfx_cache,
                        &item.short_label(),
                        rect.x() + (SLOT_W / 2) as i32,
                        rect.y() + ((SLOT_H - font_cache::BITMAP_GLYPH_H) / 2) as i32,
                        LABEL_COLOR,
                    )?;
                }
            }
        }
        Ok(())
    }

    fn draw_summary(
        canvas: &mut Canvas<Window>,
        gfx_cache: &mut GraphicsCache,
        inventory: &Inventory,
        window_height: u32,
    ) -> Result<(), String> {
        font_cache::draw_text(canvas, gfx_cache, "INVENTORY", GRID_START_X, TITLE_Y, TITLE_COLOR)?;

        let count = format!("Items: {}/{}", inventory.len(), inventory.capacity());
        font_cache::draw_text(canvas, gfx_cache, &count, GRID_START_X, COUNT_Y, SUMMARY_COLOR)?;

        if let Some(item) = inventory.selected_item() {
            let info = format!("Selected: {}", item.name());
            font_cache::draw_text(
                canvas,
                gfx_cache,
                &info,
                GRID_START_X,
                window_height as i32 - SELECTED_INFO_BOTTOM_MARGIN,
                SELECTED_INFO_COLOR,
            )?;
        }
        Ok(())
    }
}

impl Scene for InventoryScene {
    fn handle_event(&mut self, app_state: &mut AppState, event: &Event) -> Option<SceneType> {
        match event {
            Event::KeyDown {
                keycode: Some(Keycode::Escape),
                ..
            } => Some(SceneType::Exit),
            Event::MouseButtonDown {
                mouse_btn: MouseButton::Left,
                x,
                y,
                ..
            } => {
                if let Some((row, col)) = slot_at_point(&app_state.inventory, *x, *y) {
                    app_state.inventory.select_slot(row, col);
                }
                None
            }
            _ => None,
        }
    }

    fn update(&mut self, _app_state: &mut AppState, _dt: Duration) -> Option<SceneType> {
        None
    }

    fn render(
        &mut self,
        app_state: &mut AppState,
        canvas: &mut Canvas<Window>,
    ) -> Result<(), String> {
        let (_, window_height) = canvas.output_size()?;
        let AppState {
            gfx_cache,
            inventory,
            ..
        } = app_state;

        Self::draw_background(canvas, gfx_cache)?;
        Self::draw_grid(canvas, gfx_cache, inventory)?;
        Self::draw_items(canvas, gfx_cache, inventory)?;
        Self::draw_summary(canvas, gfx_cache, inventory, window_height)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Inventory {
        Inventory::new(3, 5)
    }

    #[test]
    fn slot_rect_origin() {
        let rect = slot_rect(0, 0);
        assert_eq!((rect.x(), rect.y()), (GRID_START_X, GRID_START_Y));
        assert_eq!((rect.width(), rect.height()), (SLOT_W, SLOT_H));
    }

    #[test]
    fn slot_rect_advances_by_slot_plus_padding() {
        let rect = slot_rect(1, 2);
        assert_eq!(rect.x(), GRID_START_X + 2 * (SLOT_W as i32 + GRID_PADDING));
        assert_eq!(rect.y(), GRID_START_Y + (SLOT_H as i32 + GRID_PADDING));
    }

    #[test]
    fn point_inside_first_slot_hits_it() {
        assert_eq!(slot_at_point(&grid(), 100, 100), Some((0, 0)));
        assert_eq!(slot_at_point(&grid(), 179, 179), Some((0, 0)));
    }

    #[test]
    fn point_in_padding_hits_nothing() {
        // Between slot (0,0) and (0,1): x in 180..200.
        assert_eq!(slot_at_point(&grid(), 185, 105), None);
    }

    #[test]
    fn point_in_second_column_hits_it() {
        assert_eq!(slot_at_point(&grid(), 205, 105), Some((0, 1)));
    }

    #[test]
    fn point_in_last_slot_hits_it() {
        let rect = slot_rect(2, 4);
        assert_eq!(
            slot_at_point(&grid(), rect.x() + 1, rect.y() + 1),
            Some((2, 4))
        );
    }

    #[test]
    fn point_outside_grid_hits_nothing() {
        assert_eq!(slot_at_point(&grid(), 0, 0), None);
        assert_eq!(slot_at_point(&grid(), 5000, 5000), None);
    }
}
