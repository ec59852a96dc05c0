use std::time::Duration;

use sdl2::{event::Event, render::Canvas, video::Window};

use crate::scenes::scene::{Scene, SceneType};
use crate::state::AppState;

/// Terminal scene; the main loop exits as soon as it becomes active.
pub struct ExitScene;

impl ExitScene {
    pub fn new() -> Self {
        ExitScene
    }
}

impl Scene for ExitScene {
    fn handle_event(&mut self, _app_state: &mut AppState, _event: &Event) -> Option<SceneType> {
        None
    }

    fn update(&mut self, _app_state: &mut AppState, _dt: Duration) -> Option<SceneType> {
        None
    }

    fn render(
        &mut self,
        _app_state: &mut AppState,
        _canvas: &mut Canvas<Window>,
    ) -> Result<(), String> {
        Ok(())
    }
}
