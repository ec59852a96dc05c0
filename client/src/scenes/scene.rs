use std::{collections::HashMap, time::Duration};

use sdl2::{event::Event, render::Canvas, video::Window};

use crate::state::AppState;

pub trait Scene {
    fn handle_event(&mut self, app_state: &mut AppState, event: &Event) -> Option<SceneType>;

    fn update(&mut self, app_state: &mut AppState, dt: Duration) -> Option<SceneType>;

    fn render(&mut self, app_state: &mut AppState, canvas: &mut Canvas<Window>)
        -> Result<(), String>;
}

#[derive(Hash, Eq, PartialEq, Debug, Copy, Clone)]
pub enum SceneType {
    Inventory,
    Exit,
}

pub struct SceneManager {
    active_scene: SceneType,
    scenes: HashMap<SceneType, Box<dyn Scene>>,
}

impl SceneManager {
    pub fn new() -> Self {
        let mut scene_map: HashMap<SceneType, Box<dyn Scene>> = HashMap::new();

        scene_map.insert(
            SceneType::Inventory,
            Box::new(crate::scenes::inventory::InventoryScene::new()),
        );

        scene_map.insert(
            SceneType::Exit,
            Box::new(crate::scenes::exit::ExitScene::new()),
        );

        SceneManager {
            active_scene: SceneType::Inventory,
            scenes: scene_map,
        }
    }

    pub fn get_scene(&self) -> SceneType {
        self.active_scene
    }

    pub fn handle_event(&mut self, app_state: &mut AppState, event: &Event) {
        if self.active_scene == SceneType::Exit {
            return;
        }

        let possible_next_scene = self
            .scenes
            .get_mut(&self.active_scene)
            .unwrap()
            .handle_event(app_state, event);

        self.apply_scene_change(possible_next_scene);
    }

    pub fn update(&mut self, app_state: &mut AppState, dt: Duration) {
        if self.active_scene == SceneType::Exit {
            return;
        }

        let possible_next_scene = self
            .scenes
            .get_mut(&self.active_scene)
            .unwrap()
            .update(app_state, dt);

        self.apply_scene_change(possible_next_scene);
    }

    pub fn render(&mut self, app_state: &mut AppState, canvas: &mut Canvas<Window>) {
        if self.active_scene == SceneType::Exit {
            return;
        }

        self.scenes
            .get_mut(&self.active_scene)
            .unwrap()
            .render(app_state, canvas)
            .unwrap_or_else(|err| log::error!("Error rendering scene: {}", err));
    }

    pub fn request_scene_change(&mut self, scene_type: SceneType) {
        self.apply_scene_change(Some(scene_type));
    }

    fn set_scene(&mut self, scene_type: SceneType) {
        if self.scenes.contains_key(&scene_type) {
            log::info!("Switching to scene: {:?}", scene_type);
        } else {
            log::error!("Attempted to switch to unknown scene: {:?}", scene_type);
        }
        self.active_scene = scene_type;
    }

    fn apply_scene_change(&mut self, next_scene: Option<SceneType>) {
        let Some(scene) = next_scene else {
            return;
        };

        log::info!("Scene change requested: {:?}", scene);
        self.set_scene(scene);
    }
}
