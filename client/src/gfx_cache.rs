use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use sdl2::{
    image::LoadTexture,
    render::{Texture, TextureCreator},
    video::WindowContext,
};

/// Path-keyed texture cache.
///
/// Load failures are cached as `None`, so a missing asset logs one warning
/// and then degrades silently on every following frame instead of hitting
/// the filesystem again.
pub struct GraphicsCache {
    cache: HashMap<PathBuf, Option<Texture>>,
    creator: TextureCreator<WindowContext>,
}

impl GraphicsCache {
    pub fn new(creator: TextureCreator<WindowContext>) -> Self {
        GraphicsCache {
            cache: HashMap::new(),
            creator,
        }
    }

    /// Returns the texture for `path`, loading it on first use.
    ///
    /// Returns `None` when the file is missing or undecodable; callers are
    /// expected to fall back to a drawn placeholder.
    pub fn get_texture(&mut self, path: &Path) -> Option<&mut Texture> {
        if !self.cache.contains_key(path) {
            let loaded = match self.creator.load_texture(path) {
                Ok(texture) => Some(texture),
                Err(e) => {
                    log::warn!("Could not load texture {}: {}", path.display(), e);
                    None
                }
            };
            self.cache.insert(path.to_path_buf(), loaded);
        }

        self.cache.get_mut(path).and_then(|slot| slot.as_mut())
    }
}
