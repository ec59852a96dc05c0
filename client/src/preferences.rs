use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

const PROFILE_FILE_NAME: &str = "voidfallen_profile.json";

/// Minimum window size the client will accept from a profile file.
const MIN_WINDOW_W: u32 = 640;
const MIN_WINDOW_H: u32 = 480;

/// User settings persisted between runs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preferences {
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
        }
    }
}

impl Preferences {
    fn profile_path() -> PathBuf {
        PathBuf::from(PROFILE_FILE_NAME)
    }

    /// Loads preferences from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        let Ok(contents) = fs::read_to_string(Self::profile_path()) else {
            return Self::default();
        };

        match serde_json::from_str::<Preferences>(&contents) {
            Ok(prefs) => prefs.sanitized(),
            Err(e) => {
                log::warn!("Malformed preferences file, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Writes preferences to disk; failure is logged, never fatal.
    pub fn save(&self) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize preferences: {}", e);
                return;
            }
        };

        if let Err(e) = fs::write(Self::profile_path(), json) {
            log::warn!("Could not save preferences: {}", e);
        }
    }

    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.window_width < MIN_WINDOW_W || self.window_height < MIN_WINDOW_H {
            log::warn!(
                "Ignoring implausible window size {}x{} from profile",
                self.window_width,
                self.window_height
            );
            self.window_width = defaults.window_width;
            self.window_height = defaults.window_height;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::Preferences;

    #[test]
    fn round_trips_through_json() {
        let prefs = Preferences {
            window_width: 1024,
            window_height: 768,
        };
        let json = serde_json::to_string(&prefs).unwrap();
        let back: Preferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefs);
    }

    #[test]
    fn sanitized_rejects_tiny_windows() {
        let prefs = Preferences {
            window_width: 10,
            window_height: 10,
        };
        assert_eq!(prefs.sanitized(), Preferences::default());
    }

    #[test]
    fn sanitized_keeps_reasonable_sizes() {
        let prefs = Preferences {
            window_width: 800,
            window_height: 600,
        };
        assert_eq!(prefs.clone().sanitized(), prefs);
    }
}
