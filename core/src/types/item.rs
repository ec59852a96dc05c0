use std::path::{Path, PathBuf};

/// A single inventory item.
///
/// Items are immutable after construction. The icon is referenced by path
/// only; the client resolves it to a texture lazily, so a missing or broken
/// icon file degrades to the text fallback instead of poisoning the item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    name: String,
    item_id: String,
    icon_path: Option<PathBuf>,
}

impl Item {
    pub fn new(name: impl Into<String>, item_id: impl Into<String>) -> Self {
        Item {
            name: name.into(),
            item_id: item_id.into(),
            icon_path: None,
        }
    }

    pub fn with_icon(
        name: impl Into<String>,
        item_id: impl Into<String>,
        icon_path: impl Into<PathBuf>,
    ) -> Self {
        Item {
            name: name.into(),
            item_id: item_id.into(),
            icon_path: Some(icon_path.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn icon_path(&self) -> Option<&Path> {
        self.icon_path.as_deref()
    }

    /// First three characters of the name, drawn in a slot when the item has
    /// no usable icon.
    pub fn short_label(&self) -> String {
        self.name.chars().take(3).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Item;

    #[test]
    fn short_label_truncates_to_three_chars() {
        assert_eq!(Item::new("Sword", "sword_001").short_label(), "Swo");
    }

    #[test]
    fn short_label_keeps_short_names_whole() {
        assert_eq!(Item::new("Ax", "ax_001").short_label(), "Ax");
    }

    #[test]
    fn icon_path_defaults_to_none() {
        assert_eq!(Item::new("Key", "key_001").icon_path(), None);
    }

    #[test]
    fn with_icon_stores_path() {
        let item = Item::with_icon("Key", "key_001", "icons/key.png");
        assert_eq!(
            item.icon_path().map(|p| p.to_string_lossy().into_owned()),
            Some("icons/key.png".to_string())
        );
    }
}
