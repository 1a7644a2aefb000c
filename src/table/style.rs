use std::collections::HashMap;

/// Visual configuration for one group header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupStyle {
    pub label: String,
    pub icon: String,
    pub color: String,
}

impl GroupStyle {
    pub fn new(
        label: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        GroupStyle {
            label: label.into(),
            icon: icon.into(),
            color: color.into(),
        }
    }
}

impl Default for GroupStyle {
    /// Neutral style for group keys nobody registered.
    fn default() -> Self {
        GroupStyle::new("Other", "circle", "#9e9e9e")
    }
}

/// Registry mapping group keys to their visual configuration.
///
/// Lookups for unregistered keys return the fallback style instead of
/// failing, so a new category value coming from the backend renders with a
/// neutral header rather than breaking the table.
#[derive(Clone, Debug, Default)]
pub struct GroupStyles {
    known: HashMap<String, GroupStyle>,
    fallback: GroupStyle,
}

impl GroupStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(fallback: GroupStyle) -> Self {
        GroupStyles {
            known: HashMap::new(),
            fallback,
        }
    }

    pub fn register(mut self, key: impl Into<String>, style: GroupStyle) -> Self {
        self.known.insert(key.into(), style);
        self
    }

    pub fn style_for(&self, key: &str) -> &GroupStyle {
        self.known.get(key).unwrap_or(&self.fallback)
    }

    pub fn is_known(&self, key: &str) -> bool {
        self.known.contains_key(key)
    }
}
