use super::ConfigError;
use super::config::RenderConfig;
use super::content::ContentItem;
use super::loader::load_template;

/// Every content item of a page, in paint order.
///
/// Loaded once and never mutated afterwards; share it by reference or
/// `Arc` between concurrent renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateSet {
    items: Vec<ContentItem>,
}

impl TemplateSet {
    /// Load all layers of `config`. Fails on the first unreadable or malformed file.
    pub fn load(config: &RenderConfig) -> Result<Self, ConfigError> {
        let mut set = Self::default();
        for layer in &config.layers {
            set.items.extend(load_template(&layer.path, layer.kind)?);
        }
        log::info!(
            "template set ready: {} item(s) from {} layer(s)",
            set.items.len(),
            config.layers.len()
        );
        Ok(set)
    }

    /// A set from already parsed items, e.g. test fixtures.
    pub fn from_items(items: Vec<ContentItem>) -> Self {
        Self { items }
    }

    /// Append a layer, painted above everything already in the set.
    pub fn with_layer(mut self, items: Vec<ContentItem>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
