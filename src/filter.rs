use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};

/// Which elements count as layout noise (navigation, ads, cookie banners...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseFilterConfig {
    /// Tag names whose whole subtree is dropped
    #[serde(default = "default_noise_tags")]
    pub tags: Vec<String>,

    /// Class names whose whole subtree is dropped
    #[serde(default = "default_noise_classes")]
    pub classes: Vec<String>,
}

fn default_noise_tags() -> Vec<String> {
    ["script", "style", "noscript", "nav", "header", "footer", "aside"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_noise_classes() -> Vec<String> {
    [
        "sidebar",
        "menu",
        "navbar",
        "breadcrumbs",
        "advert",
        "ads",
        "cookie",
        "cookies",
        "share",
        "social",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for NoiseFilterConfig {
    fn default() -> Self {
        Self {
            tags: default_noise_tags(),
            classes: default_noise_classes(),
        }
    }
}

/// Compiled noise matcher. Never edits the document: callers ask whether an
/// element is noise and leave it out of whatever view they build.
#[derive(Debug)]
pub struct NoiseFilter {
    selector: Option<Selector>,
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::new(&NoiseFilterConfig::default()).expect("Default noise selectors should be valid")
    }
}

impl NoiseFilter {
    /// Compile the configured tags and classes into one selector group
    pub fn new(config: &NoiseFilterConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let parts: Vec<String> = config
            .tags
            .iter()
            .map(|tag| tag.trim().to_string())
            .chain(config.classes.iter().map(|class| format!(".{}", class.trim())))
            .filter(|part| !part.is_empty() && part != ".")
            .collect();

        let selector = if parts.is_empty() {
            None
        } else {
            let group = parts.join(", ");
            let compiled = Selector::parse(&group)
                .map_err(|e| format!("invalid noise selector '{}': {}", group, e))?;
            Some(compiled)
        };

        Ok(Self { selector })
    }

    /// Whether this element itself is noise
    pub fn is_noise(&self, element: &ElementRef) -> bool {
        match &self.selector {
            Some(selector) => selector.matches(element),
            None => false,
        }
    }

    /// Whether this element or any ancestor is noise
    pub fn is_within_noise(&self, element: &ElementRef) -> bool {
        if self.is_noise(element) {
            return true;
        }
        element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| self.is_noise(&ancestor))
    }
}
