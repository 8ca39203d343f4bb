use serde::{Deserialize, Serialize};

/// The catch-all category. Always recognized, even when a configured
/// catalog leaves it out.
pub const OTHER_CATEGORY: &str = "Other";

const DEFAULT_CATEGORIES: &[&str] = &[
    "Succulent",
    "Cactus",
    "Fern",
    "Ornamental Grass",
    "Flowering Plant",
    "Herb",
    "Shrub",
    "Tree",
    "Indoor Plant",
    "Vine/Climber",
    "Aquatic Plant",
    OTHER_CATEGORY,
];

const DEFAULT_SUNLIGHT: &[&str] = &["Full Sun", "Partial Sun / Partial Shade", "Shade / Low Light"];

/// Recognized plant categories and sunlight options.
///
/// Lookups are case-insensitive and return the catalog's own spelling, so
/// `"succulent"` resolves to `"Succulent"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<String>,
    pub sunlight_options: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            sunlight_options: DEFAULT_SUNLIGHT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Catalog {
    /// Resolve a plant category to its canonical spelling.
    pub fn resolve_category(&self, input: &str) -> Option<String> {
        let input = input.trim();
        if input.eq_ignore_ascii_case(OTHER_CATEGORY) {
            return Some(OTHER_CATEGORY.to_string());
        }
        find_ignore_case(&self.categories, input)
    }

    /// Resolve a sunlight option. Blank input resolves to an empty string.
    pub fn resolve_sunlight(&self, input: &str) -> Option<String> {
        let input = input.trim();
        if input.is_empty() {
            return Some(String::new());
        }
        find_ignore_case(&self.sunlight_options, input)
    }
}

fn find_ignore_case(options: &[String], input: &str) -> Option<String> {
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(input))
        .cloned()
}
