//! Menu catalog data model and lookup helpers.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pseudo-category id selecting items flagged as featured.
pub const FEATURED_CATEGORY: &str = "featured";

fn default_available() -> bool {
    true
}

/// A mutually-exclusive customization choice (e.g. size) with a price delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemVariation {
    pub id: String,
    pub name: String,
    /// Signed adjustment applied to the base unit price, in rupees.
    pub price_adjustment: i64,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

/// An optional additive extra with a flat price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAddon {
    pub id: String,
    pub name: String,
    /// Flat price in rupees, never scaled by weight or variation.
    pub price: i64,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

/// A single dish on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub name_urdu: Option<String>,
    pub description: String,
    #[serde(default)]
    pub description_urdu: Option<String>,
    /// Price in whole rupees; per kilogram when `is_weight_based` is set.
    pub price: i64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub prep_time_minutes: u32,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_spicy: bool,
    #[serde(default)]
    pub variations: Vec<ItemVariation>,
    #[serde(default)]
    pub addons: Vec<ItemAddon>,
    /// When set, `price` is the rate per kilogram rather than a flat unit price.
    #[serde(default)]
    pub is_weight_based: bool,
    #[serde(default)]
    pub upsell_ids: Vec<String>,
}

impl MenuItem {
    /// Variations currently offered for this item.
    #[must_use]
    pub fn available_variations(&self) -> impl Iterator<Item = &ItemVariation> {
        self.variations.iter().filter(|v| v.is_available)
    }

    /// Addons currently offered for this item.
    #[must_use]
    pub fn available_addons(&self) -> impl Iterator<Item = &ItemAddon> {
        self.addons.iter().filter(|a| a.is_available)
    }

    /// The variation pre-selected by the item detail view.
    #[must_use]
    pub fn default_variation(&self) -> Option<&ItemVariation> {
        self.available_variations().next()
    }

    /// Look up one of this item's variations by id.
    #[must_use]
    pub fn variation(&self, variation_id: &str) -> Option<&ItemVariation> {
        self.variations.iter().find(|v| v.id == variation_id)
    }

    /// Look up one of this item's addons by id.
    #[must_use]
    pub fn addon(&self, addon_id: &str) -> Option<&ItemAddon> {
        self.addons.iter().find(|a| a.id == addon_id)
    }
}

/// Category of dishes on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_urdu: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: String,
}

/// Profile of the single restaurant this storefront sells for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    /// Minimum order subtotal in rupees; checked by callers, never by the cart.
    #[serde(default)]
    pub min_order_amount: i64,
    #[serde(default)]
    pub avg_prep_time_minutes: u32,
    #[serde(default = "default_available")]
    pub is_open: bool,
}

/// Complete menu data structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MenuData {
    #[serde(default)]
    pub restaurant: Option<Restaurant>,
    #[serde(default)]
    pub categories: Vec<MenuCategory>,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl MenuData {
    /// Create empty menu data (useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load menu data from JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid menu data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Find an item by id.
    #[must_use]
    pub fn find_item(&self, item_id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Get all items as a flat map by id.
    #[must_use]
    pub fn items_by_id(&self) -> HashMap<String, &MenuItem> {
        self.items
            .iter()
            .map(|item| (item.id.clone(), item))
            .collect()
    }

    /// Items belonging to a category. The `featured` pseudo-category selects
    /// items carrying the featured flag instead.
    #[must_use]
    pub fn items_in_category(&self, category_id: &str) -> Vec<&MenuItem> {
        if category_id == FEATURED_CATEGORY {
            return self.items.iter().filter(|i| i.is_featured).collect();
        }
        self.items
            .iter()
            .filter(|i| i.category_id == category_id)
            .collect()
    }

    /// Case-insensitive substring search over item name, description, and the
    /// Urdu name when present. A blank query matches nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&MenuItem> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.items
            .iter()
            .filter(|item| {
                item.name.to_lowercase().contains(&query)
                    || item.description.to_lowercase().contains(&query)
                    || item
                        .name_urdu
                        .as_ref()
                        .is_some_and(|n| n.contains(&query))
            })
            .collect()
    }
}
