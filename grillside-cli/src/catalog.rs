//! Demo catalog embedded into the binary.

use grillside_core::{CatalogSource, MenuData};

/// Load menu data from the JSON shipped in `assets/`.
pub struct EmbeddedCatalog;

impl CatalogSource for EmbeddedCatalog {
    type Error = serde_json::Error;

    fn load_menu(&self) -> Result<MenuData, Self::Error> {
        MenuData::from_json(include_str!("../assets/menu.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses() {
        let menu = EmbeddedCatalog.load_menu().expect("menu data");
        assert!(!menu.categories.is_empty());
        assert!(!menu.items.is_empty());
        assert!(menu.restaurant.is_some());
    }

    #[test]
    fn every_item_belongs_to_a_declared_category() {
        let menu = EmbeddedCatalog.load_menu().expect("menu data");
        for item in &menu.items {
            assert!(
                menu.categories.iter().any(|c| c.id == item.category_id),
                "item {} references unknown category {}",
                item.id,
                item.category_id
            );
        }
    }

    #[test]
    fn upsell_ids_resolve() {
        let menu = EmbeddedCatalog.load_menu().expect("menu data");
        for item in &menu.items {
            for upsell in &item.upsell_ids {
                assert!(
                    menu.find_item(upsell).is_some(),
                    "item {} upsells unknown item {upsell}",
                    item.id
                );
            }
        }
    }
}
