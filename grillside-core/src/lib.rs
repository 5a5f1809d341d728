//! Grillside Storefront Core
//!
//! Platform-agnostic storefront logic for the Grillside single-restaurant
//! ordering site: menu catalog, cart pricing and state, and the simulated
//! checkout flow. This crate carries no UI and no platform-specific
//! dependencies; catalog loading and cart persistence are abstracted behind
//! traits so a web front end, a server renderer, or a test harness can all
//! drive the same state objects.

pub mod cart;
pub mod checkout;
pub mod menu;
pub mod numbers;
pub mod pricing;
pub mod storage;

// Re-export commonly used types
pub use cart::{CART_STORE_KEY, Cart, CartLine, CartStore};
pub use checkout::{
    CheckoutError, CheckoutFlow, CheckoutStep, CustomerDetails, DELIVERY_FEE, OrderConfirmation,
    OrderTotals, PaymentMethod, delivery_fee, meets_minimum_order, order_number,
};
pub use menu::{
    FEATURED_CATEGORY, ItemAddon, ItemVariation, MenuCategory, MenuData, MenuItem, Restaurant,
};
pub use pricing::{MIN_WEIGHT_KG, line_total};
pub use storage::{CartStorage, MemoryStorage};

use thiserror::Error;

/// Trait for abstracting catalog loading.
/// Platform-specific implementations should provide this.
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the menu data from the platform-specific source.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu data cannot be loaded or parsed.
    fn load_menu(&self) -> Result<MenuData, Self::Error>;
}

/// The customization picked in the item detail view, by id. Resolved against
/// the catalog when the item is added to the cart.
#[derive(Debug, Clone, Default)]
pub struct ItemSelection {
    pub quantity: i32,
    pub variation_id: Option<String>,
    pub weight_kg: Option<f64>,
    pub addon_ids: Vec<String>,
    pub special_instructions: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorefrontError {
    #[error("unknown menu item: {0}")]
    UnknownItem(String),
    #[error("item {item} has no variation {variation}")]
    UnknownVariation { item: String, variation: String },
    #[error("item {item} has no addon {addon}")]
    UnknownAddon { item: String, addon: String },
}

/// One storefront session: the loaded catalog plus the persistence-backed
/// cart store. Owned and injected rather than global, so tests and multiple
/// concurrent sessions stay isolated.
pub struct Storefront<S: CartStorage> {
    menu: MenuData,
    cart: CartStore<S>,
}

impl<S: CartStorage> Storefront<S> {
    /// Open a session: load the catalog and reload any persisted cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn open<L: CatalogSource>(catalog: &L, storage: S) -> Result<Self, L::Error> {
        let menu = catalog.load_menu()?;
        Ok(Self {
            menu,
            cart: CartStore::open(storage),
        })
    }

    /// The loaded menu catalog.
    #[must_use]
    pub fn menu(&self) -> &MenuData {
        &self.menu
    }

    /// The current cart state.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        self.cart.cart()
    }

    /// The mutable cart store, for quantity updates and removals.
    pub fn cart_store(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    /// Order totals for the current cart.
    #[must_use]
    pub fn order_totals(&self) -> OrderTotals {
        OrderTotals::from_subtotal(self.cart().subtotal())
    }

    /// Resolve a selection against the catalog and add it to the cart,
    /// returning the new line id. The added line embeds a snapshot of the
    /// menu item as it is right now. Weights below the UI floor are raised to
    /// [`MIN_WEIGHT_KG`], matching the item detail input.
    ///
    /// # Errors
    ///
    /// Returns an error naming the unknown item, variation, or addon id; the
    /// cart is untouched on error.
    pub fn add_to_cart(
        &mut self,
        item_id: &str,
        selection: ItemSelection,
    ) -> Result<String, StorefrontError> {
        let item = self
            .menu
            .find_item(item_id)
            .ok_or_else(|| StorefrontError::UnknownItem(item_id.to_string()))?;

        let variation = match &selection.variation_id {
            Some(variation_id) => Some(
                item.variation(variation_id)
                    .cloned()
                    .ok_or_else(|| StorefrontError::UnknownVariation {
                        item: item_id.to_string(),
                        variation: variation_id.clone(),
                    })?,
            ),
            None => None,
        };

        let mut addons = Vec::with_capacity(selection.addon_ids.len());
        for addon_id in &selection.addon_ids {
            let addon = item.addon(addon_id).cloned().ok_or_else(|| {
                StorefrontError::UnknownAddon {
                    item: item_id.to_string(),
                    addon: addon_id.clone(),
                }
            })?;
            addons.push(addon);
        }

        let weight_kg = if item.is_weight_based {
            selection.weight_kg.map(|w| w.max(MIN_WEIGHT_KG))
        } else {
            None
        };

        let snapshot = item.clone();
        Ok(self.cart.add_line(
            snapshot,
            selection.quantity,
            variation,
            weight_kg,
            addons,
            selection.special_instructions,
        ))
    }
}
