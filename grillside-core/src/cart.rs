//! Cart state and the persistence-backed cart store.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::menu::{ItemAddon, ItemVariation, MenuItem};
use crate::pricing;
use crate::storage::CartStorage;

/// Fixed store key the cart record persists under.
pub const CART_STORE_KEY: &str = "grillside.cart";

/// Id fragment recorded when no variation was selected.
const NO_VARIATION: &str = "base";
/// Id fragment recorded for items not ordered by weight.
const NO_WEIGHT: &str = "none";

/// One row in the cart: a single add-to-cart action with its customization
/// snapshot. The embedded [`MenuItem`] is a by-value copy so later catalog
/// edits never alter a line that is already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: String,
    pub menu_item: MenuItem,
    pub quantity: i32,
    #[serde(default)]
    pub selected_variation: Option<ItemVariation>,
    #[serde(default)]
    pub selected_weight_kg: Option<f64>,
    #[serde(default)]
    pub selected_addons: SmallVec<[ItemAddon; 4]>,
    #[serde(default)]
    pub special_instructions: Option<String>,
    /// Cached line total; recomputed whenever the quantity changes.
    pub total_price: i64,
}

impl CartLine {
    fn recompute_total(&mut self) {
        self.total_price = pricing::line_total(
            &self.menu_item,
            self.quantity,
            self.selected_variation.as_ref(),
            &self.selected_addons,
            self.selected_weight_kg,
        );
    }
}

/// The client-held shopping cart: an ordered line sequence plus the sequence
/// counter that keeps line ids unique across sessions. This struct is the
/// persisted record, serialized whole on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Cart {
    #[serde(default)]
    lines: Vec<CartLine>,
    #[serde(default)]
    next_line_seq: u64,
}

impl Cart {
    /// Create a new empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current line sequence, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Find a line by id.
    #[must_use]
    pub fn find_line(&self, line_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == line_id)
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append a new line for the given customization and return its id.
    ///
    /// Every call produces an independent line, even for a configuration
    /// identical to an existing one; duplicate adds are distinct orders, not a
    /// quantity bump.
    pub fn add_line(
        &mut self,
        menu_item: MenuItem,
        quantity: i32,
        variation: Option<ItemVariation>,
        weight_kg: Option<f64>,
        addons: Vec<ItemAddon>,
        instructions: Option<String>,
    ) -> String {
        let seq = self.next_line_seq;
        self.next_line_seq += 1;
        let id = compose_line_id(&menu_item, variation.as_ref(), weight_kg, &addons, seq);

        let mut line = CartLine {
            id: id.clone(),
            menu_item,
            quantity,
            selected_variation: variation,
            selected_weight_kg: weight_kg,
            selected_addons: SmallVec::from_vec(addons),
            special_instructions: instructions,
            total_price: 0,
        };
        line.recompute_total();
        self.lines.push(line);
        id
    }

    /// Delete the line with the matching id; no-op if absent.
    pub fn remove_line(&mut self, line_id: &str) {
        self.lines.retain(|line| line.id != line_id);
    }

    /// Replace a line's quantity and recompute its cached total from the
    /// line's own customization snapshot. A quantity of zero or below removes
    /// the line instead. No-op if the id is absent.
    pub fn update_quantity(&mut self, line_id: &str, quantity: i32) {
        if quantity <= 0 {
            self.remove_line(line_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == line_id) {
            line.quantity = quantity;
            line.recompute_total();
        }
    }

    /// Empty the line sequence unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line totals, in rupees.
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.lines.iter().map(|line| line.total_price).sum()
    }

    /// Identical to [`Cart::subtotal`]; delivery fees and taxes are computed
    /// by callers, never inside the cart.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.subtotal()
    }

    /// Sum of quantities across all lines - the cart badge number.
    #[must_use]
    pub fn item_count(&self) -> i32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

fn compose_line_id(
    item: &MenuItem,
    variation: Option<&ItemVariation>,
    weight_kg: Option<f64>,
    addons: &[ItemAddon],
    seq: u64,
) -> String {
    let variation_part = variation.map_or(NO_VARIATION, |v| v.id.as_str());
    let weight_part = weight_kg
        .filter(|w| *w > 0.0)
        .map_or_else(|| String::from(NO_WEIGHT), |w| w.to_string());
    let addons_part = addons
        .iter()
        .map(|a| a.id.as_str())
        .collect::<Vec<_>>()
        .join("+");
    format!("{}:{variation_part}:{weight_part}:{addons_part}#{seq}", item.id)
}

/// The cart store: cart state plus a persistence side effect on every
/// mutation. Reads pass through to the underlying [`Cart`].
///
/// Persistence failures are swallowed so UI callers never see an error path,
/// but they are logged at warn level rather than dropped silently.
pub struct CartStore<S: CartStorage> {
    cart: Cart,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the store, reloading the prior session's cart if one was
    /// persisted. A missing or unreadable record starts an empty cart.
    pub fn open(storage: S) -> Self {
        let cart = match storage.load_cart(CART_STORE_KEY) {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(err) => {
                log::warn!("cart record unreadable, starting empty: {err}");
                Cart::new()
            }
        };
        Self { cart, storage }
    }

    /// The current cart state.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// See [`Cart::add_line`].
    pub fn add_line(
        &mut self,
        menu_item: MenuItem,
        quantity: i32,
        variation: Option<ItemVariation>,
        weight_kg: Option<f64>,
        addons: Vec<ItemAddon>,
        instructions: Option<String>,
    ) -> String {
        let id = self
            .cart
            .add_line(menu_item, quantity, variation, weight_kg, addons, instructions);
        self.persist();
        id
    }

    /// See [`Cart::remove_line`].
    pub fn remove_line(&mut self, line_id: &str) {
        self.cart.remove_line(line_id);
        self.persist();
    }

    /// See [`Cart::update_quantity`].
    pub fn update_quantity(&mut self, line_id: &str, quantity: i32) {
        self.cart.update_quantity(line_id, quantity);
        self.persist();
    }

    /// See [`Cart::clear`].
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Empty the cart and drop the persisted record entirely, rather than
    /// rewriting it as an empty cart. The next session starts from scratch,
    /// sequence counter included.
    pub fn reset(&mut self) {
        self.cart = Cart::new();
        if let Err(err) = self.storage.delete_cart(CART_STORE_KEY) {
            log::warn!("cart delete failed: {err}");
        }
    }

    fn persist(&self) {
        if let Err(err) = self.storage.save_cart(CART_STORE_KEY, &self.cart) {
            log::warn!("cart save failed: {err}");
        }
    }
}
