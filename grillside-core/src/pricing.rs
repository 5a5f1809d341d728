//! Line-total pricing rules shared by the item detail view and the cart.

use crate::menu::{ItemAddon, ItemVariation, MenuItem};
use crate::numbers::{i64_to_f64, round_f64_to_i64};

/// Smallest weight the UI offers for weight-based items, in kilograms.
pub const MIN_WEIGHT_KG: f64 = 0.25;

/// Compute the total for one cart line in rupees.
///
/// The base price is the item's unit price, or the per-kilogram rate times the
/// supplied weight for weight-based items. The variation adjustment and the
/// flat addon prices are applied once per unit; addons are never scaled by
/// weight. The adjusted unit total is floored at zero so a misconfigured
/// negative variation cannot produce a negative line total.
#[must_use]
pub fn line_total(
    item: &MenuItem,
    quantity: i32,
    variation: Option<&ItemVariation>,
    addons: &[ItemAddon],
    weight_kg: Option<f64>,
) -> i64 {
    let variation_adjustment = variation.map_or(0, |v| v.price_adjustment);
    let addons_total: i64 = addons.iter().map(|a| a.price).sum();

    let base_price = match weight_kg.filter(|w| *w > 0.0) {
        Some(weight) if item.is_weight_based => round_f64_to_i64(i64_to_f64(item.price) * weight),
        _ => item.price,
    };

    let unit_total = (base_price + variation_adjustment + addons_total).max(0);
    unit_total * i64::from(quantity)
}
