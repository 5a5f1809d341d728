//! Terminal rendering for menu listings and the cart.

use colored::Colorize;
use grillside_core::{Cart, CartLine, MenuData, MenuItem, OrderTotals, Restaurant};

/// Format a rupee amount with thousands separators, e.g. `Rs 1,300`.
#[must_use]
pub fn format_rupees(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-Rs {grouped}")
    } else {
        format!("Rs {grouped}")
    }
}

fn item_flags(item: &MenuItem) -> String {
    let mut flags = Vec::new();
    if item.is_featured {
        flags.push("featured".yellow().to_string());
    }
    if item.is_vegetarian {
        flags.push("veg".green().to_string());
    }
    if item.is_spicy {
        flags.push("spicy".red().to_string());
    }
    if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    }
}

fn item_price_tag(item: &MenuItem) -> String {
    if item.is_weight_based {
        format!("{}/kg", format_rupees(item.price))
    } else {
        format_rupees(item.price)
    }
}

pub fn print_restaurant(restaurant: &Restaurant) {
    let status = if restaurant.is_open {
        "open".green()
    } else {
        "closed".red()
    };
    println!(
        "{} ({status}) - min order {}, avg prep {} min",
        restaurant.name.bold(),
        format_rupees(restaurant.min_order_amount),
        restaurant.avg_prep_time_minutes
    );
    println!("{}", restaurant.address.dimmed());
    println!();
}

pub fn print_item_row(item: &MenuItem) {
    println!(
        "  {:<18} {:<28} {:>12}{}",
        item.id.cyan(),
        item.name,
        item_price_tag(item),
        item_flags(item)
    );
}

pub fn print_menu(menu: &MenuData, items: &[&MenuItem]) {
    for category in &menu.categories {
        let in_category: Vec<&&MenuItem> = items
            .iter()
            .filter(|i| i.category_id == category.id)
            .collect();
        if in_category.is_empty() {
            continue;
        }
        println!("{}", category.name.bold().underline());
        for item in in_category {
            print_item_row(item);
        }
        println!();
    }
}

pub fn print_item_detail(item: &MenuItem) {
    println!("{}  {}", item.name.bold(), item_price_tag(item).green());
    if let Some(urdu) = &item.name_urdu {
        println!("{urdu}");
    }
    println!("{}", item.description);
    println!("prep time: {} min{}", item.prep_time_minutes, item_flags(item));

    if item.is_weight_based {
        println!(
            "\nOrdered by weight; minimum {} kg.",
            grillside_core::MIN_WEIGHT_KG
        );
    }
    if !item.variations.is_empty() {
        println!("\n{}", "Variations".bold());
        for variation in &item.variations {
            let delta = if variation.price_adjustment >= 0 {
                format!("+{}", format_rupees(variation.price_adjustment))
            } else {
                format_rupees(variation.price_adjustment)
            };
            println!("  {:<12} {:<16} {delta}", variation.id.cyan(), variation.name);
        }
    }
    if !item.addons.is_empty() {
        println!("\n{}", "Addons".bold());
        for addon in &item.addons {
            println!(
                "  {:<12} {:<16} +{}",
                addon.id.cyan(),
                addon.name,
                format_rupees(addon.price)
            );
        }
    }
}

fn describe_line(line: &CartLine) -> String {
    let mut parts = Vec::new();
    if let Some(variation) = &line.selected_variation {
        parts.push(variation.name.clone());
    }
    if let Some(weight) = line.selected_weight_kg {
        parts.push(format!("{weight} kg"));
    }
    for addon in &line.selected_addons {
        parts.push(format!("+ {}", addon.name));
    }
    if let Some(notes) = &line.special_instructions {
        parts.push(format!("\"{notes}\""));
    }
    parts.join(", ")
}

pub fn print_cart(cart: &Cart, totals: OrderTotals) {
    if cart.is_empty() {
        println!("{}", "Your cart is empty.".dimmed());
        return;
    }
    for line in cart.lines() {
        println!(
            "  {} {:>2}x {:<24} {:>12}",
            line.id.dimmed(),
            line.quantity,
            line.menu_item.name,
            format_rupees(line.total_price)
        );
        let detail = describe_line(line);
        if !detail.is_empty() {
            println!("       {}", detail.dimmed());
        }
    }
    println!();
    println!("  {:<10} {:>12}", "Subtotal", format_rupees(totals.subtotal));
    println!(
        "  {:<10} {:>12}",
        "Delivery",
        format_rupees(totals.delivery_fee)
    );
    println!(
        "  {:<10} {:>12}",
        "Total".bold(),
        format_rupees(totals.total).bold()
    );
    println!(
        "  {}",
        format!("{} item(s) in cart", cart.item_count()).dimmed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupee_formatting_groups_thousands() {
        assert_eq!(format_rupees(0), "Rs 0");
        assert_eq!(format_rupees(999), "Rs 999");
        assert_eq!(format_rupees(1300), "Rs 1,300");
        assert_eq!(format_rupees(1_234_567), "Rs 1,234,567");
        assert_eq!(format_rupees(-150), "-Rs 150");
    }
}
