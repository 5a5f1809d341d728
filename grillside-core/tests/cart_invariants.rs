use grillside_core::menu::{ItemAddon, ItemVariation, MenuItem};
use grillside_core::{Cart, line_total};

fn menu_item(id: &str, price: i64, weight_based: bool) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        category_id: String::from("bbq"),
        name: id.to_string(),
        name_urdu: None,
        description: String::from("test dish"),
        description_urdu: None,
        price,
        image: String::new(),
        prep_time_minutes: 20,
        is_available: true,
        is_featured: false,
        is_vegetarian: false,
        is_spicy: false,
        variations: vec![],
        addons: vec![],
        is_weight_based: weight_based,
        upsell_ids: vec![],
    }
}

fn variation(id: &str, adjustment: i64) -> ItemVariation {
    ItemVariation {
        id: id.to_string(),
        name: id.to_string(),
        price_adjustment: adjustment,
        is_available: true,
    }
}

fn addon(id: &str, price: i64) -> ItemAddon {
    ItemAddon {
        id: id.to_string(),
        name: id.to_string(),
        price,
        is_available: true,
    }
}

fn assert_subtotal_matches_lines(cart: &Cart) {
    let expected: i64 = cart.lines().iter().map(|line| line.total_price).sum();
    assert_eq!(cart.subtotal(), expected);
    assert_eq!(cart.total(), expected);
}

#[test]
fn subtotal_invariant_holds_after_every_mutation() {
    let mut cart = Cart::new();
    assert_subtotal_matches_lines(&cart);

    let burger = cart.add_line(
        menu_item("burger", 500, false),
        2,
        Some(variation("double", 100)),
        None,
        vec![addon("cheese", 50)],
        None,
    );
    assert_subtotal_matches_lines(&cart);
    assert_eq!(cart.subtotal(), 1300);

    let karahi = cart.add_line(
        menu_item("karahi", 1200, true),
        1,
        None,
        Some(1.5),
        vec![],
        Some(String::from("less oil")),
    );
    assert_subtotal_matches_lines(&cart);
    assert_eq!(cart.subtotal(), 1300 + 1800);

    cart.update_quantity(&burger, 1);
    assert_subtotal_matches_lines(&cart);
    assert_eq!(cart.subtotal(), 650 + 1800);

    cart.remove_line(&karahi);
    assert_subtotal_matches_lines(&cart);
    assert_eq!(cart.subtotal(), 650);

    cart.update_quantity(&burger, 0);
    assert_subtotal_matches_lines(&cart);
    assert_eq!(cart.subtotal(), 0);
    assert!(cart.is_empty());
}

#[test]
fn line_total_matches_cached_totals_for_each_line() {
    let mut cart = Cart::new();
    cart.add_line(
        menu_item("burger", 500, false),
        3,
        Some(variation("double", 100)),
        None,
        vec![addon("cheese", 50), addon("fries", 120)],
        None,
    );
    cart.add_line(menu_item("karahi", 1200, true), 2, None, Some(0.75), vec![], None);

    for line in cart.lines() {
        let recomputed = line_total(
            &line.menu_item,
            line.quantity,
            line.selected_variation.as_ref(),
            &line.selected_addons,
            line.selected_weight_kg,
        );
        assert_eq!(line.total_price, recomputed);
    }
}

#[test]
fn item_count_sums_quantities_not_lines() {
    let mut cart = Cart::new();
    cart.add_line(menu_item("burger", 500, false), 2, None, None, vec![], None);
    cart.add_line(menu_item("naan", 60, false), 5, None, None, vec![], None);
    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.item_count(), 7);

    cart.clear();
    assert_eq!(cart.item_count(), 0);
    assert_eq!(cart.subtotal(), 0);
}

#[test]
fn identical_adds_stay_independent_lines() {
    let mut cart = Cart::new();
    let first = cart.add_line(
        menu_item("burger", 500, false),
        1,
        Some(variation("double", 100)),
        None,
        vec![addon("cheese", 50)],
        None,
    );
    let second = cart.add_line(
        menu_item("burger", 500, false),
        1,
        Some(variation("double", 100)),
        None,
        vec![addon("cheese", 50)],
        None,
    );

    assert_ne!(first, second);
    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.subtotal(), 650 * 2);

    // Removing one leaves the other intact.
    cart.remove_line(&first);
    assert!(cart.find_line(&second).is_some());
    assert_eq!(cart.subtotal(), 650);
}

#[test]
fn weight_based_example_scenario() {
    let mut cart = Cart::new();
    cart.add_line(menu_item("karahi", 1200, true), 1, None, Some(1.5), vec![], None);
    assert_eq!(cart.subtotal(), 1800);
}

#[test]
fn customization_snapshot_is_immutable_after_add() {
    let mut cart = Cart::new();
    let id = cart.add_line(
        menu_item("burger", 500, false),
        1,
        Some(variation("double", 100)),
        None,
        vec![addon("cheese", 50)],
        Some(String::from("no onions")),
    );
    cart.update_quantity(&id, 4);

    let line = cart.find_line(&id).unwrap();
    assert_eq!(line.selected_variation.as_ref().unwrap().id, "double");
    assert_eq!(line.selected_addons.len(), 1);
    assert_eq!(line.special_instructions.as_deref(), Some("no onions"));
    assert_eq!(line.total_price, 650 * 4);
}
