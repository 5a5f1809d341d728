use grillside_core::{
    Cart, CartStore, CatalogSource, ItemSelection, MemoryStorage, MenuData, Storefront,
};
use std::convert::Infallible;

const CATALOG_JSON: &str = r#"{
    "restaurant": {
        "name": "Grillside",
        "phone": "+92 300 5550190",
        "address": "Main Boulevard, Lahore",
        "min_order_amount": 500,
        "avg_prep_time_minutes": 25,
        "is_open": true
    },
    "categories": [
        { "id": "bbq", "name": "BBQ", "icon": "flame" }
    ],
    "items": [
        {
            "id": "malai-boti",
            "category_id": "bbq",
            "name": "Malai Boti",
            "description": "Creamy chicken skewers",
            "price": 550,
            "addons": [
                { "id": "naan", "name": "Naan", "price": 60 }
            ]
        },
        {
            "id": "mutton-karahi",
            "category_id": "bbq",
            "name": "Mutton Karahi",
            "description": "Slow-cooked, priced per kilogram",
            "price": 1200,
            "is_weight_based": true
        }
    ]
}"#;

struct FixtureCatalog;

impl CatalogSource for FixtureCatalog {
    type Error = Infallible;

    fn load_menu(&self) -> Result<MenuData, Self::Error> {
        Ok(MenuData::from_json(CATALOG_JSON).expect("fixture catalog parses"))
    }
}

#[test]
fn cart_survives_a_session_restart() {
    let storage = MemoryStorage::default();

    let mut shop = Storefront::open(&FixtureCatalog, storage.clone()).unwrap();
    let boti = shop
        .add_to_cart(
            "malai-boti",
            ItemSelection {
                quantity: 2,
                addon_ids: vec![String::from("naan")],
                ..ItemSelection::default()
            },
        )
        .unwrap();
    shop.add_to_cart(
        "mutton-karahi",
        ItemSelection {
            quantity: 1,
            weight_kg: Some(1.5),
            special_instructions: Some(String::from("extra spicy")),
            ..ItemSelection::default()
        },
    )
    .unwrap();
    let before = shop.cart().clone();
    drop(shop);

    let reopened = Storefront::open(&FixtureCatalog, storage).unwrap();
    assert_eq!(reopened.cart(), &before);
    assert_eq!(reopened.cart().subtotal(), (550 + 60) * 2 + 1800);
    assert_eq!(reopened.cart().item_count(), 3);
    let line = reopened.cart().find_line(&boti).unwrap();
    assert_eq!(line.menu_item.name, "Malai Boti");
}

#[test]
fn line_ids_never_repeat_across_restarts() {
    let storage = MemoryStorage::default();

    let mut store = CartStore::open(storage.clone());
    let menu = FixtureCatalog.load_menu().unwrap();
    let item = menu.find_item("malai-boti").unwrap().clone();
    let first = store.add_line(item.clone(), 1, None, None, vec![], None);
    store.remove_line(&first);

    // Same configuration re-added in a fresh session must get a fresh id even
    // though the line sequence is empty again.
    let mut reopened = CartStore::open(storage);
    let second = reopened.add_line(item, 1, None, None, vec![], None);
    assert_ne!(first, second);
}

#[test]
fn catalog_edits_do_not_touch_persisted_snapshots() {
    let storage = MemoryStorage::default();

    let mut shop = Storefront::open(&FixtureCatalog, storage.clone()).unwrap();
    let id = shop
        .add_to_cart(
            "malai-boti",
            ItemSelection {
                quantity: 1,
                ..ItemSelection::default()
            },
        )
        .unwrap();
    drop(shop);

    // A later "catalog" with a changed price; the snapshot keeps the price the
    // line was added at.
    struct RepricedCatalog;
    impl CatalogSource for RepricedCatalog {
        type Error = Infallible;
        fn load_menu(&self) -> Result<MenuData, Self::Error> {
            let mut menu = MenuData::from_json(CATALOG_JSON).expect("fixture catalog parses");
            menu.items[0].price = 900;
            Ok(menu)
        }
    }

    let shop = Storefront::open(&RepricedCatalog, storage).unwrap();
    let line = shop.cart().find_line(&id).unwrap();
    assert_eq!(line.menu_item.price, 550);
    assert_eq!(line.total_price, 550);
    assert_eq!(shop.menu().find_item("malai-boti").unwrap().price, 900);
}

#[test]
fn persisted_record_is_stable_json() {
    let mut cart = Cart::new();
    let menu = FixtureCatalog.load_menu().unwrap();
    cart.add_line(
        menu.find_item("mutton-karahi").unwrap().clone(),
        1,
        None,
        Some(0.75),
        vec![],
        None,
    );

    let saved = serde_json::to_string(&cart).unwrap();
    let restored: Cart = serde_json::from_str(&saved).unwrap();
    assert_eq!(restored, cart);
    assert_eq!(restored.subtotal(), 900);
}
