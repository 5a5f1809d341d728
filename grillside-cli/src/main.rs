mod catalog;
mod render;
mod storage;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use grillside_core::{
    CheckoutFlow, CustomerDetails, ItemSelection, MenuItem, PaymentMethod, Storefront, checkout,
    meets_minimum_order,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use catalog::EmbeddedCatalog;
use render::{format_rupees, print_cart, print_item_detail, print_menu, print_restaurant};
use storage::JsonFileStorage;

#[derive(Debug, Parser)]
#[command(name = "grillside", version)]
#[command(about = "Headless Grillside storefront - browse the menu, build a cart, and run the simulated checkout")]
struct Args {
    /// Directory the cart record is persisted in
    #[arg(long, global = true, default_value = ".grillside")]
    data_dir: PathBuf,

    /// Seed for deterministic order numbers
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the menu, optionally filtered by category or search query
    Menu {
        /// Category id, or "featured" for the featured selection
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive search over names and descriptions
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one item with its variations and addons
    Item { item_id: String },
    /// Add an item to the cart
    Add {
        item_id: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: i32,
        /// Variation id (see `item`)
        #[arg(long)]
        variation: Option<String>,
        /// Weight in kilograms, for weight-based items
        #[arg(long)]
        weight: Option<f64>,
        /// Addon id; repeat for several
        #[arg(long = "addon")]
        addons: Vec<String>,
        /// Special instructions for the kitchen
        #[arg(long)]
        note: Option<String>,
    },
    /// Show the cart with totals
    Cart,
    /// Remove a line from the cart
    Remove { line_id: String },
    /// Change a line's quantity; 0 removes the line
    Update { line_id: String, quantity: i32 },
    /// Empty the cart and drop its persisted record
    Clear,
    /// Run a scripted demo order against the embedded catalog
    Demo,
    /// Run the simulated checkout for the current cart
    Checkout {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
        /// Delivery notes
        #[arg(long)]
        note: Option<String>,
        #[arg(long, value_enum, default_value_t = PaymentArg::Cod)]
        payment: PaymentArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaymentArg {
    /// Cash on delivery
    Cod,
    /// Credit/debit card
    Card,
    /// Bank transfer
    Transfer,
}

impl From<PaymentArg> for PaymentMethod {
    fn from(arg: PaymentArg) -> Self {
        match arg {
            PaymentArg::Cod => Self::CashOnDelivery,
            PaymentArg::Card => Self::Card,
            PaymentArg::Transfer => Self::BankTransfer,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    let storage = JsonFileStorage::new(&args.data_dir);
    let mut shop =
        Storefront::open(&EmbeddedCatalog, storage).context("failed to load the menu catalog")?;

    match args.command {
        Command::Menu { category, search } => {
            if let Some(restaurant) = &shop.menu().restaurant {
                print_restaurant(restaurant);
            }
            let items: Vec<&MenuItem> = match (&search, &category) {
                (Some(query), _) => shop.menu().search(query),
                (None, Some(category_id)) => shop.menu().items_in_category(category_id),
                (None, None) => shop.menu().items.iter().collect(),
            };
            if items.is_empty() {
                println!("{}", "No items matched.".dimmed());
            } else {
                print_menu(shop.menu(), &items);
            }
        }
        Command::Item { item_id } => match shop.menu().find_item(&item_id) {
            Some(item) => print_item_detail(item),
            None => bail!("unknown menu item: {item_id}"),
        },
        Command::Add {
            item_id,
            quantity,
            variation,
            weight,
            addons,
            note,
        } => {
            if quantity <= 0 {
                bail!("quantity must be a positive integer");
            }
            let line_id = shop.add_to_cart(
                &item_id,
                ItemSelection {
                    quantity,
                    variation_id: variation,
                    weight_kg: weight,
                    addon_ids: addons,
                    special_instructions: note,
                },
            )?;
            let line = shop
                .cart()
                .find_line(&line_id)
                .context("line missing right after add")?;
            println!(
                "{} {}x {} - {}",
                "Added".green().bold(),
                line.quantity,
                line.menu_item.name,
                format_rupees(line.total_price)
            );
            println!("line id: {}", line_id.dimmed());
        }
        Command::Cart => {
            print_cart(shop.cart(), shop.order_totals());
        }
        Command::Remove { line_id } => {
            if shop.cart().find_line(&line_id).is_none() {
                println!("{}", "No such line; cart unchanged.".dimmed());
            }
            shop.cart_store().remove_line(&line_id);
            print_cart(shop.cart(), shop.order_totals());
        }
        Command::Update { line_id, quantity } => {
            shop.cart_store().update_quantity(&line_id, quantity);
            print_cart(shop.cart(), shop.order_totals());
        }
        Command::Clear => {
            shop.cart_store().reset();
            println!("Cart cleared.");
        }
        Command::Demo => {
            run_demo(&mut shop, args.seed).await?;
        }
        Command::Checkout {
            first_name,
            last_name,
            phone,
            address,
            note,
            payment,
        } => {
            run_checkout(
                &mut shop,
                CustomerDetails {
                    first_name,
                    last_name,
                    phone,
                    address,
                    delivery_notes: note,
                },
                payment.into(),
                args.seed,
            )
            .await?;
        }
    }

    Ok(())
}

/// Scripted order walking every core operation: two identical burger
/// configurations (kept as separate lines), a weight-based karahi, the cart
/// printout, and the simulated checkout.
async fn run_demo(shop: &mut Storefront<JsonFileStorage>, seed: Option<u64>) -> Result<()> {
    shop.cart_store().reset();
    println!("{}", "Scripted demo order".bold());
    println!();

    let burger = ItemSelection {
        quantity: 2,
        variation_id: Some(String::from("double")),
        addon_ids: vec![String::from("cheese")],
        ..ItemSelection::default()
    };
    shop.add_to_cart("beef-burger", burger.clone())?;
    // The same configuration again stays its own line in the cart.
    shop.add_to_cart("beef-burger", burger)?;
    shop.add_to_cart(
        "mutton-karahi",
        ItemSelection {
            quantity: 1,
            weight_kg: Some(1.5),
            special_instructions: Some(String::from("extra spicy")),
            ..ItemSelection::default()
        },
    )?;

    run_checkout(
        shop,
        CustomerDetails {
            first_name: String::from("Ali"),
            last_name: String::from("Khan"),
            phone: String::from("+92 300 1234567"),
            address: String::from("House 12, Street 4, Gulberg III, Lahore"),
            delivery_notes: None,
        },
        PaymentMethod::CashOnDelivery,
        seed,
    )
    .await
}

async fn run_checkout(
    shop: &mut Storefront<JsonFileStorage>,
    details: CustomerDetails,
    payment: PaymentMethod,
    seed: Option<u64>,
) -> Result<()> {
    if shop.cart().is_empty() {
        bail!("cart is empty - add something first");
    }
    let subtotal = shop.cart().subtotal();
    if let Some(restaurant) = &shop.menu().restaurant {
        if !restaurant.is_open {
            bail!("{} is currently closed", restaurant.name);
        }
        if !meets_minimum_order(restaurant, subtotal) {
            bail!(
                "subtotal {} is under the minimum order of {}",
                format_rupees(subtotal),
                format_rupees(restaurant.min_order_amount)
            );
        }
    }

    let first_name = details.first_name.clone();
    let mut flow = CheckoutFlow::new();
    flow.submit_details(details)?;
    flow.choose_payment(payment);

    let totals = shop.order_totals();
    print_cart(shop.cart(), totals);
    println!();
    println!(
        "Placing your order via {}...",
        flow.payment_method().label().bold()
    );

    let mut rng = match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };
    let confirmation = checkout::place_order(&mut flow, totals, &mut rng).await?;

    println!();
    println!(
        "{} Order {} confirmed, {first_name}! {} is being prepared.",
        "✓".green().bold(),
        confirmation.order_number.bold(),
        format_rupees(confirmation.totals.total)
    );
    shop.cart_store().clear();
    Ok(())
}
