//! # Vendo Console Demo
//!
//! Seeds a vending machine and walks through a maintenance + purchase
//! session against the machine's two operation surfaces.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize logging (tracing-subscriber, RUST_LOG override)          │
//! │  2. Load demo config (defaults, VENDO_DEMO_CONFIG JSON override)        │
//! │  3. Build machine, seed coin float and product slots                    │
//! │  4. Run purchases: happy path, exact payment, and each rejection        │
//! │  5. Dump the final machine snapshot as JSON                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vendo_core::Money;
use vendo_machine::VendingMachine;

use crate::config::DemoConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing: INFO by default, overridable with RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("starting vendo demo session");

    // Load configuration
    let config = DemoConfig::load()?;
    let denominations = config.denominations()?;
    info!(
        slot_capacity = config.slot_capacity,
        denominations = %config.coins.join(", "),
        "configuration loaded"
    );

    // Build and seed the machine
    let machine = VendingMachine::new(config.slot_capacity, &denominations)?;
    for (coin, count) in config.float()? {
        machine.set_coin_count(coin, count)?;
    }

    let cola = machine.add_product(Some(Money::parse("1.00")?), 5)?;
    let water = machine.add_product(Some(Money::parse("0.50")?), 2)?;
    let mystery = machine.add_product(None, 3)?; // stocked but not yet priced

    // -------------------------------------------------------------------------
    // Consumer session
    // -------------------------------------------------------------------------

    println!("cola price: {}", render_price(machine.price(cola)?));

    // Happy path: 1.10 tendered for a 1.00 product
    let tendered = [Money::parse("1.00")?, Money::parse("0.10")?];
    let change = machine.buy_product(cola, &tendered)?;
    println!("bought cola, change: {}", render_coins(&change));

    // Exact payment: no change owed
    let change = machine.buy_product(water, &[Money::parse("0.50")?])?;
    println!("bought water, change: {}", render_coins(&change));

    // Each rejection, printed rather than propagated
    for (label, slot, tendered) in [
        ("no coins", cola, vec![]),
        ("unsupported coin", cola, vec![Money::parse("0.30")?]),
        ("underpayment", cola, vec![Money::parse("0.50")?]),
        ("unpriced slot", mystery, vec![Money::parse("1.00")?]),
    ] {
        match machine.buy_product(slot, &tendered) {
            Ok(change) => println!("{label}: unexpectedly succeeded, change {change:?}"),
            Err(err) => {
                warn!(label, "purchase rejected");
                println!("{label}: {err}");
            }
        }
    }

    // -------------------------------------------------------------------------
    // Final state
    // -------------------------------------------------------------------------

    let snapshot = machine.snapshot();
    println!("final machine state:");
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    info!("demo session complete");
    Ok(())
}

fn render_price(price: Option<Money>) -> String {
    match price {
        Some(price) => price.to_string(),
        None => "(not set)".to_string(),
    }
}

fn render_coins(coins: &[Money]) -> String {
    if coins.is_empty() {
        return "(none)".to_string();
    }
    let rendered: Vec<String> = coins.iter().map(Money::to_string).collect();
    rendered.join(", ")
}
