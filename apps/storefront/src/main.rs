use std::{
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use cart_core::{CartEngine, CartEvent, CheckoutBehavior};
use catalog::{Catalog, MenuFilter};
use clap::Parser;
use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;
mod render;

use commands::Command;
use config::load_settings;

#[derive(Parser, Debug)]
struct Args {
    /// Path to the menu catalog file (overrides settings).
    #[arg(long)]
    menu: Option<PathBuf>,
    /// Empty the cart after a successful checkout.
    #[arg(long)]
    clear_on_checkout: bool,
    /// Print receipts as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let settings = load_settings();

    let menu_path = args.menu.unwrap_or(settings.menu_path);
    let catalog = Arc::new(Catalog::load(&menu_path).with_context(|| {
        format!("failed to load menu catalog from '{}'", menu_path.display())
    })?);

    let behavior = if args.clear_on_checkout || settings.clear_cart_on_checkout {
        CheckoutBehavior::ClearCart
    } else {
        CheckoutBehavior::KeepCart
    };
    let mut cart = CartEngine::with_behavior(Arc::clone(&catalog), behavior);
    let mut events = cart.subscribe_events();

    info!(items = catalog.len(), ?behavior, "storefront session starting");

    let mut selected = MenuFilter::default();

    println!("OG Chicken storefront. Type 'help' for commands.");
    render::menu(&catalog, selected);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let command = match input.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match command {
            Command::Menu(filter) => {
                if let Some(filter) = filter {
                    selected = filter;
                }
                render::menu(&catalog, selected);
            }
            Command::View(id) => match catalog.lookup(&id) {
                Some(item) => render::details(item),
                None => println!("No menu item '{id}'."),
            },
            Command::Add { id, quantity } => {
                cart.adjust(&id, i64::from(quantity));
            }
            Command::Remove { id, quantity } => {
                cart.adjust(&id, -i64::from(quantity));
            }
            Command::Cart => render::cart(&cart.lines(), cart.total()),
            Command::Checkout => {
                if let Err(err) = cart.checkout() {
                    println!("{err}");
                }
            }
            Command::Help => render::help(),
            Command::Quit => break,
        }

        drain_render_signals(&mut events, args.json);
    }

    info!("storefront session ending");
    Ok(())
}

/// Consumes pending render signals and projects them. The engine never
/// waits on this; a session with no drained events still has correct
/// state.
fn drain_render_signals(events: &mut broadcast::Receiver<CartEvent>, json_receipts: bool) {
    loop {
        match events.try_recv() {
            Ok(CartEvent::Updated { lines, total }) => render::cart(&lines, total),
            Ok(CartEvent::CheckoutCompleted { receipt }) => {
                if json_receipts {
                    match serde_json::to_string_pretty(&receipt) {
                        Ok(text) => println!("{text}"),
                        Err(err) => warn!("failed to encode receipt: {err}"),
                    }
                } else {
                    render::receipt(&receipt);
                }
            }
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "render signal receiver lagged");
            }
            Err(_) => break,
        }
    }
}
