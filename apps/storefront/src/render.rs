//! Text projections of catalog and cart state. Pure output; no state of
//! its own.

use cart_core::{CartLine, Receipt};
use catalog::{Catalog, MenuFilter};
use shared::domain::{MenuItem, Money};

pub fn menu(catalog: &Catalog, filter: MenuFilter) {
    let items = catalog.filter(filter);
    println!();
    println!("Menu - {filter} ({} items)", items.len());
    if items.is_empty() {
        println!("  No items in this category.");
        return;
    }
    for item in items {
        println!(
            "  [{}] {} - {}  ({}, {})",
            item.badge, item.name, item.price, item.id, item.category
        );
        println!("      {}", item.description);
    }
}

pub fn details(item: &MenuItem) {
    println!();
    println!("{} - {}", item.name, item.price);
    println!("  {}", item.description);
    println!(
        "  badge: {}  category: {}  image: {}",
        item.badge, item.category, item.image
    );
}

pub fn cart(lines: &[CartLine], total: Money) {
    println!();
    if lines.is_empty() {
        println!("Your cart is empty.");
        println!("Add items from the menu.");
        return;
    }
    println!("Cart:");
    for line in lines {
        println!(
            "  {:>3} x {:<24} {:>8}  ({} each)",
            line.quantity,
            line.item.name,
            line.subtotal.to_string(),
            line.item.price
        );
    }
    println!("Total: {total}");
}

pub fn receipt(receipt: &Receipt) {
    println!();
    println!(
        "Demo checkout - order {} placed at {}",
        receipt.order_id,
        receipt.placed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    for line in &receipt.lines {
        println!(
            "  {:>3} x {:<24} {:>8}",
            line.quantity,
            line.item.name,
            line.subtotal.to_string()
        );
    }
    println!("Total: {}", receipt.total);
    println!("Next step: connect a real POS or payment gateway.");
}

pub fn help() {
    println!();
    println!("Commands:");
    println!("  menu [all|chicken|burger|sides|drinks]  show the menu, optionally switching filter");
    println!("  view <id>                               show one item's details");
    println!("  add <id> [qty]                          add an item to the cart");
    println!("  rm <id> [qty]                           remove an item from the cart");
    println!("  cart                                    show the cart");
    println!("  checkout                                place the (simulated) order");
    println!("  quit                                    leave the storefront");
}
