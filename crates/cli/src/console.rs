//! Terminal rendering of notifications, navigation and carts.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use storefront_client::{Navigator, Notifier, Route};
use storefront_core::{CartItem, ServerCart};

/// Notifier and navigator for an interactive terminal.
///
/// Successes go to stdout, errors to stderr. There is no page to move to,
/// so navigation prints the route the user would land on.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl Notifier for Console {
    fn success(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        failure(message);
    }
}

impl Navigator for Console {
    fn go_to(&self, route: Route) {
        println!("-> {route}");
    }
}

pub fn failure(message: &str) {
    eprintln!("error: {message}");
}

pub fn line(message: &str) {
    println!("{message}");
}

pub fn print_lines(title: &str, items: &[CartItem]) {
    if items.is_empty() {
        println!("{title}: empty");
        return;
    }

    println!("{title}:");
    for item in items {
        let size = item
            .size
            .as_deref()
            .map(|size| format!(" ({size})"))
            .unwrap_or_default();
        let total = item
            .line_total()
            .map(|total| format!("  {total}"))
            .unwrap_or_default();
        println!("  {} x{}{size}{total}", item.product_ref, item.quantity);
    }
}

pub fn print_server_cart(cart: &ServerCart) {
    print_lines("Cart", &cart.items);
    if !cart.is_empty() {
        println!("  {} item(s), subtotal {}", cart.item_count(), cart.subtotal());
    }
}
