//! Cart commands.
//!
//! Editing only touches the guest cart, so it is refused once signed in.
//! `show` reads the server cart for a signed-in user.

use rust_decimal::Decimal;
use storefront_client::CartApi;
use storefront_core::CartItem;

use super::{CliError, Context};
use crate::console;

pub fn add(
    ctx: &Context,
    product: String,
    quantity: u32,
    size: Option<String>,
    price: Option<Decimal>,
) -> Result<(), CliError> {
    if ctx.sessions.current().is_some() {
        return Err(CliError::SignedIn);
    }

    let mut item = CartItem::new(product, quantity);
    if let Some(size) = size {
        item = item.with_size(size);
    }
    if let Some(price) = price {
        item = item.with_price(price);
    }

    let items = ctx.guest_cart.add(item)?;
    tracing::debug!(lines = items.len(), "Guest cart updated");
    console::print_lines("Guest cart", &items);
    Ok(())
}

pub async fn show(ctx: &Context) -> Result<(), CliError> {
    match ctx.sessions.current() {
        Some(session) => {
            let cart = ctx
                .api
                .get_cart(&session.token, session.user_id())
                .await?;
            ctx.sessions.state().set_cart(cart.clone());
            console::print_server_cart(&cart);
        }
        None => console::print_lines("Guest cart", &ctx.guest_cart.load()?),
    }
    Ok(())
}

pub fn clear(ctx: &Context) -> Result<(), CliError> {
    if ctx.sessions.current().is_some() {
        return Err(CliError::SignedIn);
    }

    ctx.guest_cart.clear()?;
    console::line("Guest cart cleared");
    Ok(())
}
