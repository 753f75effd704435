//! Cart types shared by the guest cart and the server cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ProductRef, UserId};

/// A single cart line.
///
/// The same shape is used for the guest cart kept in durable storage and
/// for the lines of the server cart. Fields the client does not model are
/// preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_ref: ProductRef,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A cart line accumulated before authentication.
pub type LocalCartItem = CartItem;

impl CartItem {
    /// Create a line for a product with no size or price.
    #[must_use]
    pub fn new(product_ref: impl Into<ProductRef>, quantity: u32) -> Self {
        Self {
            product_ref: product_ref.into(),
            quantity,
            size: None,
            price: None,
            extra: Map::new(),
        }
    }

    /// Set the size of this line.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the unit price of this line.
    #[must_use]
    pub const fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Whether two lines refer to the same product variant.
    #[must_use]
    pub fn same_variant(&self, other: &Self) -> bool {
        self.product_ref == other.product_ref && self.size == other.size
    }

    /// Unit price times quantity, if the line carries a price.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.price
            .map(|price| price.saturating_mul(Decimal::from(self.quantity)))
    }
}

/// The authoritative cart held by the server for a signed-in user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServerCart {
    /// Total number of units across all lines, saturating at `u32::MAX`.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Sum of all priced lines, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .filter_map(CartItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
