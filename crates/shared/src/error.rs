use thiserror::Error;

use crate::domain::{ItemId, Money};

/// Catalog construction failures. These abort startup before any session
/// state exists; a running session never observes them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate menu item id '{0}'")]
    DuplicateId(ItemId),
    #[error("menu item '{id}' has negative price {price}")]
    NegativePrice { id: ItemId, price: Money },
}

/// Checkout failures surfaced to the user as a blocking message. The cart
/// is left untouched; the user may add items and retry.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("your cart is empty; add items from the menu first")]
    EmptyCart,
}
