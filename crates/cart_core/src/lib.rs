use std::{collections::HashMap, sync::Arc};

use catalog::Catalog;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{
    domain::{ItemId, MenuItem, Money},
    error::CheckoutError,
};
use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Read-only projection of one cart entry, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
    pub subtotal: Money,
}

/// Record of a completed (simulated) checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<CartLine>,
    pub total: Money,
}

/// Render signal emitted after every successful state mutation. The
/// payload carries the full post-mutation projection so views never need
/// to read the engine directly.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    Updated { lines: Vec<CartLine>, total: Money },
    CheckoutCompleted { receipt: Receipt },
}

/// What happens to the cart map after a successful checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutBehavior {
    /// Leave the cart as-is so the order can be repeated or amended.
    #[default]
    KeepCart,
    /// Empty the cart once the receipt is minted.
    ClearCart,
}

/// Owns the item-id → quantity map for one ordering session. All mutation
/// goes through this engine; views consume `lines()`/`total()` or the
/// event stream, never the map itself.
pub struct CartEngine {
    catalog: Arc<Catalog>,
    quantities: HashMap<ItemId, u32>,
    checkout_behavior: CheckoutBehavior,
    events: broadcast::Sender<CartEvent>,
}

impl CartEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_behavior(catalog, CheckoutBehavior::default())
    }

    pub fn with_behavior(catalog: Arc<Catalog>, checkout_behavior: CheckoutBehavior) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            catalog,
            quantities: HashMap::new(),
            checkout_behavior,
            events,
        }
    }

    /// Render signal: one `CartEvent` per successful state mutation.
    /// Dropping every receiver is fine; the engine keeps correct state
    /// with no view attached.
    pub fn subscribe_events(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current quantity for an item, 0 when absent.
    pub fn quantity(&self, id: &ItemId) -> u32 {
        self.quantities.get(id).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Adds `delta` to the item's quantity. An id that does not resolve in
    /// the catalog is a silent no-op (stale view references must not break
    /// the session). A resulting quantity of zero or less removes the
    /// entry; non-positive quantities are never stored. Returns whether
    /// state changed; emits an `Updated` event exactly when it did.
    pub fn adjust(&mut self, id: &ItemId, delta: i64) -> bool {
        if self.catalog.lookup(id).is_none() {
            warn!(item = %id, delta, "ignoring adjustment for unknown menu item");
            return false;
        }

        let current = i64::from(self.quantity(id));
        let next = current.saturating_add(delta);
        let changed = if next <= 0 {
            self.quantities.remove(id).is_some()
        } else {
            let next = u32::try_from(next).unwrap_or(u32::MAX);
            self.quantities.insert(id.clone(), next) != Some(next)
        };

        if changed {
            debug!(item = %id, delta, quantity = self.quantity(id), "cart adjusted");
            self.emit_updated();
        }
        changed
    }

    /// Sum of unit price × quantity over all entries, recomputed from the
    /// live map on every call.
    pub fn total(&self) -> Money {
        self.quantities
            .iter()
            .filter_map(|(id, quantity)| self.catalog.lookup(id).map(|item| item.price * *quantity))
            .sum()
    }

    /// Line projection ordered by category rank, then original catalog
    /// order. Filters non-positive quantities even though `adjust` never
    /// stores them.
    pub fn lines(&self) -> Vec<CartLine> {
        let mut lines: Vec<CartLine> = self
            .quantities
            .iter()
            .filter(|(_, quantity)| **quantity > 0)
            .filter_map(|(id, quantity)| {
                self.catalog.lookup(id).map(|item| CartLine {
                    item: item.clone(),
                    quantity: *quantity,
                    subtotal: item.price * *quantity,
                })
            })
            .collect();
        lines.sort_by_key(|line| {
            (
                line.item.category,
                self.catalog.position(&line.item.id).unwrap_or(usize::MAX),
            )
        });
        lines
    }

    /// Simulated checkout. Fails on an empty cart (total of zero) with the
    /// cart untouched; on success mints a receipt and applies the
    /// configured [`CheckoutBehavior`].
    pub fn checkout(&mut self) -> Result<Receipt, CheckoutError> {
        let total = self.total();
        if total.is_zero() {
            return Err(CheckoutError::EmptyCart);
        }

        let receipt = Receipt {
            order_id: Uuid::new_v4(),
            placed_at: Utc::now(),
            lines: self.lines(),
            total,
        };

        if self.checkout_behavior == CheckoutBehavior::ClearCart {
            self.quantities.clear();
            self.emit_updated();
        }

        debug!(order_id = %receipt.order_id, total = %receipt.total, "checkout completed");
        let _ = self.events.send(CartEvent::CheckoutCompleted {
            receipt: receipt.clone(),
        });
        Ok(receipt)
    }

    fn emit_updated(&self) {
        // A send error only means no view is subscribed right now; the
        // state transition has already happened.
        let _ = self.events.send(CartEvent::Updated {
            lines: self.lines(),
            total: self.total(),
        });
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
