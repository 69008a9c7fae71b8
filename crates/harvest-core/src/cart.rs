//! # Cart
//!
//! The in-memory shopping cart: an ordered list of line items with the
//! mutations and derived values every page builds on.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action                Operation              State Change           │
//! │  ─────────                ─────────              ────────────           │
//! │                                                                         │
//! │  Add to Cart ───────────► add_item() ──────────► merge or push          │
//! │                                                                         │
//! │  Change Quantity ───────► update_quantity() ───► qty = n (or remove)    │
//! │                                                                         │
//! │  Stepper +/− ───────────► increment() ─────────► qty += 1 (stock gate)  │
//! │                           decrement() ─────────► qty -= 1 (floor at 1)  │
//! │                                                                         │
//! │  Remove ────────────────► remove_item() ───────► delete line            │
//! │                                                                         │
//! │  Clear ─────────────────► clear() ─────────────► items.clear()          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by `id` (adding the same product merges quantities)
//! - Every quantity is ≥ 1 (a non-positive update removes the line;
//!   `decrement` floors at 1; removal is always an explicit action)
//! - Insertion order is preserved
//!
//! Derived values (`total_items`, `total_price`) are recomputed on demand,
//! never cached, so they always reflect the latest state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_quantity;

// =============================================================================
// Cart Line Item
// =============================================================================

/// One line in the shopping cart.
///
/// ## Snapshot Pattern
/// All product fields are frozen copies taken at add time. The cart keeps
/// displaying consistent data even if the remote catalog changes after the
/// item was added; prices are never re-fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Product identifier; unique key within the cart.
    pub id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Category at time of adding (frozen).
    pub category: String,

    /// Unit price at time of adding (frozen).
    pub price: Money,

    /// Image reference, display-only.
    pub image: String,

    /// Quantity in cart. Invariant: always ≥ 1.
    pub quantity: i64,

    /// Stock flag snapshot at add time; gates quantity increases.
    pub in_stock: bool,

    /// When this item was first added. Never updated by quantity changes.
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    /// Creates a new line item from a product and quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartLineItem {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity,
            in_stock: product.in_stock,
            added_at: Utc::now(),
        }
    }

    /// The line total (unit price × quantity), full precision.
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }

    /// Whether the quantity may be increased (stock snapshot gate).
    pub fn can_increase(&self) -> bool {
        self.in_stock
    }

    /// Whether the quantity may be decreased without removing the line.
    pub fn can_decrease(&self) -> bool {
        self.quantity > 1
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart for the current session.
///
/// Created empty at session start, mutated only through the methods below,
/// and dropped (or explicitly cleared) at session end. No durability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a product to the cart or merges into an existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity increases by `quantity`;
    ///   `added_at` and all frozen fields stay untouched
    /// - Product not in cart: appended as a new line with `added_at = now`
    /// - No upper quantity bound; any cap is a UI policy, not a cart rule
    ///
    /// ## Errors
    /// Non-positive `quantity` is rejected with a validation error and the
    /// cart is left unchanged. The policy is reject, not clamp.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.id == product.id) {
            item.quantity += quantity;
            return Ok(());
        }

        self.items.push(CartLineItem::from_product(product, quantity));
        Ok(())
    }

    /// Sets the quantity of a line item.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: equivalent to `remove_item(id)`; a zero-quantity
    ///   line never exists
    /// - Unknown `id`: silent no-op
    pub fn update_quantity(&mut self, id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity = quantity;
        }
    }

    /// Increases a line's quantity by one.
    ///
    /// ## Errors
    /// Rejected with `CoreError::OutOfStock` when the line's stock snapshot
    /// is false. Unknown `id` is a silent no-op.
    pub fn increment(&mut self, id: &str) -> CoreResult<()> {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            if !item.can_increase() {
                return Err(CoreError::OutOfStock {
                    id: item.id.clone(),
                    name: item.name.clone(),
                });
            }
            item.quantity += 1;
        }
        Ok(())
    }

    /// Decreases a line's quantity by one, never below 1.
    ///
    /// At quantity 1 this is a no-op: dropping a line is always the
    /// explicit `remove_item`, never a side effect of stepping down.
    pub fn decrement(&mut self, id: &str) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            if item.can_decrease() {
                item.quantity -= 1;
            }
        }
    }

    /// Removes the line with the given id, if present. Idempotent.
    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Read-only view of the line items, in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of unique lines in the cart.
    pub fn unique_items(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines.
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Subtotal: Σ price × quantity, single pass, no intermediate rounding.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// True iff a line with this id exists (any quantity ≥ 1).
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
