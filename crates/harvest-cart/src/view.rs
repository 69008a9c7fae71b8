//! # Line Item View Models
//!
//! Maps cart line items to display-ready values: formatted prices,
//! human-readable timestamps, and the enabled/disabled state of the
//! quantity stepper. This is where currency rounding happens: state
//! keeps full precision, views carry two-decimal strings.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartLineItem (state)              LineItemView (display)              │
//! │  ───────────────────               ───────────────────────             │
//! │  price: Money(4.99)          ──►   unit_price: "$4.99"                 │
//! │  quantity: 3                 ──►   line_total: "$14.97"                │
//! │  added_at: DateTime<Utc>     ──►   added_at:  "Mar 5, 02:41 PM"        │
//! │  in_stock: false             ──►   can_increase: false  (+ disabled)   │
//! │  quantity: 1                 ──►   can_decrease: false  (− disabled)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use harvest_core::cart::CartLineItem;

/// Timestamp format shown on cart lines: "Mar 5, 02:41 PM".
const ADDED_AT_FORMAT: &str = "%b %-d, %I:%M %p";

/// Display-ready projection of one cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub image: String,

    /// Unit price, rounded for display ("$4.99").
    pub unit_price: String,

    pub quantity: i64,

    /// Line total (price × quantity), rounded for display.
    pub line_total: String,

    /// When the item was added, formatted for the cart line.
    pub added_at: String,

    /// Stock snapshot; out-of-stock lines render a badge.
    pub in_stock: bool,

    /// Whether the "+" stepper button is enabled (stock gate).
    pub can_increase: bool,

    /// Whether the "−" stepper button is enabled (quantity floor).
    pub can_decrease: bool,
}

impl From<&CartLineItem> for LineItemView {
    fn from(item: &CartLineItem) -> Self {
        LineItemView {
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            image: item.image.clone(),
            unit_price: item.price.to_string(),
            quantity: item.quantity,
            line_total: item.line_total().to_string(),
            added_at: item.added_at.format(ADDED_AT_FORMAT).to_string(),
            in_stock: item.in_stock,
            can_increase: item.can_increase(),
            can_decrease: item.can_decrease(),
        }
    }
}

/// Projects a slice of line items into views, preserving order.
pub fn line_item_views(items: &[CartLineItem]) -> Vec<LineItemView> {
    items.iter().map(LineItemView::from).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
