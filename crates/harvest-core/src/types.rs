//! # Domain Types
//!
//! Core domain types used throughout Fresh Harvest.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │  CartLineItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │   (cart.rs)     │       │
//! │  │  id             │   │  id             │   │                 │       │
//! │  │  name           │   │  name           │   │  snapshot of a  │       │
//! │  │  price (Money)  │   └─────────────────┘   │  Product + qty  │       │
//! │  │  image          │                         └─────────────────┘       │
//! │  │  category       │                                                   │
//! │  │  in_stock       │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Product` is the descriptor handed to the cart by a product page; its
//! fields are snapshotted into the line item at add time and never
//! re-fetched. Ids are opaque strings owned by the remote catalog.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product as presented to the shopper.
///
/// This is the validated, typed form of a remote catalog entry; harvest-api
/// builds it from the wire payload at the network boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable product identifier; unique key within the cart.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price in decimal currency units.
    pub price: Money,

    /// Display image reference (URL or path). Display-only.
    pub image: String,

    /// Category the product belongs to (display string).
    pub category: String,

    /// Stock flag at the time the catalog was fetched.
    /// Snapshotted into the cart; gates quantity increases there.
    pub in_stock: bool,
}

// =============================================================================
// Category
// =============================================================================

/// A product category from the remote catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Resolves a category id to its display name.
///
/// Falls back to `"Unknown"` when the id is absent from the fetched
/// category list, so a stale catalog never breaks product display.
pub fn category_name<'a>(categories: &'a [Category], category_id: &str) -> &'a str {
    categories
        .iter()
        .find(|c| c.id == category_id)
        .map_or("Unknown", |c| c.name.as_str())
}

/// Picks related products: same category, excluding the product itself.
///
/// Pure catalog arithmetic; the product detail page shows up to `limit`
/// of these alongside the current product.
pub fn related_products<'a>(
    catalog: &'a [Product],
    current: &Product,
    limit: usize,
) -> Vec<&'a Product> {
    catalog
        .iter()
        .filter(|p| p.category == current.category && p.id != current.id)
        .take(limit)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
