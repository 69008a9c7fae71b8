//! # harvest-core: Pure Business Logic for Fresh Harvest
//!
//! This crate is the **heart** of the Fresh Harvest storefront. It contains
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Fresh Harvest Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Storefront UI (external)                   │   │
//! │  │    Shop pages ──► Cart badge ──► Cart page ──► Order summary    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ store handle + subscriptions           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                     harvest-cart (store)                        │   │
//! │  │    add_to_cart, update_quantity, remove, clear, notify          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ harvest-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ checkout  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  summary  │  │   │
//! │  │   │  Category │  │  Decimal  │  │ LineItem  │  │   promo   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category)
//! - [`money`] - Money type over exact decimal arithmetic
//! - [`cart`] - Cart container: line items, mutations, derived totals
//! - [`checkout`] - Order summary math and the promo code
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every derived value is recomputed from state
//! 2. **No I/O**: network and file system access is FORBIDDEN here
//! 3. **Decimal Money**: currency math in exact base-10, rounded at display
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use harvest_core::cart::Cart;
//! use harvest_core::checkout::OrderSummary;
//! use harvest_core::money::Money;
//! use harvest_core::types::Product;
//!
//! let apples = Product {
//!     id: "p-apples".into(),
//!     name: "Gala Apples".into(),
//!     price: Money::from_major_minor(4, 50),
//!     image: "/images/apples.jpg".into(),
//!     category: "fruits".into(),
//!     in_stock: true,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_item(&apples, 10)?;
//!
//! let summary = OrderSummary::compute(cart.total_price(), true);
//! assert_eq!(summary.total, Money::from_major_minor(49, 73));
//! # Ok::<(), harvest_core::error::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use harvest_core::Money` instead of
// `use harvest_core::money::Money`

pub use cart::{Cart, CartLineItem};
pub use checkout::{is_valid_promo, OrderSummary, PROMO_CODE};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::{Category, Product};
