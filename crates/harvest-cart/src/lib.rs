//! # harvest-cart: The Observable Cart Store
//!
//! Session-scoped cart state for the Fresh Harvest storefront.
//!
//! This crate wraps the pure [`harvest_core::cart::Cart`] in an explicit,
//! constructor-injected state container: the application root owns a
//! [`CartStore`] (usually in an `Arc`), hands references to UI consumers,
//! and each consumer registers a listener to be re-rendered after every
//! change. There is no global singleton and no implicit context lookup.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Application root                                                      │
//! │        │  owns Arc<CartStore>                                           │
//! │        ├────────────► cart badge   (subscriber: total_items)            │
//! │        ├────────────► cart page    (subscriber: items + summary)        │
//! │        └────────────► cart drawer  (subscriber: items)                  │
//! │                                                                         │
//! │   UI event ──► store operation ──► snapshot fan-out ──► re-render       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`store`] - [`CartStore`]: mutations, queries, promo state, snapshots
//! - [`view`] - display-ready line item projections

pub mod store;
pub mod view;

pub use store::{CartSnapshot, CartStore, CartTotals, SubscriberId};
pub use view::{line_item_views, LineItemView};
