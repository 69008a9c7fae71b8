//! # Harvest API
//!
//! Typed async client for the Fresh Harvest remote APIs: the product
//! catalog and the auth service.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        harvest-api                                      │
//! │                                                                         │
//! │  config.rs   - ApiConfig: TOML file + env overrides + validation        │
//! │  schema.rs   - Wire structs and the wire → domain boundary              │
//! │  client.rs   - StorefrontClient: catalog fetches, auth calls            │
//! │  error.rs    - ApiError                                                 │
//! │                                                                         │
//! │  Everything leaving this crate is a harvest-core domain type or an      │
//! │  opaque auth token. Raw wire shapes never escape.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```no_run
//! use harvest_api::{ApiConfig, StorefrontClient};
//!
//! # async fn run() -> Result<(), harvest_api::ApiError> {
//! let client = StorefrontClient::new(ApiConfig::load_or_default(None))?;
//! let products = client.get_products().await?;
//! for product in &products {
//!     println!("{}: {}", product.name, product.price);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod schema;

pub use client::StorefrontClient;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
