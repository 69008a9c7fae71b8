//! # API Error Types
//!
//! Error types for the remote storefront API boundary.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       API Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Payload             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http           │  │  Api (envelope failed)  │ │
//! │  │  Io / Parse     │  │  (reqwest)      │  │  ProductNotFound        │ │
//! │  └─────────────────┘  └─────────────────┘  │  Auth                   │ │
//! │                                            └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Propagation policy: every failure is local to the caller that issued
//! the request: there is no cross-cutting error channel, no retry loop,
//! and a failed fetch never touches cart state.

use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors from the remote storefront API boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration (bad base URL, zero timeout).
    #[error("Invalid API configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file contents were not valid TOML.
    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Network-level failure (connect, timeout, TLS, body decode).
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    // =========================================================================
    // Payload Errors
    // =========================================================================
    /// The API answered but signalled failure in its envelope.
    #[error("API request failed: {0}")]
    Api(String),

    /// Requested product id absent from the fetched catalog.
    /// The UI renders this as its "Product Not Found" state.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// An auth endpoint rejected the request.
    #[error("Authentication failed: {0}")]
    Auth(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
