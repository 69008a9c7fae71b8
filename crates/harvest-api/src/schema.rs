//! # Wire Schema
//!
//! Explicit serde structs for every remote payload, plus the validation
//! that turns them into `harvest-core` domain types.
//!
//! ## The Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Network Boundary                                   │
//! │                                                                         │
//! │   remote JSON            wire structs              domain types         │
//! │   ───────────            ────────────              ────────────         │
//! │                                                                         │
//! │   {success, data} ─────► Envelope<T> ──────┐                            │
//! │   {id, productName,      RawProduct ───────┼─ validate ──► Product      │
//! │    price, images,                          │  & coerce                  │
//! │    categoryId, ...}                        │                            │
//! │   {id, categoryName} ──► RawCategory ──────┘──────────────► Category    │
//! │                                                                         │
//! │   Payload shapes are never trusted at runtime: every entry is checked   │
//! │   field by field before anything downstream sees it.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices arrive as JSON numbers; they are coerced to exact decimals here.
//! A negative, non-finite, or unrepresentable price makes the entry
//! malformed.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use harvest_core::error::ValidationError;
use harvest_core::money::Money;
use harvest_core::types::{category_name, Category, Product};
use harvest_core::validation::{validate_price, validate_product_id, validate_product_name};

/// Image shown when a catalog entry carries no images.
const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

// =============================================================================
// Response Envelope
// =============================================================================

/// The `{success, data}` envelope every catalog endpoint wraps its
/// payload in.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,

    #[serde(default = "none")]
    pub data: Option<T>,

    /// Error detail on failure envelopes; absent on success.
    #[serde(default)]
    pub message: Option<String>,
}

// `#[serde(default)]` alone requires `T: Default`; a tiny helper avoids
// putting that bound on the payload type.
fn none<T>() -> Option<T> {
    None
}

// =============================================================================
// Catalog Payloads
// =============================================================================

/// A product exactly as the catalog API ships it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: String,

    pub product_name: String,

    /// Unit price as a JSON number.
    pub price: f64,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub category_id: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl RawProduct {
    /// Validates and coerces this wire entry into a domain [`Product`].
    ///
    /// The category id is resolved against the fetched category list
    /// ("Unknown" when absent); the first image becomes the display
    /// image, with a placeholder fallback. Catalog entries carry no
    /// stock flag and sell as in-stock.
    pub fn into_product(self, categories: &[Category]) -> Result<Product, ValidationError> {
        validate_product_id(&self.id)?;
        validate_product_name(&self.product_name)?;

        let price = coerce_price(self.price)?;
        validate_price(price)?;

        let image = self
            .images
            .into_iter()
            .find(|i| !i.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        Ok(Product {
            id: self.id,
            name: self.product_name,
            price,
            image,
            category: category_name(categories, &self.category_id).to_string(),
            in_stock: true,
        })
    }
}

/// A category exactly as the catalog API ships it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCategory {
    pub id: String,
    pub category_name: String,
}

impl RawCategory {
    /// Validates this wire entry into a domain [`Category`].
    pub fn into_category(self) -> Result<Category, ValidationError> {
        validate_product_id(&self.id)?;

        if self.category_name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "categoryName".to_string(),
            });
        }

        Ok(Category {
            id: self.id,
            name: self.category_name,
        })
    }
}

/// Coerces a wire price into exact decimal money.
fn coerce_price(price: f64) -> Result<Money, ValidationError> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    Decimal::from_f64(price)
        .map(Money::from_decimal)
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "not representable as a decimal".to_string(),
        })
}

// =============================================================================
// Auth Payloads
// =============================================================================

/// `POST /auth/login` request body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/login` success body. The token is opaque and is sent back
/// verbatim as the `Authorization` header value.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,

    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /auth/register` request body.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// `PUT /auth/change-password` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Generic `{message}` body returned by auth endpoints on failure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
