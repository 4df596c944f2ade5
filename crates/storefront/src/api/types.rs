//! Wire types for the backend CRUD API.
//!
//! The backend serializes JSON with camelCase property names, but older
//! deployments (and hand-written fixtures) use PascalCase. Every field
//! carries an alias for the PascalCase form so both parse.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pocketwave_core::{CustomerId, EmployeeId, ImageId, ProductId, PromotionId, VariantId};

/// A customer account record.
///
/// `password` is the stored credential as the backend returns it. The
/// backend stores passwords in the clear; see `services::auth` for where
/// the comparison happens.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(alias = "Id")]
    pub id: CustomerId,
    #[serde(alias = "FullName")]
    pub full_name: String,
    #[serde(alias = "Phone")]
    pub phone: String,
    #[serde(alias = "Password")]
    pub password: String,
    #[serde(alias = "Email")]
    pub email: Option<String>,
    #[serde(alias = "Address")]
    pub address: Option<String>,
    #[serde(alias = "AvatarUrl")]
    pub avatar_url: Option<String>,
    #[serde(alias = "Gender")]
    pub gender: Option<String>,
    #[serde(alias = "BirthDate")]
    pub birth_date: Option<chrono::NaiveDateTime>,
}

/// A staff account record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(alias = "Id")]
    pub id: EmployeeId,
    #[serde(alias = "FirstName")]
    pub first_name: String,
    #[serde(alias = "LastName")]
    pub last_name: String,
    #[serde(alias = "Phone")]
    pub phone: String,
    #[serde(alias = "Password")]
    pub password: String,
    #[serde(alias = "AvatarUrl")]
    pub avatar_url: Option<String>,
    /// Role name as stored by the backend, e.g. "Staff Manager".
    #[serde(alias = "Role")]
    pub role: Option<String>,
}

impl Employee {
    /// Full display name, tolerating a missing half.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Payload for creating a customer account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

/// A sellable product variant (one colorway/capacity of a handset).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    #[serde(alias = "Id")]
    pub id: VariantId,
    #[serde(alias = "ProductId")]
    pub product_id: ProductId,
    #[serde(alias = "ProductName")]
    pub product_name: String,
    #[serde(alias = "SalePrice")]
    pub sale_price: Decimal,
    #[serde(default, alias = "StockQuantity")]
    pub stock_quantity: i32,
    #[serde(default, alias = "QuantitySold")]
    pub quantity_sold: i32,
    #[serde(alias = "Status")]
    pub status: Option<String>,
    #[serde(alias = "ColorId")]
    pub color_id: Option<String>,
    #[serde(alias = "CapacityId")]
    pub capacity_id: Option<String>,
    #[serde(alias = "ReceiptId")]
    pub receipt_id: Option<String>,
}

/// A product photo attached to a variant.
///
/// `thumbnail_url` is the grid-sized rendition, `display_url` the full-size
/// one. Either may be missing or hold junk; callers must validate before
/// emitting an `<img src>`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    #[serde(alias = "Id")]
    pub id: ImageId,
    #[serde(alias = "VariantId")]
    pub variant_id: VariantId,
    #[serde(alias = "ThumbnailUrl")]
    pub thumbnail_url: Option<String>,
    #[serde(alias = "DisplayUrl")]
    pub display_url: Option<String>,
}

/// A promotion campaign.
///
/// Dates come back without a timezone offset (the backend stores local
/// wall-clock times), hence `NaiveDateTime`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    #[serde(alias = "Id")]
    pub id: PromotionId,
    #[serde(alias = "Description")]
    pub description: Option<String>,
    #[serde(alias = "StartsAt")]
    pub starts_at: chrono::NaiveDateTime,
    #[serde(alias = "EndsAt")]
    pub ends_at: chrono::NaiveDateTime,
}
