//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::instrument;

use crate::api::{ProductImage, ProductVariant, Promotion};
use crate::filters;
use crate::middleware::CurrentIdentity;
use crate::models::UserSession;
use crate::state::AppState;

/// Number of handsets to show in the featured grid.
const FEATURED_COUNT: usize = 10;

/// Shown when a variant has no usable catalog image.
const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.svg";

// =============================================================================
// Product and Promotion Views
// =============================================================================

/// Handset display data for the featured grid.
#[derive(Clone)]
pub struct FeaturedProductView {
    pub variant_id: String,
    pub name: String,
    /// Price in minor units, rendered through the `money` filter.
    pub price_cents: i64,
    pub image_url: String,
}

/// One line in the promotions banner strip.
#[derive(Clone)]
pub struct PromotionView {
    pub text: String,
    pub period: String,
}

impl PromotionView {
    /// Convert a backend promotion, skipping entries with nothing to say.
    fn from_wire(promotion: &Promotion) -> Option<Self> {
        let text = promotion.description.as_deref()?.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            period: format!(
                "{} - {}",
                promotion.starts_at.format("%b %-d, %Y"),
                promotion.ends_at.format("%b %-d, %Y")
            ),
        })
    }
}

/// Static promotion lines used when the backend has none to offer.
fn fallback_promotions() -> Vec<PromotionView> {
    vec![
        PromotionView {
            text: "Summer sale: 10% off every flagship handset".to_string(),
            period: "While stocks last".to_string(),
        },
        PromotionView {
            text: "Free shipping on orders over $500".to_string(),
            period: "All year round".to_string(),
        },
    ]
}

// =============================================================================
// Type Conversions
// =============================================================================

/// Convert a catalog price in dollars to minor units.
fn decimal_to_cents(price: Decimal) -> i64 {
    (price * Decimal::ONE_HUNDRED).round().to_i64().unwrap_or(0)
}

/// Only absolute http(s) URLs are trusted; anything else gets the placeholder.
fn is_valid_image_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Pick a display URL for an image record, thumbnail first.
fn pick_image_url(image: &ProductImage) -> Option<String> {
    [image.thumbnail_url.as_deref(), image.display_url.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| is_valid_image_url(candidate))
        .map(ToString::to_string)
}

/// Join variants with their images and keep the first [`FEATURED_COUNT`].
fn featured_products(
    variants: &[ProductVariant],
    images: &[ProductImage],
) -> Vec<FeaturedProductView> {
    variants
        .iter()
        .take(FEATURED_COUNT)
        .map(|variant| {
            let image_url = images
                .iter()
                .find(|image| image.variant_id == variant.id)
                .and_then(pick_image_url)
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

            FeaturedProductView {
                variant_id: variant.id.to_string(),
                name: variant.product_name.clone(),
                price_cents: decimal_to_cents(variant.sale_price),
                image_url,
            }
        })
        .collect()
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Signed-in identity for the shared layout.
    pub user: UserSession,
    /// Handsets for the featured grid.
    pub products: Vec<FeaturedProductView>,
    /// Lines for the promotions banner strip.
    pub promotions: Vec<PromotionView>,
}

/// Display the home page.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    CurrentIdentity(user): CurrentIdentity,
) -> impl IntoResponse {
    let variants = state.api().list_variants().await.unwrap_or_else(|e| {
        tracing::error!("Failed to fetch product variants: {e}");
        Vec::new()
    });

    let images = state.api().list_images().await.unwrap_or_else(|e| {
        tracing::error!("Failed to fetch product images: {e}");
        Vec::new()
    });

    // A bare banner strip looks broken, so backend silence falls back to
    // static copy.
    let promotions = match state.api().list_promotions().await {
        Ok(list) => {
            let live: Vec<PromotionView> =
                list.iter().filter_map(PromotionView::from_wire).collect();
            if live.is_empty() {
                fallback_promotions()
            } else {
                live
            }
        }
        Err(e) => {
            tracing::error!("Failed to fetch promotions: {e}");
            fallback_promotions()
        }
    };

    HomeTemplate {
        user,
        products: featured_products(&variants, &images),
        promotions,
    }
}
