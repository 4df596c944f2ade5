//! Promotions page route handler.
//!
//! The page itself is static marketing copy. The live backend promotions
//! only feed the banner strip on the home page.

use askama::Template;
use askama_web::WebTemplate;
use chrono::{Duration, Utc};
use tracing::instrument;

use crate::filters;
use crate::middleware::CurrentIdentity;
use crate::models::UserSession;

/// A campaign card on the promotions page.
#[derive(Clone)]
pub struct CampaignView {
    pub title: String,
    pub description: String,
    pub period: String,
}

/// Static campaigns. Dates are anchored to today so the page never
/// advertises an expired offer.
fn current_campaigns() -> Vec<CampaignView> {
    let today = Utc::now().date_naive();
    let period = |start_offset: i64, end_offset: i64| {
        format!(
            "{} - {}",
            (today + Duration::days(start_offset)).format("%b %-d, %Y"),
            (today + Duration::days(end_offset)).format("%b %-d, %Y")
        )
    };

    vec![
        CampaignView {
            title: "Mid-year flagship event".to_string(),
            description: "10% off every flagship handset priced over $800.".to_string(),
            period: period(-10, 20),
        },
        CampaignView {
            title: "Accessory bundle".to_string(),
            description: "Free case and tempered glass with any handset purchase.".to_string(),
            period: period(0, 30),
        },
        CampaignView {
            title: "Zero-interest installments".to_string(),
            description: "0% interest on six-month installment plans, no hidden fees.".to_string(),
            period: period(-5, 55),
        },
    ]
}

/// Promotions page template.
#[derive(Template, WebTemplate)]
#[template(path = "promotions.html")]
pub struct PromotionsTemplate {
    /// Signed-in identity for the shared layout.
    pub user: UserSession,
    pub campaigns: Vec<CampaignView>,
}

/// Display the promotions page.
#[instrument(skip_all)]
pub async fn show(CurrentIdentity(user): CurrentIdentity) -> PromotionsTemplate {
    PromotionsTemplate {
        user,
        campaigns: current_campaigns(),
    }
}
