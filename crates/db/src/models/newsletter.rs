//! Newsletter subscription models.

use std::collections::BTreeMap;

use atrium_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `newsletter_subscriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsletterSubscription {
    pub id: DbId,
    pub email: String,
    pub is_active: bool,
    pub source: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub subscribed_at: Timestamp,
    pub unsubscribed_at: Option<Timestamp>,
}

/// Raw public subscribe payload.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: Option<String>,
    pub source: Option<String>,
}

/// Raw public unsubscribe payload.
#[derive(Debug, Deserialize)]
pub struct UnsubscribeRequest {
    pub email: Option<String>,
}

/// Query params for the admin subscription listing.
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionFilter {
    pub is_active: Option<bool>,
    pub source: Option<String>,
}

/// Editor-facing aggregate snapshot.
#[derive(Debug, Default, Serialize)]
pub struct NewsletterStats {
    pub active: i64,
    pub unsubscribed: i64,
    pub new_last_30_days: i64,
    pub new_last_7_days: i64,
    pub by_source: BTreeMap<String, i64>,
}
