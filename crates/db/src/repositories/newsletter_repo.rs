//! Repository for the `newsletter_subscriptions` table.
//!
//! A given email only ever has one row. Subscribing again reactivates it;
//! unsubscribing flips it inactive and stamps the time.

use std::collections::BTreeMap;

use sqlx::PgPool;

use crate::models::newsletter::{NewsletterSubscription, NewsletterStats, SubscriptionFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, is_active, source, ip_address, user_agent, \
    subscribed_at, unsubscribed_at";

pub struct NewsletterRepo;

impl NewsletterRepo {
    /// Idempotent subscribe: insert the row, or reactivate the existing one
    /// for this email. Never creates a second row per email.
    pub async fn subscribe(
        pool: &PgPool,
        email: &str,
        source: Option<&str>,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<NewsletterSubscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO newsletter_subscriptions (email, source, ip_address, user_agent)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_newsletter_subscriptions_email
             DO UPDATE SET
                is_active = TRUE,
                unsubscribed_at = NULL,
                subscribed_at = CASE
                    WHEN newsletter_subscriptions.is_active THEN newsletter_subscriptions.subscribed_at
                    ELSE NOW()
                END
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NewsletterSubscription>(&query)
            .bind(email)
            .bind(source)
            .bind(ip_address)
            .bind(user_agent)
            .fetch_one(pool)
            .await
    }

    /// Deactivate an active subscription. Returns the updated row, or
    /// `None` when there is no active subscription for the email.
    pub async fn unsubscribe(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<NewsletterSubscription>, sqlx::Error> {
        let query = format!(
            "UPDATE newsletter_subscriptions
             SET is_active = FALSE, unsubscribed_at = NOW()
             WHERE email = $1 AND is_active = TRUE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NewsletterSubscription>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Admin listing, newest subscription first.
    pub async fn list(
        pool: &PgPool,
        filter: &SubscriptionFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NewsletterSubscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM newsletter_subscriptions
             WHERE ($1::BOOL IS NULL OR is_active = $1)
               AND ($2::TEXT IS NULL OR source = $2)
             ORDER BY subscribed_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, NewsletterSubscription>(&query)
            .bind(filter.is_active)
            .bind(&filter.source)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// One-snapshot aggregate counts for the editor dashboard.
    pub async fn stats(pool: &PgPool) -> Result<NewsletterStats, sqlx::Error> {
        let (active, unsubscribed, new_last_30_days, new_last_7_days): (i64, i64, i64, i64) =
            sqlx::query_as(
                "SELECT COUNT(*) FILTER (WHERE is_active),
                        COUNT(*) FILTER (WHERE NOT is_active),
                        COUNT(*) FILTER (WHERE is_active AND subscribed_at >= NOW() - INTERVAL '30 days'),
                        COUNT(*) FILTER (WHERE is_active AND subscribed_at >= NOW() - INTERVAL '7 days')
                 FROM newsletter_subscriptions",
            )
            .fetch_one(pool)
            .await?;

        let by_source: Vec<(String, i64)> = sqlx::query_as(
            "SELECT COALESCE(source, 'unknown'), COUNT(*)
             FROM newsletter_subscriptions
             WHERE is_active
             GROUP BY source",
        )
        .fetch_all(pool)
        .await?;

        Ok(NewsletterStats {
            active,
            unsubscribed,
            new_last_30_days,
            new_last_7_days,
            by_source: by_source.into_iter().collect::<BTreeMap<_, _>>(),
        })
    }
}
