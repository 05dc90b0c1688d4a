use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "subscription_tier", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum SubscriptionTier {
    Default,
    Premium,
    Ultimate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "subscription_period", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum SubscriptionPeriod {
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "subscription_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum SubscriptionStatus {
    Active,
    Completed,
    Terminated,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subscription {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub tier: SubscriptionTier,
    pub period: SubscriptionPeriod,
    pub status: SubscriptionStatus,
    pub price: Decimal,
    pub renewal_allowed: bool,
    pub created_at: OffsetDateTime,
}

impl Subscription {
    /// The free monthly subscription every new account starts on.
    pub fn default_for(owner_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            tier: SubscriptionTier::Default,
            period: SubscriptionPeriod::Monthly,
            status: SubscriptionStatus::Active,
            price: Decimal::ZERO,
            renewal_allowed: true,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Insert a subscription row within the registration transaction.
pub async fn insert_tx(
    tx: &mut Transaction<'_, Postgres>,
    subscription: &Subscription,
) -> anyhow::Result<()> {
    tx.execute(
        sqlx::query(
            r#"
            INSERT INTO subscriptions
                (id, owner_id, tier, period, status, price, renewal_allowed, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(subscription.id)
        .bind(subscription.owner_id)
        .bind(subscription.tier)
        .bind(subscription.period)
        .bind(subscription.status)
        .bind(subscription.price)
        .bind(subscription.renewal_allowed)
        .bind(subscription.created_at),
    )
    .await
    .context("insert subscription")?;

    Ok(())
}

/// The owner's current active subscription, if any.
pub async fn find_active_by_owner(
    db: &PgPool,
    owner_id: Uuid,
) -> anyhow::Result<Option<Subscription>> {
    let subscription = sqlx::query_as::<_, Subscription>(
        r#"
        SELECT id, owner_id, tier, period, status, price, renewal_allowed, created_at
        FROM subscriptions
        WHERE owner_id = $1 AND status = $2
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(owner_id)
    .bind(SubscriptionStatus::Active)
    .fetch_optional(db)
    .await
    .context("find active subscription by owner")?;
    Ok(subscription)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_subscription_is_free_monthly_and_active() {
        let owner = Uuid::new_v4();
        let sub = Subscription::default_for(owner);
        assert_eq!(sub.owner_id, owner);
        assert_eq!(sub.tier, SubscriptionTier::Default);
        assert_eq!(sub.period, SubscriptionPeriod::Monthly);
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.price, Decimal::ZERO);
        assert!(sub.renewal_allowed);
    }

    #[test]
    fn tier_serializes_in_storage_spelling() {
        assert_eq!(
            serde_json::to_string(&SubscriptionTier::Default).unwrap(),
            "\"DEFAULT\""
        );
        assert_eq!(
            serde_json::to_string(&SubscriptionPeriod::Monthly).unwrap(),
            "\"MONTHLY\""
        );
    }

    #[test]
    fn status_serializes_in_storage_spelling() {
        assert_eq!(
            serde_json::to_string(&SubscriptionStatus::Active).unwrap(),
            "\"ACTIVE\""
        );
        assert_eq!(
            serde_json::to_string(&SubscriptionStatus::Completed).unwrap(),
            "\"COMPLETED\""
        );
        assert_eq!(
            serde_json::to_string(&SubscriptionStatus::Terminated).unwrap(),
            "\"TERMINATED\""
        );
    }
}
