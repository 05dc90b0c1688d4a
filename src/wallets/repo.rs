use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

/// Starting balance granted to every new wallet.
const INITIAL_BALANCE_CENTS: i64 = 2000;
const DEFAULT_CURRENCY: &str = "EUR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "wallet_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum WalletStatus {
    Active,
    Blocked,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Wallet {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub balance: Decimal,
    pub currency: String,
    pub status: WalletStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Wallet {
    /// A fresh active wallet with the starting balance.
    pub fn new_for(owner_id: Uuid) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            balance: Decimal::new(INITIAL_BALANCE_CENTS, 2),
            currency: DEFAULT_CURRENCY.to_string(),
            status: WalletStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Insert a wallet row within the registration transaction.
pub async fn insert_tx(tx: &mut Transaction<'_, Postgres>, wallet: &Wallet) -> anyhow::Result<()> {
    tx.execute(
        sqlx::query(
            r#"
            INSERT INTO wallets (id, owner_id, balance, currency, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(wallet.id)
        .bind(wallet.owner_id)
        .bind(wallet.balance)
        .bind(&wallet.currency)
        .bind(wallet.status)
        .bind(wallet.created_at)
        .bind(wallet.updated_at),
    )
    .await
    .context("insert wallet")?;

    Ok(())
}

/// The owner's wallet, if one exists.
pub async fn find_by_owner(db: &PgPool, owner_id: Uuid) -> anyhow::Result<Option<Wallet>> {
    let wallet = sqlx::query_as::<_, Wallet>(
        r#"
        SELECT id, owner_id, balance, currency, status, created_at, updated_at
        FROM wallets
        WHERE owner_id = $1
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(owner_id)
    .fetch_optional(db)
    .await
    .context("find wallet by owner")?;
    Ok(wallet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_wallet_starts_active_with_initial_balance() {
        let owner = Uuid::new_v4();
        let wallet = Wallet::new_for(owner);
        assert_eq!(wallet.owner_id, owner);
        assert_eq!(wallet.balance, Decimal::new(2000, 2));
        assert_eq!(wallet.balance.to_string(), "20.00");
        assert_eq!(wallet.currency, "EUR");
        assert_eq!(wallet.status, WalletStatus::Active);
        assert_eq!(wallet.created_at, wallet.updated_at);
    }

    #[test]
    fn status_serializes_in_storage_spelling() {
        assert_eq!(
            serde_json::to_string(&WalletStatus::Active).unwrap(),
            "\"ACTIVE\""
        );
        assert_eq!(
            serde_json::to_string(&WalletStatus::Blocked).unwrap(),
            "\"BLOCKED\""
        );
    }
}
