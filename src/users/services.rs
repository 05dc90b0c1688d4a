use anyhow::Context;
use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::DomainError;
use crate::subscriptions::{self, repo::Subscription};
use crate::users::dto::{LoginRequest, RegisterRequest};
use crate::users::password::{hash_password, verify_password};
use crate::users::repo;
use crate::users::repo_types::User;
use crate::wallets::{self, repo::Wallet};

pub(crate) fn is_valid_username(username: &str) -> bool {
    lazy_static! {
        static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9._-]{1,64}$").unwrap();
    }
    USERNAME_RE.is_match(username)
}

/// Pre-flight checks on the registration form.
pub fn validate_registration(req: &RegisterRequest) -> Result<(), String> {
    if req.username.is_empty() {
        return Err("Username is required".into());
    }
    if !is_valid_username(&req.username) {
        return Err("Invalid username".into());
    }
    if req.password.is_empty() {
        return Err("Password is required".into());
    }
    if req.country.trim().is_empty() {
        return Err("Country is required".into());
    }
    Ok(())
}

/// Verify a login attempt against the stored record, if any.
///
/// An unknown username and a wrong password yield the same error so the two
/// cannot be told apart by the caller. The log lines do distinguish them.
fn verify_login(username: &str, stored: Option<User>, password: &str) -> Result<User, DomainError> {
    let Some(user) = stored else {
        warn!(username = %username, "login rejected: unknown username");
        return Err(DomainError::InvalidCredentials);
    };
    if !verify_password(password, &user.password_hash)? {
        warn!(username = %username, "login rejected: wrong password");
        return Err(DomainError::InvalidCredentials);
    }
    Ok(user)
}

fn duplicate_username_or_internal(e: anyhow::Error, username: &str) -> DomainError {
    match e.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            DomainError::UsernameTaken(username.to_string())
        }
        _ => DomainError::Internal(e),
    }
}

/// Check credentials and return the stored user. No session or token is
/// issued here.
pub async fn login(db: &PgPool, req: LoginRequest) -> Result<User, DomainError> {
    let stored = repo::find_by_username(db, &req.username).await?;
    verify_login(&req.username, stored, &req.password)
}

/// Create a new account: the user row plus its default subscription and a
/// fresh wallet, all in one transaction. A failure in any insert rolls the
/// whole registration back.
pub async fn register(db: &PgPool, req: RegisterRequest) -> Result<User, DomainError> {
    if repo::find_by_username(db, &req.username).await?.is_some() {
        warn!(username = %req.username, "registration rejected: username taken");
        return Err(DomainError::UsernameTaken(req.username));
    }

    let hash = hash_password(&req.password)?;
    let user = User::new(&req.username, hash, &req.country);
    let subscription = Subscription::default_for(user.id);
    let wallet = Wallet::new_for(user.id);

    let mut tx = db.begin().await.context("begin registration")?;
    // A concurrent registration can slip past the existence check above;
    // the UNIQUE constraint on username settles the race.
    repo::insert_tx(&mut tx, &user)
        .await
        .map_err(|e| duplicate_username_or_internal(e, &user.username))?;
    subscriptions::repo::insert_tx(&mut tx, &subscription).await?;
    wallets::repo::insert_tx(&mut tx, &wallet).await?;
    tx.commit().await.context("commit registration")?;

    info!(user_id = %user.id, username = %user.username, "created new user account");
    Ok(user)
}

/// Every persisted user.
pub async fn get_all_users(db: &PgPool) -> Result<Vec<User>, DomainError> {
    Ok(repo::list_all(db).await?)
}

fn require_user(id: Uuid, stored: Option<User>) -> Result<User, DomainError> {
    let Some(user) = stored else {
        warn!(user_id = %id, "lookup rejected: unknown user id");
        return Err(DomainError::UserNotFound(id));
    };
    Ok(user)
}

pub async fn get_by_id(db: &PgPool, id: Uuid) -> Result<User, DomainError> {
    require_user(id, repo::get_by_id(db, id).await?)
}
