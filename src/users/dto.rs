use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::subscriptions::repo::Subscription;
use crate::users::repo_types::{User, UserRole};
use crate::wallets::repo::Wallet;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub country: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
    pub is_active: bool,
    pub country: String,
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            role: u.role,
            is_active: u.is_active,
            country: u.country,
            created_at: u.created_at,
        }
    }
}

/// Query string for the home view.
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub user_id: Uuid,
}

/// The home view: the user plus their wallet and active subscription.
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub user: PublicUser,
    pub wallet: Option<Wallet>,
    pub subscription: Option<Subscription>,
}
