use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod models {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Privilege {
        Admin,
        Moderator,
        User,
    }

    impl Privilege {
        pub const ALL: [Privilege; 3] = [Privilege::Admin, Privilege::Moderator, Privilege::User];

        pub fn as_str(&self) -> &'static str {
            match self {
                Privilege::Admin => "admin",
                Privilege::Moderator => "moderator",
                Privilege::User => "user",
            }
        }
    }

    impl std::fmt::Display for Privilege {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.as_str())
        }
    }

    impl std::str::FromStr for Privilege {
        type Err = crate::errors::ModelError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "admin" => Ok(Privilege::Admin),
                "moderator" => Ok(Privilege::Moderator),
                "user" => Ok(Privilege::User),
                other => Err(crate::errors::ModelError::UnknownPrivilege(other.to_string())),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct User {
        pub id: i32,
        pub username: String,
        pub password_hash: String,
        pub privilege: Privilege,
        pub is_active: bool,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct CreateUserRequest {
        pub username: String,
        pub password_hash: String,
        pub privilege: Privilege,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct UpdateUserRequest {
        pub username: String,
        pub privilege: Privilege,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Game {
        pub id: i32,
        pub name: String,
        pub release_year: i32,
        pub description: String,
        pub production_cost: Decimal,
        pub category_id: i32,
        pub image_url: Option<String>,
        pub is_active: bool,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct CreateGameRequest {
        pub name: String,
        pub release_year: i32,
        pub description: String,
        pub production_cost: Decimal,
        pub category_id: i32,
        pub image_url: Option<String>,
    }

    /// Category is fixed at creation; there is no way to move a game to another one.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct UpdateGameRequest {
        pub name: String,
        pub release_year: i32,
        pub description: String,
        pub production_cost: Decimal,
        pub image_url: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Category {
        pub id: i32,
        pub name: String,
        pub description: String,
    }

    /// Used for both creating and updating a category.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct CategoryRequest {
        pub name: String,
        pub description: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Platform {
        pub id: i32,
        pub name: String,
        pub kind: String,
        pub description: String,
    }

    /// Used for both creating and updating a platform.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct PlatformRequest {
        pub name: String,
        pub kind: String,
        pub description: String,
    }

    /// A game released on a platform, keyed by the (game, platform) pair.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct GamePlatform {
        pub game_id: i32,
        pub platform_id: i32,
        pub release_date: NaiveDate,
        pub price: Decimal,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Review {
        pub id: i32,
        pub user_id: i32,
        pub game_id: i32,
        pub platform_id: i32,
        pub text: String,
        pub mark: i32,
        pub review_date: DateTime<Utc>,
        pub is_active: bool,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct CreateReviewRequest {
        pub user_id: i32,
        pub game_id: i32,
        pub platform_id: i32,
        pub text: String,
        pub mark: i32,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct UpdateReviewRequest {
        pub text: String,
        pub mark: i32,
    }
}

pub mod utils {
    /// Shortens `text` to at most `max` characters, ending in "..." when cut.
    pub fn truncate(text: &str, max: usize) -> String {
        if text.chars().count() <= max {
            return text.to_string();
        }
        let keep = max.saturating_sub(3);
        let mut out: String = text.chars().take(keep).collect();
        out.push_str("...");
        out
    }

    pub fn status_label(is_active: bool) -> &'static str {
        if is_active {
            "Active"
        } else {
            "Inactive"
        }
    }

}

pub mod errors {
    use thiserror::Error;

    #[derive(Debug, Error, PartialEq, Eq)]
    pub enum ModelError {
        #[error("unknown privilege '{0}' (expected admin, moderator or user)")]
        UnknownPrivilege(String),
    }
}

pub use errors::*;
pub use models::*;
pub use utils::*;
