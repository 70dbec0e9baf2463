use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use common::{Category, Game, GamePlatform, Platform, Privilege, Review, User};

#[derive(Debug, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "user_privilege", rename_all = "lowercase")]
pub enum DbPrivilege {
    Admin,
    Moderator,
    User,
}

impl From<Privilege> for DbPrivilege {
    fn from(privilege: Privilege) -> Self {
        match privilege {
            Privilege::Admin => DbPrivilege::Admin,
            Privilege::Moderator => DbPrivilege::Moderator,
            Privilege::User => DbPrivilege::User,
        }
    }
}

impl From<DbPrivilege> for Privilege {
    fn from(privilege: DbPrivilege) -> Self {
        match privilege {
            DbPrivilege::Admin => Privilege::Admin,
            DbPrivilege::Moderator => Privilege::Moderator,
            DbPrivilege::User => Privilege::User,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DbUser {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub privilege: DbPrivilege,
    pub is_active: bool,
}

impl From<DbUser> for User {
    fn from(row: DbUser) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            privilege: row.privilege.into(),
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DbGame {
    pub id: i32,
    pub name: String,
    pub release_year: i32,
    pub description: String,
    pub production_cost: Decimal,
    pub category_id: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl From<DbGame> for Game {
    fn from(row: DbGame) -> Self {
        Game {
            id: row.id,
            name: row.name,
            release_year: row.release_year,
            description: row.description,
            production_cost: row.production_cost,
            category_id: row.category_id,
            image_url: row.image_url,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DbCategory {
    pub id: i32,
    pub category_name: String,
    pub description: String,
}

impl From<DbCategory> for Category {
    fn from(row: DbCategory) -> Self {
        Category {
            id: row.id,
            name: row.category_name,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DbPlatform {
    pub id: i32,
    pub platform_name: String,
    pub platform_type: String,
    pub description: String,
}

impl From<DbPlatform> for Platform {
    fn from(row: DbPlatform) -> Self {
        Platform {
            id: row.id,
            name: row.platform_name,
            kind: row.platform_type,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DbGamePlatform {
    pub game_id: i32,
    pub platform_id: i32,
    pub release_date: NaiveDate,
    pub price: Decimal,
}

impl From<DbGamePlatform> for GamePlatform {
    fn from(row: DbGamePlatform) -> Self {
        GamePlatform {
            game_id: row.game_id,
            platform_id: row.platform_id,
            release_date: row.release_date,
            price: row.price,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DbReview {
    pub id: i32,
    pub user_id: i32,
    pub game_id: i32,
    pub platform_id: i32,
    pub review_text: String,
    pub mark: i32,
    pub review_date: DateTime<Utc>,
    pub is_active: bool,
}

impl From<DbReview> for Review {
    fn from(row: DbReview) -> Self {
        Review {
            id: row.id,
            user_id: row.user_id,
            game_id: row.game_id,
            platform_id: row.platform_id,
            text: row.review_text,
            mark: row.mark,
            review_date: row.review_date,
            is_active: row.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privilege_round_trips_through_db_enum() {
        for privilege in Privilege::ALL {
            assert_eq!(Privilege::from(DbPrivilege::from(privilege)), privilege);
        }
    }

    #[test]
    fn platform_row_maps_type_column_to_kind() {
        let platform: Platform = DbPlatform {
            id: 3,
            platform_name: "PlayStation 5".to_string(),
            platform_type: "Console".to_string(),
            description: "Sony home console".to_string(),
        }
        .into();
        assert_eq!(platform.kind, "Console");
        assert_eq!(platform.name, "PlayStation 5");
    }
}
