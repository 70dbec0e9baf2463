//! Per-entity persistence.
//!
//! Every repository follows the same contract: `get_by_id` answers `Ok(None)`
//! for unknown or non-positive ids instead of failing, listings are empty
//! rather than absent, `add` returns the new row id, and `delete`/`update`
//! return `Ok(false)` when no row changed. Anything else the store reports
//! comes back as a [`StoreError`].

use std::rc::Rc;

use rust_decimal::Decimal;

use common::{
    Category, CategoryRequest, CreateGameRequest, CreateReviewRequest, CreateUserRequest, Game,
    GamePlatform, Platform, PlatformRequest, Privilege, Review, UpdateGameRequest,
    UpdateReviewRequest, UpdateUserRequest, User,
};

use crate::db::Gateway;
use crate::error::StoreError;

mod categories;
mod games;
mod platforms;
mod reviews;
mod users;

pub use categories::PgCategoryRepository;
pub use games::PgGameRepository;
pub use platforms::PgPlatformRepository;
pub use reviews::PgReviewRepository;
pub use users::PgUserRepository;

pub trait UserRepository {
    fn add(&self, req: &CreateUserRequest) -> Result<i32, StoreError>;
    fn delete(&self, id: i32) -> Result<bool, StoreError>;
    fn update(&self, id: i32, req: &UpdateUserRequest) -> Result<bool, StoreError>;
    fn update_privilege(&self, id: i32, privilege: Privilege) -> Result<bool, StoreError>;
    fn get_all(&self) -> Result<Vec<User>, StoreError>;
    fn get_by_id(&self, id: i32) -> Result<Option<User>, StoreError>;
    fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    fn username_exists(&self, username: &str) -> Result<bool, StoreError>;
    fn count(&self) -> Result<i64, StoreError>;
}

pub trait GameRepository {
    fn add(&self, req: &CreateGameRequest) -> Result<i32, StoreError>;
    fn delete(&self, id: i32) -> Result<bool, StoreError>;
    fn update(&self, id: i32, req: &UpdateGameRequest) -> Result<bool, StoreError>;
    fn get_all(&self) -> Result<Vec<Game>, StoreError>;
    fn get_by_id(&self, id: i32) -> Result<Option<Game>, StoreError>;
    fn get_by_category(&self, category_id: i32) -> Result<Vec<Game>, StoreError>;
    fn count(&self) -> Result<i64, StoreError>;
}

pub trait CategoryRepository {
    fn add(&self, req: &CategoryRequest) -> Result<i32, StoreError>;
    fn delete(&self, id: i32) -> Result<bool, StoreError>;
    fn update(&self, id: i32, req: &CategoryRequest) -> Result<bool, StoreError>;
    fn get_all(&self) -> Result<Vec<Category>, StoreError>;
    fn get_by_id(&self, id: i32) -> Result<Option<Category>, StoreError>;
    fn count(&self) -> Result<i64, StoreError>;
}

pub trait PlatformRepository {
    fn add(&self, req: &PlatformRequest) -> Result<i32, StoreError>;
    fn delete(&self, id: i32) -> Result<bool, StoreError>;
    fn update(&self, id: i32, req: &PlatformRequest) -> Result<bool, StoreError>;
    fn get_all(&self) -> Result<Vec<Platform>, StoreError>;
    fn get_by_id(&self, id: i32) -> Result<Option<Platform>, StoreError>;
    fn count(&self) -> Result<i64, StoreError>;

    fn link_game(&self, link: &GamePlatform) -> Result<bool, StoreError>;
    fn unlink_game(&self, game_id: i32, platform_id: i32) -> Result<bool, StoreError>;
    fn update_link_price(
        &self,
        game_id: i32,
        platform_id: i32,
        price: Decimal,
    ) -> Result<bool, StoreError>;
    fn platforms_for_game(&self, game_id: i32) -> Result<Vec<GamePlatform>, StoreError>;
    fn games_for_platform(&self, platform_id: i32) -> Result<Vec<GamePlatform>, StoreError>;
}

pub trait ReviewRepository {
    fn add(&self, req: &CreateReviewRequest) -> Result<i32, StoreError>;
    fn delete(&self, id: i32) -> Result<bool, StoreError>;
    fn update(&self, id: i32, req: &UpdateReviewRequest) -> Result<bool, StoreError>;
    fn get_all(&self) -> Result<Vec<Review>, StoreError>;
    fn get_by_id(&self, id: i32) -> Result<Option<Review>, StoreError>;
    fn count(&self) -> Result<i64, StoreError>;

    fn for_game(&self, game_id: i32) -> Result<Vec<Review>, StoreError>;
    fn for_user(&self, user_id: i32) -> Result<Vec<Review>, StoreError>;
    fn for_platform(&self, platform_id: i32) -> Result<Vec<Review>, StoreError>;
    /// `None` when the game has no reviews.
    fn average_mark(&self, game_id: i32) -> Result<Option<Decimal>, StoreError>;
    fn count_for_game(&self, game_id: i32) -> Result<i64, StoreError>;
}

/// The repositories one console session works against.
pub struct Catalog {
    pub users: Box<dyn UserRepository>,
    pub games: Box<dyn GameRepository>,
    pub categories: Box<dyn CategoryRepository>,
    pub platforms: Box<dyn PlatformRepository>,
    pub reviews: Box<dyn ReviewRepository>,
}

impl Catalog {
    pub fn postgres(gateway: Rc<Gateway>) -> Self {
        Self {
            users: Box::new(PgUserRepository::new(gateway.clone())),
            games: Box::new(PgGameRepository::new(gateway.clone())),
            categories: Box::new(PgCategoryRepository::new(gateway.clone())),
            platforms: Box::new(PgPlatformRepository::new(gateway.clone())),
            reviews: Box::new(PgReviewRepository::new(gateway)),
        }
    }
}
