use std::rc::Rc;

use rust_decimal::Decimal;

use common::{GamePlatform, Platform, PlatformRequest};

use super::PlatformRepository;
use crate::db::Gateway;
use crate::error::StoreError;
use crate::models::{DbGamePlatform, DbPlatform};

const SELECT_PLATFORM: &str =
     "SELECT id, platform_name, platform_type, description FROM platform";
const SELECT_LINK: &str = "SELECT game_id, platform_id, release_date, price FROM game_platform";

pub struct PgPlatformRepository {
     gateway: Rc<Gateway>,
}

impl PgPlatformRepository {
     pub fn new(gateway: Rc<Gateway>) -> Self {
          Self { gateway }
     }
}

impl PlatformRepository for PgPlatformRepository {
     fn add(&self, req: &PlatformRequest) -> Result<i32, StoreError> {
          self.gateway.fetch_scalar(
               sqlx::query_scalar::<_, i32>(
                    r#"
                    INSERT INTO platform (platform_name, platform_type, description)
                    VALUES ($1, $2, $3)
                    RETURNING id
                    "#,
               )
               .bind(&req.name)
               .bind(&req.kind)
               .bind(&req.description),
          )
     }

     fn delete(&self, id: i32) -> Result<bool, StoreError> {
          if id <= 0 {
               return Ok(false);
          }
          let affected = self
               .gateway
               .execute(sqlx::query("DELETE FROM platform WHERE id = $1").bind(id))?;
          Ok(affected > 0)
     }

     fn update(&self, id: i32, req: &PlatformRequest) -> Result<bool, StoreError> {
          if id <= 0 {
               return Ok(false);
          }
          let affected = self.gateway.execute(
               sqlx::query(
                    r#"
                    UPDATE platform
                    SET platform_name = $2, platform_type = $3, description = $4
                    WHERE id = $1
                    "#,
               )
               .bind(id)
               .bind(&req.name)
               .bind(&req.kind)
               .bind(&req.description),
          )?;
          Ok(affected > 0)
     }

     fn get_all(&self) -> Result<Vec<Platform>, StoreError> {
          let sql = format!("{} ORDER BY id", SELECT_PLATFORM);
          let records = self
               .gateway
               .fetch_all(sqlx::query_as::<_, DbPlatform>(&sql))?;
          Ok(records.into_iter().map(Platform::from).collect())
     }

     fn get_by_id(&self, id: i32) -> Result<Option<Platform>, StoreError> {
          if id <= 0 {
               return Ok(None);
          }
          let sql = format!("{} WHERE id = $1", SELECT_PLATFORM);
          let record = self
               .gateway
               .fetch_optional(sqlx::query_as::<_, DbPlatform>(&sql).bind(id))?;
          Ok(record.map(Platform::from))
     }

     fn count(&self) -> Result<i64, StoreError> {
          self.gateway
               .fetch_scalar(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM platform"))
     }

     fn link_game(&self, link: &GamePlatform) -> Result<bool, StoreError> {
          if link.game_id <= 0 || link.platform_id <= 0 || link.price < Decimal::ZERO {
               return Ok(false);
          }
          let affected = self.gateway.execute(
               sqlx::query(
                    r#"
                    INSERT INTO game_platform (game_id, platform_id, release_date, price)
                    VALUES ($1, $2, $3, $4)
                    "#,
               )
               .bind(link.game_id)
               .bind(link.platform_id)
               .bind(link.release_date)
               .bind(link.price),
          )?;
          Ok(affected > 0)
     }

     fn unlink_game(&self, game_id: i32, platform_id: i32) -> Result<bool, StoreError> {
          if game_id <= 0 || platform_id <= 0 {
               return Ok(false);
          }
          let affected = self.gateway.execute(
               sqlx::query("DELETE FROM game_platform WHERE game_id = $1 AND platform_id = $2")
                    .bind(game_id)
                    .bind(platform_id),
          )?;
          Ok(affected > 0)
     }

     fn update_link_price(
          &self,
          game_id: i32,
          platform_id: i32,
          price: Decimal,
     ) -> Result<bool, StoreError> {
          if game_id <= 0 || platform_id <= 0 || price < Decimal::ZERO {
               return Ok(false);
          }
          let affected = self.gateway.execute(
               sqlx::query(
                    "UPDATE game_platform SET price = $3 WHERE game_id = $1 AND platform_id = $2",
               )
               .bind(game_id)
               .bind(platform_id)
               .bind(price),
          )?;
          Ok(affected > 0)
     }

     fn platforms_for_game(&self, game_id: i32) -> Result<Vec<GamePlatform>, StoreError> {
          if game_id <= 0 {
               return Ok(Vec::new());
          }
          let sql = format!("{} WHERE game_id = $1 ORDER BY platform_id", SELECT_LINK);
          let records = self
               .gateway
               .fetch_all(sqlx::query_as::<_, DbGamePlatform>(&sql).bind(game_id))?;
          Ok(records.into_iter().map(GamePlatform::from).collect())
     }

     fn games_for_platform(&self, platform_id: i32) -> Result<Vec<GamePlatform>, StoreError> {
          if platform_id <= 0 {
               return Ok(Vec::new());
          }
          let sql = format!("{} WHERE platform_id = $1 ORDER BY game_id", SELECT_LINK);
          let records = self
               .gateway
               .fetch_all(sqlx::query_as::<_, DbGamePlatform>(&sql).bind(platform_id))?;
          Ok(records.into_iter().map(GamePlatform::from).collect())
     }
}
