use std::rc::Rc;

use common::{CreateGameRequest, Game, UpdateGameRequest};

use super::GameRepository;
use crate::db::Gateway;
use crate::error::StoreError;
use crate::models::DbGame;

const SELECT_GAME: &str = r#"
     SELECT id, name, release_year, description, production_cost, category_id, image_url, is_active
     FROM game
"#;

pub struct PgGameRepository {
     gateway: Rc<Gateway>,
}

impl PgGameRepository {
     pub fn new(gateway: Rc<Gateway>) -> Self {
          Self { gateway }
     }
}

impl GameRepository for PgGameRepository {
     fn add(&self, req: &CreateGameRequest) -> Result<i32, StoreError> {
          self.gateway.fetch_scalar(
               sqlx::query_scalar::<_, i32>(
                    r#"
                    INSERT INTO game (name, release_year, description, production_cost, category_id, image_url)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    RETURNING id
                    "#,
               )
               .bind(&req.name)
               .bind(req.release_year)
               .bind(&req.description)
               .bind(req.production_cost)
               .bind(req.category_id)
               .bind(req.image_url.as_deref()),
          )
     }

     fn delete(&self, id: i32) -> Result<bool, StoreError> {
          if id <= 0 {
               return Ok(false);
          }
          let affected = self
               .gateway
               .execute(sqlx::query("DELETE FROM game WHERE id = $1").bind(id))?;
          Ok(affected > 0)
     }

     fn update(&self, id: i32, req: &UpdateGameRequest) -> Result<bool, StoreError> {
          if id <= 0 {
               return Ok(false);
          }
          let affected = self.gateway.execute(
               sqlx::query(
                    r#"
                    UPDATE game
                    SET
                         name = $2,
                         release_year = $3,
                         description = $4,
                         production_cost = $5,
                         image_url = $6
                    WHERE id = $1
                    "#,
               )
               .bind(id)
               .bind(&req.name)
               .bind(req.release_year)
               .bind(&req.description)
               .bind(req.production_cost)
               .bind(req.image_url.as_deref()),
          )?;
          Ok(affected > 0)
     }

     fn get_all(&self) -> Result<Vec<Game>, StoreError> {
          let sql = format!("{} ORDER BY id", SELECT_GAME);
          let records = self
               .gateway
               .fetch_all(sqlx::query_as::<_, DbGame>(&sql))?;
          Ok(records.into_iter().map(Game::from).collect())
     }

     fn get_by_id(&self, id: i32) -> Result<Option<Game>, StoreError> {
          if id <= 0 {
               return Ok(None);
          }
          let sql = format!("{} WHERE id = $1", SELECT_GAME);
          let record = self
               .gateway
               .fetch_optional(sqlx::query_as::<_, DbGame>(&sql).bind(id))?;
          Ok(record.map(Game::from))
     }

     fn get_by_category(&self, category_id: i32) -> Result<Vec<Game>, StoreError> {
          if category_id <= 0 {
               return Ok(Vec::new());
          }
          let sql = format!("{} WHERE category_id = $1 ORDER BY id", SELECT_GAME);
          let records = self
               .gateway
               .fetch_all(sqlx::query_as::<_, DbGame>(&sql).bind(category_id))?;
          Ok(records.into_iter().map(Game::from).collect())
     }

     fn count(&self) -> Result<i64, StoreError> {
          self.gateway
               .fetch_scalar(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM game"))
     }
}
