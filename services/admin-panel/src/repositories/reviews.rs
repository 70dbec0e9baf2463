use std::rc::Rc;

use rust_decimal::Decimal;

use common::{CreateReviewRequest, Review, UpdateReviewRequest};

use super::ReviewRepository;
use crate::db::Gateway;
use crate::error::StoreError;
use crate::models::DbReview;

const SELECT_REVIEW: &str = r#"
     SELECT id, user_id, game_id, platform_id, review_text, mark, review_date, is_active
     FROM review
"#;

pub struct PgReviewRepository {
     gateway: Rc<Gateway>,
}

impl PgReviewRepository {
     pub fn new(gateway: Rc<Gateway>) -> Self {
          Self { gateway }
     }

     fn list_where(&self, column: &str, id: i32) -> Result<Vec<Review>, StoreError> {
          if id <= 0 {
               return Ok(Vec::new());
          }
          let sql = format!("{} WHERE {} = $1 ORDER BY id", SELECT_REVIEW, column);
          let records = self
               .gateway
               .fetch_all(sqlx::query_as::<_, DbReview>(&sql).bind(id))?;
          Ok(records.into_iter().map(Review::from).collect())
     }
}

impl ReviewRepository for PgReviewRepository {
     fn add(&self, req: &CreateReviewRequest) -> Result<i32, StoreError> {
          self.gateway.fetch_scalar(
               sqlx::query_scalar::<_, i32>(
                    r#"
                    INSERT INTO review (user_id, game_id, platform_id, review_text, mark)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id
                    "#,
               )
               .bind(req.user_id)
               .bind(req.game_id)
               .bind(req.platform_id)
               .bind(&req.text)
               .bind(req.mark),
          )
     }

     fn delete(&self, id: i32) -> Result<bool, StoreError> {
          if id <= 0 {
               return Ok(false);
          }
          let affected = self
               .gateway
               .execute(sqlx::query("DELETE FROM review WHERE id = $1").bind(id))?;
          Ok(affected > 0)
     }

     fn update(&self, id: i32, req: &UpdateReviewRequest) -> Result<bool, StoreError> {
          if id <= 0 {
               return Ok(false);
          }
          let affected = self.gateway.execute(
               sqlx::query("UPDATE review SET review_text = $2, mark = $3 WHERE id = $1")
                    .bind(id)
                    .bind(&req.text)
                    .bind(req.mark),
          )?;
          Ok(affected > 0)
     }

     fn get_all(&self) -> Result<Vec<Review>, StoreError> {
          let sql = format!("{} ORDER BY id", SELECT_REVIEW);
          let records = self
               .gateway
               .fetch_all(sqlx::query_as::<_, DbReview>(&sql))?;
          Ok(records.into_iter().map(Review::from).collect())
     }

     fn get_by_id(&self, id: i32) -> Result<Option<Review>, StoreError> {
          if id <= 0 {
               return Ok(None);
          }
          let sql = format!("{} WHERE id = $1", SELECT_REVIEW);
          let record = self
               .gateway
               .fetch_optional(sqlx::query_as::<_, DbReview>(&sql).bind(id))?;
          Ok(record.map(Review::from))
     }

     fn count(&self) -> Result<i64, StoreError> {
          self.gateway
               .fetch_scalar(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM review"))
     }

     fn for_game(&self, game_id: i32) -> Result<Vec<Review>, StoreError> {
          self.list_where("game_id", game_id)
     }

     fn for_user(&self, user_id: i32) -> Result<Vec<Review>, StoreError> {
          self.list_where("user_id", user_id)
     }

     fn for_platform(&self, platform_id: i32) -> Result<Vec<Review>, StoreError> {
          self.list_where("platform_id", platform_id)
     }

     fn average_mark(&self, game_id: i32) -> Result<Option<Decimal>, StoreError> {
          if game_id <= 0 {
               return Ok(None);
          }
          let avg = self.gateway.fetch_scalar(
               sqlx::query_scalar::<_, Option<Decimal>>(
                    "SELECT ROUND(AVG(mark), 2) FROM review WHERE game_id = $1",
               )
               .bind(game_id),
          )?;
          Ok(avg)
     }

     fn count_for_game(&self, game_id: i32) -> Result<i64, StoreError> {
          if game_id <= 0 {
               return Ok(0);
          }
          self.gateway.fetch_scalar(
               sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM review WHERE game_id = $1")
                    .bind(game_id),
          )
     }
}
