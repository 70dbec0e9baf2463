use std::rc::Rc;

use common::{Category, CategoryRequest};

use super::CategoryRepository;
use crate::db::Gateway;
use crate::error::StoreError;
use crate::models::DbCategory;

pub struct PgCategoryRepository {
     gateway: Rc<Gateway>,
}

impl PgCategoryRepository {
     pub fn new(gateway: Rc<Gateway>) -> Self {
          Self { gateway }
     }
}

impl CategoryRepository for PgCategoryRepository {
     fn add(&self, req: &CategoryRequest) -> Result<i32, StoreError> {
          self.gateway.fetch_scalar(
               sqlx::query_scalar::<_, i32>(
                    "INSERT INTO category (category_name, description) VALUES ($1, $2) RETURNING id",
               )
               .bind(&req.name)
               .bind(&req.description),
          )
     }

     fn delete(&self, id: i32) -> Result<bool, StoreError> {
          if id <= 0 {
               return Ok(false);
          }
          let affected = self
               .gateway
               .execute(sqlx::query("DELETE FROM category WHERE id = $1").bind(id))?;
          Ok(affected > 0)
     }

     fn update(&self, id: i32, req: &CategoryRequest) -> Result<bool, StoreError> {
          if id <= 0 {
               return Ok(false);
          }
          let affected = self.gateway.execute(
               sqlx::query("UPDATE category SET category_name = $2, description = $3 WHERE id = $1")
                    .bind(id)
                    .bind(&req.name)
                    .bind(&req.description),
          )?;
          Ok(affected > 0)
     }

     fn get_all(&self) -> Result<Vec<Category>, StoreError> {
          let records = self.gateway.fetch_all(sqlx::query_as::<_, DbCategory>(
               "SELECT id, category_name, description FROM category ORDER BY id",
          ))?;
          Ok(records.into_iter().map(Category::from).collect())
     }

     fn get_by_id(&self, id: i32) -> Result<Option<Category>, StoreError> {
          if id <= 0 {
               return Ok(None);
          }
          let record = self.gateway.fetch_optional(
               sqlx::query_as::<_, DbCategory>(
                    "SELECT id, category_name, description FROM category WHERE id = $1",
               )
               .bind(id),
          )?;
          Ok(record.map(Category::from))
     }

     fn count(&self) -> Result<i64, StoreError> {
          self.gateway
               .fetch_scalar(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM category"))
     }
}
