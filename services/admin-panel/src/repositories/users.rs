use std::rc::Rc;

use common::{CreateUserRequest, Privilege, UpdateUserRequest, User};

use super::UserRepository;
use crate::db::Gateway;
use crate::error::StoreError;
use crate::models::{DbPrivilege, DbUser};

const SELECT_USER: &str = r#"
     SELECT id, username, password_hash, privilege, is_active
     FROM users
"#;

pub struct PgUserRepository {
     gateway: Rc<Gateway>,
}

impl PgUserRepository {
     pub fn new(gateway: Rc<Gateway>) -> Self {
          Self { gateway }
     }
}

impl UserRepository for PgUserRepository {
     fn add(&self, req: &CreateUserRequest) -> Result<i32, StoreError> {
          self.gateway.fetch_scalar(
               sqlx::query_scalar::<_, i32>(
                    r#"
                    INSERT INTO users (username, password_hash, privilege)
                    VALUES ($1, $2, $3)
                    RETURNING id
                    "#,
               )
               .bind(&req.username)
               .bind(&req.password_hash)
               .bind(DbPrivilege::from(req.privilege)),
          )
     }

     fn delete(&self, id: i32) -> Result<bool, StoreError> {
          if id <= 0 {
               return Ok(false);
          }
          let affected = self
               .gateway
               .execute(sqlx::query("DELETE FROM users WHERE id = $1").bind(id))?;
          Ok(affected > 0)
     }

     fn update(&self, id: i32, req: &UpdateUserRequest) -> Result<bool, StoreError> {
          if id <= 0 {
               return Ok(false);
          }
          let affected = self.gateway.execute(
               sqlx::query("UPDATE users SET username = $2, privilege = $3 WHERE id = $1")
                    .bind(id)
                    .bind(&req.username)
                    .bind(DbPrivilege::from(req.privilege)),
          )?;
          Ok(affected > 0)
     }

     fn update_privilege(&self, id: i32, privilege: Privilege) -> Result<bool, StoreError> {
          if id <= 0 {
               return Ok(false);
          }
          let affected = self.gateway.execute(
               sqlx::query("UPDATE users SET privilege = $2 WHERE id = $1")
                    .bind(id)
                    .bind(DbPrivilege::from(privilege)),
          )?;
          Ok(affected > 0)
     }

     fn get_all(&self) -> Result<Vec<User>, StoreError> {
          let sql = format!("{} ORDER BY id", SELECT_USER);
          let records = self
               .gateway
               .fetch_all(sqlx::query_as::<_, DbUser>(&sql))?;
          Ok(records.into_iter().map(User::from).collect())
     }

     fn get_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
          if id <= 0 {
               return Ok(None);
          }
          let sql = format!("{} WHERE id = $1", SELECT_USER);
          let record = self
               .gateway
               .fetch_optional(sqlx::query_as::<_, DbUser>(&sql).bind(id))?;
          Ok(record.map(User::from))
     }

     fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
          if username.is_empty() {
               return Ok(None);
          }
          let sql = format!("{} WHERE username = $1", SELECT_USER);
          let record = self
               .gateway
               .fetch_optional(sqlx::query_as::<_, DbUser>(&sql).bind(username))?;
          Ok(record.map(User::from))
     }

     fn username_exists(&self, username: &str) -> Result<bool, StoreError> {
          if username.is_empty() {
               return Ok(false);
          }
          let count = self.gateway.fetch_scalar(
               sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE username = $1")
                    .bind(username),
          )?;
          Ok(count > 0)
     }

     fn count(&self) -> Result<i64, StoreError> {
          self.gateway
               .fetch_scalar(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users"))
     }
}
