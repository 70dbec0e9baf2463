use std::cell::RefCell;

use sqlx::postgres::{PgArguments, PgConnectOptions, PgConnection, PgRow};
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::{Connection, FromRow, Postgres};
use tokio::runtime::{Builder, Runtime};

use crate::config::DatabaseConfig;
use crate::error::{StartupError, StoreError};

/// The single live connection every statement goes through.
///
/// The console is strictly sequential, so the connection sits in a `RefCell`
/// and each call drives its statement to completion on a current-thread
/// runtime before returning.
pub struct Gateway {
    runtime: Runtime,
    conn: RefCell<PgConnection>,
}

pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
}

impl Gateway {
    pub fn connect(config: &DatabaseConfig) -> Result<Self, StartupError> {
        Self::connect_with(connect_options(config))
    }

    pub fn connect_with(options: PgConnectOptions) -> Result<Self, StartupError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(StartupError::Runtime)?;

        let conn = runtime
            .block_on(PgConnection::connect_with(&options))
            .map_err(StartupError::Connect)?;

        log::info!("database connection established");

        Ok(Self {
            runtime,
            conn: RefCell::new(conn),
        })
    }

    pub fn migrate(&self) -> Result<(), StartupError> {
        let mut conn = self.conn.borrow_mut();
        self.runtime
            .block_on(sqlx::migrate!("./migrations").run(&mut *conn))?;
        Ok(())
    }

    pub fn fetch_all<'q, O>(
        &self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> Result<Vec<O>, StoreError>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        let mut conn = self.conn.borrow_mut();
        self.runtime
            .block_on(query.fetch_all(&mut *conn))
            .map_err(query_failed)
    }

    pub fn fetch_optional<'q, O>(
        &self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> Result<Option<O>, StoreError>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        let mut conn = self.conn.borrow_mut();
        self.runtime
            .block_on(query.fetch_optional(&mut *conn))
            .map_err(query_failed)
    }

    pub fn fetch_scalar<'q, O>(
        &self,
        query: QueryScalar<'q, Postgres, O, PgArguments>,
    ) -> Result<O, StoreError>
    where
        O: Send + Unpin,
        (O,): for<'r> FromRow<'r, PgRow>,
    {
        let mut conn = self.conn.borrow_mut();
        self.runtime
            .block_on(query.fetch_one(&mut *conn))
            .map_err(query_failed)
    }

    /// Runs a write and returns the number of rows it changed.
    pub fn execute<'q>(&self, query: Query<'q, Postgres, PgArguments>) -> Result<u64, StoreError> {
        let mut conn = self.conn.borrow_mut();
        self.runtime
            .block_on(query.execute(&mut *conn))
            .map(|done| done.rows_affected())
            .map_err(query_failed)
    }

    pub fn close(self) {
        let Gateway { runtime, conn } = self;
        match runtime.block_on(conn.into_inner().close()) {
            Ok(()) => log::info!("database disconnected"),
            Err(e) => log::warn!("error while closing database connection: {}", e),
        }
    }
}

fn query_failed(err: sqlx::Error) -> StoreError {
    log::error!("query failed: {}", err);
    StoreError::Database(err)
}
