use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::error::TestError;

const IN_MEMORY_URL: &str = "sqlite::memory:";

/// An isolated in-memory database, plus an optional session stored in it.
///
/// Both handles are created on first use. Tests that never touch the session never
/// create the session store table.
#[derive(Default)]
pub struct TestContext {
    pub db: Option<DatabaseConnection>,
    pub session: Option<Session>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connection to this context's database, opened on first call.
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        if self.db.is_none() {
            self.db = Some(Database::connect(IN_MEMORY_URL).await?);
        }

        Ok(self.db.as_ref().expect("database was just connected"))
    }

    /// Executes the CREATE TABLE statements collected by `TestBuilder`, in order.
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in &stmts {
            db.execute(stmt).await?;
        }

        Ok(())
    }

    /// A session persisted through the same store the server uses.
    ///
    /// The first call migrates the `tower_sessions` table into the test database.
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        if self.session.is_none() {
            let pool = self.database().await?.get_sqlite_connection_pool().clone();
            let store = SqliteStore::new(pool);

            store
                .migrate()
                .await
                .map_err(|e| TestError::Session(e.to_string()))?;

            self.session = Some(Session::new(
                None,
                Arc::new(store),
                Some(Expiry::OnInactivity(Duration::days(7))),
            ));
        }

        Ok(self.session.as_ref().expect("session was just created"))
    }

    /// Borrows the database and the session together.
    pub async fn db_and_session(&mut self) -> Result<(&DatabaseConnection, &Session), TestError> {
        self.session().await?;

        match (&self.db, &self.session) {
            (Some(db), Some(session)) => Ok((db, session)),
            _ => unreachable!("session() initializes both handles"),
        }
    }
}
