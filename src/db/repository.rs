//! Diesel-backed game store.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::models::{GameChanges, GameRow};
use crate::db::{DbError, schema};
use crate::store::{GameRecord, GameStore, GameUpdate, NewGame};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// SQLite game repository.
///
/// Each call opens its own connection, so the repository is cheap to clone
/// and share. The database must be a file path; `":memory:"` would give
/// every call a fresh empty database.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a repository for an already-migrated database.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Self {
        info!(path = %db_path, "Creating GameRepository");
        Self { db_path }
    }

    /// Opens the database at `db_path` and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip_all)]
    pub fn open(db_path: impl Into<String>) -> Result<Self, DbError> {
        let repo = Self::new(db_path.into());
        repo.run_migrations()?;
        Ok(repo)
    }

    /// Applies any migrations not yet run against the database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))?;
        diesel::sql_query(format!("PRAGMA busy_timeout = {}", BUSY_TIMEOUT_MS))
            .execute(&mut conn)?;
        Ok(conn)
    }
}

impl GameStore for GameRepository {
    #[instrument(skip(self, game), fields(game_id = %game.id(), mode = %game.mode()))]
    fn create(&self, game: NewGame) -> Result<GameRecord, DbError> {
        let row = GameRow::try_from(&game)?;
        let mut conn = self.connection()?;

        let stored = diesel::insert_into(schema::games::table)
            .values(&row)
            .returning(GameRow::as_returning())
            .get_result(&mut conn)?;

        info!("Game created");
        GameRecord::try_from(stored)
    }

    #[instrument(skip(self))]
    fn read(&self, id: &str) -> Result<Option<GameRecord>, DbError> {
        let mut conn = self.connection()?;

        let row = schema::games::table
            .find(id)
            .select(GameRow::as_select())
            .first(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(Some(GameRecord::try_from(row)?)),
            None => {
                debug!("Game not found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, update), fields(status = %update.status()))]
    fn update(&self, id: &str, update: GameUpdate) -> Result<Option<GameRecord>, DbError> {
        let changes = GameChanges::try_from(&update)?;
        let mut conn = self.connection()?;

        let row = diesel::update(schema::games::table.find(id))
            .set(&changes)
            .returning(GameRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        match row {
            Some(row) => {
                debug!("Game updated");
                Ok(Some(GameRecord::try_from(row)?))
            }
            None => {
                debug!("Game not found");
                Ok(None)
            }
        }
    }
}
