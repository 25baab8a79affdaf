//! SQLite-backed Pokemon storage.
//!
//! Two adapters over the same pool: [`SqlitePokemonRepo`] for pool-level CRUD
//! and [`SqliteUnitOfWork`] for the transactional battle mutations.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use pokearena_domain::{Pokemon, PokemonId, PokemonKind};

use crate::infrastructure::ports::{BattleTx, PokemonRepo, RepoError, UnitOfWork};

/// Open (creating if needed) the database at `db_path`.
pub async fn connect(db_path: &str) -> Result<SqlitePool, RepoError> {
    SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await
        .map_err(|e| RepoError::database("connect", e))
}

/// Create the schema if it does not exist.
///
/// AUTOINCREMENT keeps ids monotonic so a deleted Pokemon's id is never
/// reused; the CHECK constraints enforce the closed kind set and the
/// `level >= 0` invariant at the storage boundary.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pokemon (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            kind TEXT NOT NULL CHECK (kind IN ('pikachu', 'charmander', 'squirtle')),
            trainer TEXT NOT NULL,
            level INTEGER NOT NULL DEFAULT 1 CHECK (level >= 0)
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| RepoError::database("ensure_schema", e))?;
    Ok(())
}

fn row_to_pokemon(row: &SqliteRow) -> Result<Pokemon, RepoError> {
    let id: i64 = row.get("id");
    let kind: String = row.get("kind");
    let trainer: String = row.get("trainer");
    let level: i64 = row.get("level");

    let kind = PokemonKind::from_str(&kind)
        .map_err(|e| RepoError::ConstraintViolation(e.to_string()))?;
    let level = u32::try_from(level)
        .map_err(|_| RepoError::ConstraintViolation(format!("negative level in row {id}")))?;

    Ok(Pokemon {
        id: PokemonId::from_i64(id),
        kind,
        trainer,
        level,
    })
}

const SELECT_BY_ID: &str = "SELECT id, kind, trainer, level FROM pokemon WHERE id = ?";

/// Pool-level [`PokemonRepo`] implementation.
#[derive(Clone)]
pub struct SqlitePokemonRepo {
    pool: SqlitePool,
}

impl SqlitePokemonRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PokemonRepo for SqlitePokemonRepo {
    async fn get(&self, id: PokemonId) -> Result<Option<Pokemon>, RepoError> {
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get", e))?;

        row.as_ref().map(row_to_pokemon).transpose()
    }

    async fn list(&self) -> Result<Vec<Pokemon>, RepoError> {
        let rows = sqlx::query("SELECT id, kind, trainer, level FROM pokemon ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list", e))?;

        rows.iter().map(row_to_pokemon).collect()
    }

    async fn create(&self, kind: PokemonKind, trainer: &str) -> Result<Pokemon, RepoError> {
        let result = sqlx::query("INSERT INTO pokemon (kind, trainer, level) VALUES (?, ?, ?)")
            .bind(kind.as_str())
            .bind(trainer)
            .bind(i64::from(Pokemon::STARTING_LEVEL))
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("create", e))?;

        Ok(Pokemon {
            id: PokemonId::from_i64(result.last_insert_rowid()),
            kind,
            trainer: trainer.to_string(),
            level: Pokemon::STARTING_LEVEL,
        })
    }

    async fn update_trainer(&self, id: PokemonId, trainer: &str) -> Result<(), RepoError> {
        sqlx::query("UPDATE pokemon SET trainer = ? WHERE id = ?")
            .bind(trainer)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("update_trainer", e))?;
        Ok(())
    }

    async fn update_level(&self, id: PokemonId, level: u32) -> Result<(), RepoError> {
        sqlx::query("UPDATE pokemon SET level = ? WHERE id = ?")
            .bind(i64::from(level))
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("update_level", e))?;
        Ok(())
    }

    async fn delete(&self, id: PokemonId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM pokemon WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete", e))?;
        Ok(())
    }
}

/// [`UnitOfWork`] implementation handing out one sqlx transaction per battle.
pub struct SqliteUnitOfWork {
    pool: SqlitePool,
}

impl SqliteUnitOfWork {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    async fn begin(&self) -> Result<Box<dyn BattleTx>, RepoError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("begin", e))?;
        Ok(Box::new(SqliteBattleTx { tx: Some(tx) }))
    }
}

/// One open transaction. `tx` is `None` once committed or rolled back;
/// dropping it while still open rolls back via sqlx, releasing the
/// connection either way.
pub struct SqliteBattleTx {
    tx: Option<Transaction<'static, Sqlite>>,
}

impl SqliteBattleTx {
    fn tx(&mut self) -> Result<&mut Transaction<'static, Sqlite>, RepoError> {
        self.tx
            .as_mut()
            .ok_or_else(|| RepoError::database("transaction", "transaction already closed"))
    }
}

#[async_trait]
impl BattleTx for SqliteBattleTx {
    async fn get(&mut self, id: PokemonId) -> Result<Option<Pokemon>, RepoError> {
        let tx = self.tx()?;
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id.as_i64())
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| RepoError::database("tx_get", e))?;

        row.as_ref().map(row_to_pokemon).transpose()
    }

    async fn update_level(&mut self, id: PokemonId, level: u32) -> Result<(), RepoError> {
        let tx = self.tx()?;
        sqlx::query("UPDATE pokemon SET level = ? WHERE id = ?")
            .bind(i64::from(level))
            .bind(id.as_i64())
            .execute(&mut **tx)
            .await
            .map_err(|e| RepoError::database("tx_update_level", e))?;
        Ok(())
    }

    async fn delete(&mut self, id: PokemonId) -> Result<(), RepoError> {
        let tx = self.tx()?;
        sqlx::query("DELETE FROM pokemon WHERE id = ?")
            .bind(id.as_i64())
            .execute(&mut **tx)
            .await
            .map_err(|e| RepoError::database("tx_delete", e))?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), RepoError> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| RepoError::database("commit", "transaction already closed"))?;
        tx.commit()
            .await
            .map_err(|e| RepoError::database("commit", e))
    }

    async fn rollback(&mut self) -> Result<(), RepoError> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| RepoError::database("rollback", "transaction already closed"))?;
        tx.rollback()
            .await
            .map_err(|e| RepoError::database("rollback", e))
    }
}
