//! PostgreSQL-backed [`GuardRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{GuardRepository, GuardRepositoryError};
use crate::domain::{Guard, GuardCode, GuardId, GuardName, NewGuard};

use super::diesel_basic_error_mapping::{
    DieselFailure, classify_diesel_error, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{GuardRow, NewGuardRow};
use super::pool::{DbPool, PoolError};
use super::schema::guards;

#[derive(Clone)]
pub struct DieselGuardRepository {
    pool: DbPool,
}

impl DieselGuardRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> GuardRepositoryError {
    map_basic_pool_error(error, GuardRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> GuardRepositoryError {
    map_basic_diesel_error(
        error,
        GuardRepositoryError::query,
        GuardRepositoryError::connection,
    )
}

fn row_to_guard(row: GuardRow) -> Result<Guard, GuardRepositoryError> {
    let decode = |err: crate::domain::GuardValidationError| {
        GuardRepositoryError::query(format!("guard {}: {err}", row.id))
    };
    Ok(Guard {
        id: GuardId::new(row.id),
        code: GuardCode::new(&row.guard_id).map_err(decode)?,
        name: GuardName::new(&row.name).map_err(decode)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl GuardRepository for DieselGuardRepository {
    async fn insert(&self, guard: &NewGuard) -> Result<Guard, GuardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewGuardRow {
            guard_id: guard.code.as_ref(),
            name: guard.name.as_ref(),
        };
        let inserted = diesel::insert_into(guards::table)
            .values(&row)
            .returning(GuardRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match classify_diesel_error(&err) {
                DieselFailure::UniqueViolation => {
                    GuardRepositoryError::duplicate_code(guard.code.as_ref())
                }
                _ => map_diesel_error(err),
            })?;
        row_to_guard(inserted)
    }

    async fn find_by_code(&self, code: &GuardCode) -> Result<Option<Guard>, GuardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        guards::table
            .filter(guards::guard_id.eq(code.as_ref()))
            .select(GuardRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_guard)
            .transpose()
    }

    async fn find_by_id(&self, id: GuardId) -> Result<Option<Guard>, GuardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        guards::table
            .find(id.get())
            .select(GuardRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_guard)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Guard>, GuardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        guards::table
            .order((guards::created_at.desc(), guards::id.desc()))
            .select(GuardRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(row_to_guard)
            .collect()
    }

    async fn delete(&self, id: GuardId) -> Result<bool, GuardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(guards::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
