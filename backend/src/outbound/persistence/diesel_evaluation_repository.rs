//! PostgreSQL-backed [`EvaluationRepository`].
//!
//! The edit-window check for updates is part of the `UPDATE ... WHERE`
//! clause, so a concurrent request cannot slip a write past the deadline.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EvaluationRepository, EvaluationRepositoryError};
use crate::domain::{
    ClientId, Evaluation, EvaluationChanges, EvaluationFilter, EvaluationId, GuardCode, KpiScores,
    NewEvaluationRecord, TotalScore,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{EvaluationRow, EvaluationUpdate, NewEvaluationRow};
use super::pool::{DbPool, PoolError};
use super::schema::evaluations;

#[derive(Clone)]
pub struct DieselEvaluationRepository {
    pool: DbPool,
}

impl DieselEvaluationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EvaluationRepositoryError {
    map_basic_pool_error(error, EvaluationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> EvaluationRepositoryError {
    map_basic_diesel_error(
        error,
        EvaluationRepositoryError::query,
        EvaluationRepositoryError::connection,
    )
}

fn row_to_evaluation(row: EvaluationRow) -> Result<Evaluation, EvaluationRepositoryError> {
    let id = row.id;
    let corrupt = |err: crate::domain::EvaluationValidationError| {
        EvaluationRepositoryError::query(format!("evaluation {id}: {err}"))
    };
    Ok(Evaluation {
        id: EvaluationId::new(row.id),
        guard: GuardCode::new(&row.guard_id).map_err(|err| corrupt(err.into()))?,
        client: ClientId::new(&row.client_id).map_err(corrupt)?,
        kpi_scores: KpiScores::from_value(row.kpi_scores).map_err(corrupt)?,
        total_score: TotalScore::new(row.total_score).map_err(corrupt)?,
        remarks: row.remarks,
        evaluated_by: row.evaluated_by,
        editable_until: row.editable_until,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn load_all(rows: Vec<EvaluationRow>) -> Result<Vec<Evaluation>, EvaluationRepositoryError> {
    rows.into_iter().map(row_to_evaluation).collect()
}

#[async_trait]
impl EvaluationRepository for DieselEvaluationRepository {
    async fn insert(
        &self,
        record: &NewEvaluationRecord,
    ) -> Result<Evaluation, EvaluationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let draft = &record.evaluation;
        let row = NewEvaluationRow {
            client_id: draft.client.as_ref(),
            guard_id: draft.guard.as_ref(),
            kpi_scores: draft.kpi_scores.clone().into_value(),
            total_score: draft.total_score.value(),
            editable_until: record.editable_until,
            remarks: draft.remarks.as_deref(),
            evaluated_by: draft.evaluated_by.as_deref(),
            created_at: record.created_at,
            updated_at: record.created_at,
        };
        let inserted = diesel::insert_into(evaluations::table)
            .values(&row)
            .returning(EvaluationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_evaluation(inserted)
    }

    async fn find_by_id(
        &self,
        id: EvaluationId,
    ) -> Result<Option<Evaluation>, EvaluationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        evaluations::table
            .find(id.get())
            .select(EvaluationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_evaluation)
            .transpose()
    }

    async fn list(
        &self,
        filter: &EvaluationFilter,
    ) -> Result<Vec<Evaluation>, EvaluationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = evaluations::table
            .select(EvaluationRow::as_select())
            .into_boxed::<Pg>();
        if let Some(guard) = &filter.guard {
            query = query.filter(evaluations::guard_id.eq(guard.as_ref().to_owned()));
        }
        if let Some(client) = &filter.client {
            query = query.filter(evaluations::client_id.eq(client.as_ref().to_owned()));
        }
        let rows = query
            .order((evaluations::created_at.desc(), evaluations::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        load_all(rows)
    }

    async fn update_editable(
        &self,
        id: EvaluationId,
        changes: &EvaluationChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Evaluation>, EvaluationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let update = EvaluationUpdate {
            kpi_scores: changes.kpi_scores.clone().map(KpiScores::into_value),
            total_score: changes.total_score.map(TotalScore::value),
            remarks: changes.remarks.as_deref(),
            updated_at: now,
        };
        diesel::update(
            evaluations::table
                .filter(evaluations::id.eq(id.get()))
                .filter(evaluations::editable_until.gt(now)),
        )
        .set(&update)
        .returning(EvaluationRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?
        .map(row_to_evaluation)
        .transpose()
    }

    async fn delete(&self, id: EvaluationId) -> Result<bool, EvaluationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(evaluations::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
