//! Diesel row structs. Internal to the persistence adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde_json::Value;

use super::schema::{evaluations, guards, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub userid: Option<String>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub userid: Option<&'a str>,
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = guards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GuardRow {
    pub id: i32,
    pub guard_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = guards)]
pub(crate) struct NewGuardRow<'a> {
    pub guard_id: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = evaluations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EvaluationRow {
    pub id: i32,
    pub client_id: String,
    pub guard_id: String,
    pub kpi_scores: Value,
    pub total_score: Decimal,
    pub editable_until: DateTime<Utc>,
    pub remarks: Option<String>,
    pub evaluated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = evaluations)]
pub(crate) struct NewEvaluationRow<'a> {
    pub client_id: &'a str,
    pub guard_id: &'a str,
    pub kpi_scores: Value,
    pub total_score: Decimal,
    pub editable_until: DateTime<Utc>,
    pub remarks: Option<&'a str>,
    pub evaluated_by: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of the scored columns. `None` fields are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = evaluations)]
pub(crate) struct EvaluationUpdate<'a> {
    pub kpi_scores: Option<Value>,
    pub total_score: Option<Decimal>,
    pub remarks: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}
