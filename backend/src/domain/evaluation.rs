//! Evaluation records and the edit window that governs them.
//!
//! An evaluation is editable from creation until `editable_until`, which is
//! fixed at creation to the creation instant plus [`EDIT_WINDOW`]. After
//! that the scored fields are locked; the record may still be deleted.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{GuardCode, GuardValidationError};

/// Time an evaluation stays editable after creation.
pub const EDIT_WINDOW: TimeDelta = TimeDelta::hours(24);
/// Maximum length of a client reference.
pub const CLIENT_ID_MAX: usize = 100;
/// Maximum length of the evaluator reference.
pub const EVALUATED_BY_MAX: usize = 255;
/// Exclusive upper bound on the magnitude of a total score (`numeric(5,2)`).
pub const TOTAL_SCORE_LIMIT: Decimal = Decimal::ONE_THOUSAND;

/// Validation errors for evaluation input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationValidationError {
    #[error(transparent)]
    Guard(#[from] GuardValidationError),
    #[error("client_id must not be empty")]
    EmptyClient,
    #[error("client_id must be at most {max} characters")]
    ClientTooLong { max: usize },
    #[error("kpi_scores must be a JSON object")]
    KpiScoresNotObject,
    #[error("total_score must be greater than -1000 and less than 1000")]
    TotalScoreOutOfRange,
    #[error("evaluated_by must be at most {max} characters")]
    EvaluatedByTooLong { max: usize },
    #[error("{field} must not contain NUL characters")]
    ContainsNul { field: &'static str },
}

impl EvaluationValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Guard(_) => "guard_id",
            Self::EmptyClient | Self::ClientTooLong { .. } => "client_id",
            Self::KpiScoresNotObject => "kpi_scores",
            Self::TotalScoreOutOfRange => "total_score",
            Self::EvaluatedByTooLong { .. } => "evaluated_by",
            Self::ContainsNul { field } => *field,
        }
    }

    /// True when a required reference was missing.
    pub fn is_missing_reference(&self) -> bool {
        matches!(
            self,
            Self::Guard(GuardValidationError::EmptyCode) | Self::EmptyClient
        )
    }
}

/// Storage-assigned evaluation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationId(i32);

impl EvaluationId {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to the client who submitted the evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientId(String);

impl ClientId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EvaluationValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EvaluationValidationError::EmptyClient);
        }
        if trimmed.chars().count() > CLIENT_ID_MAX {
            return Err(EvaluationValidationError::ClientTooLong {
                max: CLIENT_ID_MAX,
            });
        }
        reject_nul(trimmed, "client_id")?;
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClientId {
    type Error = EvaluationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientId> for String {
    fn from(value: ClientId) -> Self {
        value.0
    }
}

/// KPI name to score mapping. Keys and values are not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KpiScores(Map<String, Value>);

impl KpiScores {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Accept any JSON object; reject other JSON values.
    ///
    /// Keys and strings anywhere in the object must be free of NUL, which
    /// `jsonb` cannot store.
    pub fn from_value(value: Value) -> Result<Self, EvaluationValidationError> {
        let Value::Object(map) = value else {
            return Err(EvaluationValidationError::KpiScoresNotObject);
        };
        if object_has_nul(&map) {
            return Err(EvaluationValidationError::ContainsNul {
                field: "kpi_scores",
            });
        }
        Ok(Self(map))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Overall score, always carried at two fraction digits to match the
/// `numeric(5,2)` column.
///
/// # Examples
/// ```
/// use kpi_backend::domain::TotalScore;
/// use rust_decimal::Decimal;
///
/// let score = TotalScore::new(Decimal::new(87125, 3)).unwrap();
/// assert_eq!(score.to_string(), "87.13");
/// assert_eq!(TotalScore::default().to_string(), "0.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TotalScore(Decimal);

impl TotalScore {
    /// Round to two fraction digits (midpoint away from zero) and bound-check.
    pub fn new(value: Decimal) -> Result<Self, EvaluationValidationError> {
        let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if rounded.abs() >= TOTAL_SCORE_LIMIT {
            return Err(EvaluationValidationError::TotalScoreOutOfRange);
        }
        rounded.rescale(2);
        Ok(Self(rounded))
    }

    pub fn value(self) -> Decimal {
        self.0
    }
}

impl Default for TotalScore {
    fn default() -> Self {
        Self(Decimal::new(0, 2))
    }
}

impl fmt::Display for TotalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for TotalScore {
    type Error = EvaluationValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TotalScore> for Decimal {
    fn from(value: TotalScore) -> Self {
        value.0
    }
}

fn reject_nul(value: &str, field: &'static str) -> Result<(), EvaluationValidationError> {
    if value.contains('\0') {
        return Err(EvaluationValidationError::ContainsNul { field });
    }
    Ok(())
}

fn json_has_nul(value: &Value) -> bool {
    match value {
        Value::String(text) => text.contains('\0'),
        Value::Array(items) => items.iter().any(json_has_nul),
        Value::Object(map) => object_has_nul(map),
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    }
}

fn object_has_nul(map: &Map<String, Value>) -> bool {
    map.iter()
        .any(|(key, value)| key.contains('\0') || json_has_nul(value))
}

fn checked_remarks(remarks: Option<String>) -> Result<Option<String>, EvaluationValidationError> {
    if let Some(text) = &remarks {
        reject_nul(text, "remarks")?;
    }
    Ok(remarks)
}

fn bounded_evaluator(raw: Option<&str>) -> Result<Option<String>, EvaluationValidationError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value.chars().count() > EVALUATED_BY_MAX {
        return Err(EvaluationValidationError::EvaluatedByTooLong {
            max: EVALUATED_BY_MAX,
        });
    }
    reject_nul(value, "evaluated_by")?;
    Ok(Some(value.to_owned()))
}

/// Raw creation input as received from a caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationDraft<'a> {
    pub guard_id: &'a str,
    pub client_id: &'a str,
    pub kpi_scores: Option<Value>,
    pub total_score: Option<Decimal>,
    pub remarks: Option<String>,
    pub evaluated_by: Option<&'a str>,
}

/// Validated evaluation content, before timestamps are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvaluation {
    pub guard: GuardCode,
    pub client: ClientId,
    pub kpi_scores: KpiScores,
    pub total_score: TotalScore,
    pub remarks: Option<String>,
    pub evaluated_by: Option<String>,
}

impl NewEvaluation {
    /// Validate a draft, applying defaults for omitted optional fields.
    ///
    /// References are checked first so a request missing both reports the
    /// missing reference rather than a secondary field.
    pub fn try_from_draft(draft: EvaluationDraft<'_>) -> Result<Self, EvaluationValidationError> {
        let guard = GuardCode::new(draft.guard_id)?;
        let client = ClientId::new(draft.client_id)?;
        let kpi_scores = draft
            .kpi_scores
            .map(KpiScores::from_value)
            .transpose()?
            .unwrap_or_default();
        let total_score = draft
            .total_score
            .map(TotalScore::new)
            .transpose()?
            .unwrap_or_default();
        let evaluated_by = bounded_evaluator(draft.evaluated_by)?;
        let remarks = checked_remarks(draft.remarks)?;
        Ok(Self {
            guard,
            client,
            kpi_scores,
            total_score,
            remarks,
            evaluated_by,
        })
    }
}

/// A new evaluation stamped with its creation instant and edit deadline.
///
/// This is the only place `editable_until` is computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvaluationRecord {
    pub evaluation: NewEvaluation,
    pub created_at: DateTime<Utc>,
    pub editable_until: DateTime<Utc>,
}

impl NewEvaluationRecord {
    pub fn stamped(evaluation: NewEvaluation, now: DateTime<Utc>) -> Self {
        Self {
            evaluation,
            created_at: now,
            editable_until: now + EDIT_WINDOW,
        }
    }
}

/// A persisted evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub guard: GuardCode,
    pub client: ClientId,
    pub kpi_scores: KpiScores,
    pub total_score: TotalScore,
    pub remarks: Option<String>,
    pub evaluated_by: Option<String>,
    pub editable_until: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Evaluation {
    /// Whether scored fields may still change at `now`. Strict: the bound
    /// itself is already locked.
    pub fn is_editable_at(&self, now: DateTime<Utc>) -> bool {
        now < self.editable_until
    }
}

/// Partial update of the scored fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationChanges {
    pub kpi_scores: Option<KpiScores>,
    pub total_score: Option<TotalScore>,
    pub remarks: Option<String>,
}

impl EvaluationChanges {
    pub fn try_from_parts(
        kpi_scores: Option<Value>,
        total_score: Option<Decimal>,
        remarks: Option<String>,
    ) -> Result<Self, EvaluationValidationError> {
        Ok(Self {
            kpi_scores: kpi_scores.map(KpiScores::from_value).transpose()?,
            total_score: total_score.map(TotalScore::new).transpose()?,
            remarks: checked_remarks(remarks)?,
        })
    }

    /// Apply the supplied fields to `evaluation`, stamping `updated_at`.
    pub fn apply_to(&self, evaluation: &mut Evaluation, now: DateTime<Utc>) {
        if let Some(scores) = &self.kpi_scores {
            evaluation.kpi_scores = scores.clone();
        }
        if let Some(total) = self.total_score {
            evaluation.total_score = total;
        }
        if let Some(remarks) = &self.remarks {
            evaluation.remarks = Some(remarks.clone());
        }
        evaluation.updated_at = now;
    }
}

/// Optional list filters, AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationFilter {
    pub guard: Option<GuardCode>,
    pub client: Option<ClientId>,
}

impl EvaluationFilter {
    pub fn matches(&self, evaluation: &Evaluation) -> bool {
        self.guard.as_ref().is_none_or(|g| *g == evaluation.guard)
            && self.client.as_ref().is_none_or(|c| *c == evaluation.client)
    }
}

#[cfg(test)]
#[path = "evaluation_tests.rs"]
mod tests;
