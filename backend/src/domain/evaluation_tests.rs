//! Unit tests for evaluation value objects and the edit window.

use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;

#[fixture]
fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

fn draft<'a>(guard_id: &'a str, client_id: &'a str) -> EvaluationDraft<'a> {
    EvaluationDraft {
        guard_id,
        client_id,
        ..EvaluationDraft::default()
    }
}

fn evaluation(created_at: DateTime<Utc>) -> Evaluation {
    let record = NewEvaluationRecord::stamped(
        NewEvaluation::try_from_draft(draft("G1", "C1")).expect("valid draft"),
        created_at,
    );
    Evaluation {
        id: EvaluationId::new(1),
        guard: record.evaluation.guard,
        client: record.evaluation.client,
        kpi_scores: record.evaluation.kpi_scores,
        total_score: record.evaluation.total_score,
        remarks: record.evaluation.remarks,
        evaluated_by: record.evaluation.evaluated_by,
        editable_until: record.editable_until,
        created_at: record.created_at,
        updated_at: record.created_at,
    }
}

#[rstest]
fn draft_defaults_optional_fields() {
    let new = NewEvaluation::try_from_draft(draft("G1", "C1")).expect("valid draft");
    assert_eq!(new.kpi_scores, KpiScores::default());
    assert_eq!(new.total_score.to_string(), "0.00");
    assert!(new.remarks.is_none());
    assert!(new.evaluated_by.is_none());
}

#[rstest]
#[case("", "C1", "guard_id")]
#[case("G1", "  ", "client_id")]
#[case("", "", "guard_id")]
fn draft_requires_references(#[case] guard: &str, #[case] client: &str, #[case] field: &str) {
    let err = NewEvaluation::try_from_draft(draft(guard, client)).expect_err("missing reference");
    assert!(err.is_missing_reference());
    assert_eq!(err.field(), field);
}

#[rstest]
fn draft_rejects_non_object_scores() {
    let err = NewEvaluation::try_from_draft(EvaluationDraft {
        kpi_scores: Some(json!([1, 2, 3])),
        ..draft("G1", "C1")
    })
    .expect_err("array scores");
    assert_eq!(err, EvaluationValidationError::KpiScoresNotObject);
    assert!(!err.is_missing_reference());
}

#[rstest]
fn draft_blank_evaluator_is_absent() {
    let new = NewEvaluation::try_from_draft(EvaluationDraft {
        evaluated_by: Some("   "),
        ..draft("G1", "C1")
    })
    .expect("valid draft");
    assert!(new.evaluated_by.is_none());
}

#[rstest]
#[case(Decimal::new(99_999, 2), true)]
#[case(Decimal::new(-99_999, 2), true)]
#[case(Decimal::ONE_THOUSAND, false)]
#[case(Decimal::new(999_995, 3), false)]
fn total_score_is_bounded(#[case] raw: Decimal, #[case] ok: bool) {
    assert_eq!(TotalScore::new(raw).is_ok(), ok);
}

#[rstest]
fn total_score_rounds_midpoint_away_from_zero() {
    let score = TotalScore::new(Decimal::new(-12_345, 3)).expect("in range");
    assert_eq!(score.to_string(), "-12.35");
}

#[rstest]
fn nul_characters_are_rejected_before_storage() {
    let with_remarks = EvaluationDraft {
        remarks: Some("on\u{0}time".to_owned()),
        ..draft("G1", "C1")
    };
    assert_eq!(
        NewEvaluation::try_from_draft(with_remarks),
        Err(EvaluationValidationError::ContainsNul { field: "remarks" })
    );
    assert_eq!(
        ClientId::new("C\u{0}1"),
        Err(EvaluationValidationError::ContainsNul { field: "client_id" })
    );
    assert_eq!(
        KpiScores::from_value(json!({"nested": {"k\u{0}": 1}})),
        Err(EvaluationValidationError::ContainsNul {
            field: "kpi_scores"
        })
    );
    assert_eq!(
        EvaluationChanges::try_from_parts(None, None, Some("\u{0}".to_owned())),
        Err(EvaluationValidationError::ContainsNul { field: "remarks" })
    );
}

#[rstest]
#[case(Decimal::new(50, 0), "50.00")]
#[case(Decimal::new(875, 1), "87.50")]
#[case(Decimal::ZERO, "0.00")]
fn total_score_keeps_column_scale(#[case] raw: Decimal, #[case] expected: &str) {
    let score = TotalScore::new(raw).expect("in range");
    assert_eq!(score.to_string(), expected);
    assert_eq!(score.value().scale(), 2);
}

#[rstest]
fn stamped_record_sets_deadline_one_day_out(created_at: DateTime<Utc>) {
    let new = NewEvaluation::try_from_draft(draft("G1", "C1")).expect("valid draft");
    let record = NewEvaluationRecord::stamped(new, created_at);
    assert_eq!(record.created_at, created_at);
    assert_eq!(record.editable_until - record.created_at, EDIT_WINDOW);
}

#[rstest]
#[case(TimeDelta::zero(), true)]
#[case(TimeDelta::hours(23) + TimeDelta::minutes(59), true)]
#[case(TimeDelta::hours(24), false)]
#[case(TimeDelta::hours(25), false)]
fn editability_is_strict_at_the_deadline(
    created_at: DateTime<Utc>,
    #[case] elapsed: TimeDelta,
    #[case] editable: bool,
) {
    let evaluation = evaluation(created_at);
    assert_eq!(evaluation.is_editable_at(created_at + elapsed), editable);
}

#[rstest]
fn changes_replace_only_supplied_fields(created_at: DateTime<Utc>) {
    let mut evaluation = evaluation(created_at);
    evaluation.remarks = Some("first".to_owned());
    let changes =
        EvaluationChanges::try_from_parts(Some(json!({"punctuality": 4})), None, None)
            .expect("valid changes");
    let later = created_at + TimeDelta::minutes(5);

    changes.apply_to(&mut evaluation, later);

    assert_eq!(evaluation.kpi_scores.as_map().get("punctuality"), Some(&json!(4)));
    assert_eq!(evaluation.remarks.as_deref(), Some("first"));
    assert_eq!(evaluation.total_score, TotalScore::default());
    assert_eq!(evaluation.updated_at, later);
    assert_eq!(evaluation.editable_until, created_at + EDIT_WINDOW);
}

#[rstest]
fn filter_combines_guard_and_client(created_at: DateTime<Utc>) {
    let evaluation = evaluation(created_at);
    let both = EvaluationFilter {
        guard: Some(GuardCode::new("G1").expect("code")),
        client: Some(ClientId::new("C1").expect("client")),
    };
    let wrong_client = EvaluationFilter {
        client: Some(ClientId::new("C2").expect("client")),
        ..both.clone()
    };
    assert!(both.matches(&evaluation));
    assert!(!wrong_client.matches(&evaluation));
    assert!(EvaluationFilter::default().matches(&evaluation));
}
