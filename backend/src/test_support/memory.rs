//! In-memory Record Store adapters.
//!
//! They honour the same contracts as the Diesel adapters: case-insensitive
//! user lookup, unique guard codes, newest-first listings, and the
//! conditional edit-window update.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::ports::{
    EvaluationRepository, EvaluationRepositoryError, GuardRepository, GuardRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    Evaluation, EvaluationChanges, EvaluationFilter, EvaluationId, Guard, GuardCode, GuardId,
    NewEvaluationRecord, NewGuard, NewUser, User, UserId,
};

struct Table<T> {
    rows: Vec<T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn lock<T>(table: &Mutex<Table<T>>) -> MutexGuard<'_, Table<T>> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Users keyed by case-insensitive email and login id.
pub struct InMemoryUserRepository {
    users: Mutex<Table<User>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryUserRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            users: Mutex::new(Table::default()),
            clock,
        }
    }
}

fn same_identifier(stored: Option<&str>, candidate: &str) -> bool {
    stored.is_some_and(|value| value.to_lowercase() == candidate.to_lowercase())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_login_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let users = lock(&self.users);
        Ok(users
            .rows
            .iter()
            .find(|user| {
                same_identifier(Some(&user.email), identifier)
                    || same_identifier(user.login_id.as_deref(), identifier)
            })
            .cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut users = lock(&self.users);
        let clash = users.rows.iter().any(|existing| {
            same_identifier(Some(&existing.email), user.email())
                || user
                    .login_id()
                    .is_some_and(|login| same_identifier(existing.login_id.as_deref(), login))
        });
        if clash {
            return Err(UserRepositoryError::duplicate(user.email()));
        }
        let now = self.clock.utc();
        let stored = User {
            id: UserId::new(users.allocate_id()),
            login_id: user.login_id().map(str::to_owned),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            password_hash: user.password_hash().to_owned(),
            role: user.role(),
            created_at: now,
            updated_at: now,
        };
        users.rows.push(stored.clone());
        Ok(stored)
    }
}

/// Guards with a unique code constraint.
pub struct InMemoryGuardRepository {
    guards: Mutex<Table<Guard>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryGuardRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            guards: Mutex::new(Table::default()),
            clock,
        }
    }
}

#[async_trait]
impl GuardRepository for InMemoryGuardRepository {
    async fn insert(&self, guard: &NewGuard) -> Result<Guard, GuardRepositoryError> {
        let mut guards = lock(&self.guards);
        if guards.rows.iter().any(|existing| existing.code == guard.code) {
            return Err(GuardRepositoryError::duplicate_code(guard.code.as_ref()));
        }
        let now = self.clock.utc();
        let stored = Guard {
            id: GuardId::new(guards.allocate_id()),
            code: guard.code.clone(),
            name: guard.name.clone(),
            created_at: now,
            updated_at: now,
        };
        guards.rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_code(&self, code: &GuardCode) -> Result<Option<Guard>, GuardRepositoryError> {
        let guards = lock(&self.guards);
        Ok(guards.rows.iter().find(|guard| guard.code == *code).cloned())
    }

    async fn find_by_id(&self, id: GuardId) -> Result<Option<Guard>, GuardRepositoryError> {
        let guards = lock(&self.guards);
        Ok(guards.rows.iter().find(|guard| guard.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Guard>, GuardRepositoryError> {
        let guards = lock(&self.guards);
        let mut listed = guards.rows.clone();
        listed.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(listed)
    }

    async fn delete(&self, id: GuardId) -> Result<bool, GuardRepositoryError> {
        let mut guards = lock(&self.guards);
        let before = guards.rows.len();
        guards.rows.retain(|guard| guard.id != id);
        Ok(guards.rows.len() != before)
    }
}

/// Evaluations with the conditional edit-window update.
#[derive(Default)]
pub struct InMemoryEvaluationRepository {
    evaluations: Mutex<Table<Evaluation>>,
}

impl InMemoryEvaluationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EvaluationRepository for InMemoryEvaluationRepository {
    async fn insert(
        &self,
        record: &NewEvaluationRecord,
    ) -> Result<Evaluation, EvaluationRepositoryError> {
        let mut evaluations = lock(&self.evaluations);
        let fields = &record.evaluation;
        let stored = Evaluation {
            id: EvaluationId::new(evaluations.allocate_id()),
            guard: fields.guard.clone(),
            client: fields.client.clone(),
            kpi_scores: fields.kpi_scores.clone(),
            total_score: fields.total_score,
            remarks: fields.remarks.clone(),
            evaluated_by: fields.evaluated_by.clone(),
            editable_until: record.editable_until,
            created_at: record.created_at,
            updated_at: record.created_at,
        };
        evaluations.rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: EvaluationId,
    ) -> Result<Option<Evaluation>, EvaluationRepositoryError> {
        let evaluations = lock(&self.evaluations);
        Ok(evaluations.rows.iter().find(|e| e.id == id).cloned())
    }

    async fn list(
        &self,
        filter: &EvaluationFilter,
    ) -> Result<Vec<Evaluation>, EvaluationRepositoryError> {
        let evaluations = lock(&self.evaluations);
        let mut listed: Vec<Evaluation> = evaluations
            .rows
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        listed.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(listed)
    }

    async fn update_editable(
        &self,
        id: EvaluationId,
        changes: &EvaluationChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Evaluation>, EvaluationRepositoryError> {
        let mut evaluations = lock(&self.evaluations);
        let Some(row) = evaluations
            .rows
            .iter_mut()
            .find(|e| e.id == id && e.is_editable_at(now))
        else {
            return Ok(None);
        };
        changes.apply_to(row, now);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: EvaluationId) -> Result<bool, EvaluationRepositoryError> {
        let mut evaluations = lock(&self.evaluations);
        let before = evaluations.rows.len();
        evaluations.rows.retain(|e| e.id != id);
        Ok(evaluations.rows.len() != before)
    }
}
