//! PostgreSQL-backed [`UserRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, User, UserId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

diesel::define_sql_function!(fn lower(x: Nullable<Text>) -> Nullable<Text>);

#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    match classify_diesel_error(&error) {
        DieselFailure::UniqueViolation => {
            UserRepositoryError::duplicate("email or login id is already registered")
        }
        DieselFailure::Connection(message) => UserRepositoryError::connection(message),
        DieselFailure::Query(message) => UserRepositoryError::query(message),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let role = row
        .role
        .parse()
        .map_err(|err| UserRepositoryError::query(format!("user {}: {err}", row.id)))?;
    Ok(User {
        id: UserId::new(row.id),
        login_id: row.userid,
        name: row.name,
        email: row.email,
        password_hash: row.password,
        role,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_login_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let needle = identifier.to_lowercase();
        let row = users::table
            .filter(
                lower(users::email.nullable())
                    .eq(needle.as_str())
                    .or(lower(users::userid).eq(needle.as_str())),
            )
            .order(users::id.asc())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            userid: user.login_id(),
            name: user.name(),
            email: user.email(),
            password: user.password_hash(),
            role: user.role().as_str(),
        };
        let inserted = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_user(inserted)
    }
}
