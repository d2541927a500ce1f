//! HTTP inbound adapter exposing the REST API.
//!
//! Everything except login and the health checks sits behind a bearer token.
//! Responses share the `{success, data | message}` envelope; failures use the
//! error envelope from [`error`].

pub mod auth;
pub mod envelope;
pub mod error;
pub mod evaluations;
pub mod guards;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Mount the API under `/api`, with extractor failures rendered as error
/// envelopes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(validation::json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(validation::query_error_handler))
            .app_data(web::PathConfig::default().error_handler(validation::path_error_handler))
            .service(users::login)
            .service(users::current_user)
            .configure(guards::configure)
            .configure(evaluations::configure),
    );
}
