//! Success envelopes: `{success: true, data}` or `{success: true, message}`.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub success: bool,
    pub data: T,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageEnvelope {
    pub success: bool,
    pub message: String,
}

fn with_data<T: Serialize>(status: StatusCode, data: T) -> HttpResponse {
    HttpResponse::build(status).json(DataEnvelope {
        success: true,
        data,
    })
}

/// `200 OK` with `data`.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    with_data(StatusCode::OK, data)
}

/// `201 Created` with `data`.
pub fn created<T: Serialize>(data: T) -> HttpResponse {
    with_data(StatusCode::CREATED, data)
}

/// `200 OK` with a human-readable confirmation.
pub fn message(text: impl Into<String>) -> HttpResponse {
    HttpResponse::Ok().json(MessageEnvelope {
        success: true,
        message: text.into(),
    })
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use serde_json::{Value, json};

    use super::*;

    async fn body(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body()).await.expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[actix_web::test]
    async fn created_wraps_data() {
        let response = created(json!({"id": 1}));
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body(response).await, json!({"success": true, "data": {"id": 1}}));
    }

    #[actix_web::test]
    async fn message_has_no_data() {
        let response = message("Guard deleted successfully");
        assert_eq!(
            body(response).await,
            json!({"success": true, "message": "Guard deleted successfully"})
        );
    }
}
