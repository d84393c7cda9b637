use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use opentelemetry::{KeyValue, trace::get_active_span};
use pollbuddy_core::db::StoreError;
use serde_json::json;

#[derive(Debug, Display)]
#[display("status: {status}, detail: {detail}")]
pub struct ErrorResponse {
    pub status:  u16,
    pub detail:  String,
    pub headers: actix_web::http::header::HeaderMap
}

impl Default for ErrorResponse {
    fn default() -> Self {
        ErrorResponse {
            status:  500,
            detail:  "Internal Server Error".to_string(),
            headers: actix_web::http::header::HeaderMap::new()
        }
    }
}

impl ErrorResponse {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        ErrorResponse {
            status: 400,
            detail: detail.into(),
            ..Default::default()
        }
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        let mut headers = actix_web::http::header::HeaderMap::new();

        headers.insert(
            actix_web::http::header::WWW_AUTHENTICATE,
            actix_web::http::header::HeaderValue::from_static("Bearer")
        );

        ErrorResponse {
            status: 401,
            detail: detail.into(),
            headers
        }
    }

    pub fn forbidden() -> Self {
        ErrorResponse {
            status: 403,
            detail: "Forbidden".to_string(),
            ..Default::default()
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        ErrorResponse {
            status: 404,
            detail: detail.into(),
            ..Default::default()
        }
    }
}

impl ResponseError for ErrorResponse {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        let mut response =
            HttpResponse::build(self.status_code()).json(json!({
                "result": "fail",
                "data": null,
                "error": self.detail
            }));

        for (key, value) in self.headers.iter() {
            response.headers_mut().insert(key.clone(), value.clone());
        }

        response
    }
}

impl From<StoreError> for ErrorResponse {
    fn from(error: StoreError) -> Self {
        // ? the client only gets the status, the cause goes to stderr
        // ? and the request span
        eprintln!("{error}");

        get_active_span(|span| {
            span.add_event("store error", vec![KeyValue::new(
                "error.message",
                error.to_string()
            )]);
        });

        ErrorResponse {
            status: 500,
            detail: "Database Error".to_string(),
            ..Default::default()
        }
    }
}
