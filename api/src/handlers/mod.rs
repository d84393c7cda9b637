mod group;
mod poll;

use actix_web::{error::JsonPayloadError, web};

pub use group::config as group;
pub use poll::config as poll;

use crate::error::ErrorResponse;

/// Malformed bodies get the same fail envelope as every other error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|error: JsonPayloadError, _| {
        ErrorResponse::bad_request(error.to_string()).into()
    })
}
