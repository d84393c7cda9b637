use std::pin::Pin;

use actix_web::{FromRequest, HttpRequest, web};
use pollbuddy_core::db::{ObjectId, Store, StoreError, User};

use crate::error::ErrorResponse;

/// The user making the request. Authentication happens upstream, which
/// forwards the user id in the `Authorization` header.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user: User
}

pub enum CallerValidationError {
    InvalidFormat,
    UnknownUser,
    DatabaseError(StoreError)
}

fn parse_user_id(header: &str) -> Option<ObjectId> {
    let raw = header.strip_prefix("Bearer ").unwrap_or(header).trim();

    ObjectId::parse_str(raw).ok()
}

impl Caller {
    pub async fn new(
        store: &dyn Store,
        header: &str
    ) -> Result<Self, CallerValidationError> {
        let Some(id) = parse_user_id(header) else {
            return Err(CallerValidationError::InvalidFormat);
        };

        match store.find_user(&id).await {
            Ok(Some(user)) => Ok(Self { user }),
            Ok(None) => Err(CallerValidationError::UnknownUser),
            Err(error) => Err(CallerValidationError::DatabaseError(error))
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.user.id
    }
}

impl FromRequest for Caller {
    type Error = ErrorResponse;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(
        request: &HttpRequest,
        _payload: &mut actix_web::dev::Payload
    ) -> Self::Future {
        let Some(header) = request
            .headers()
            .get("Authorization")
            .map(|h| h.to_str().unwrap_or_default().to_string())
        else {
            return Box::pin(async {
                Err(ErrorResponse::unauthorized("Unauthorized"))
            });
        };

        let Some(store) = request.app_data::<web::Data<dyn Store>>().cloned()
        else {
            return Box::pin(async { Err(ErrorResponse::default()) });
        };

        Box::pin(async move {
            match Caller::new(store.get_ref(), &header).await {
                Ok(caller) => Ok(caller),
                Err(CallerValidationError::InvalidFormat) => {
                    Err(ErrorResponse::unauthorized("Invalid user id"))
                }
                Err(CallerValidationError::UnknownUser) => {
                    Err(ErrorResponse::unauthorized("Unknown user"))
                }
                Err(CallerValidationError::DatabaseError(error)) => {
                    Err(error.into())
                }
            }
        })
    }
}
