use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use shared::{ErrorResponse, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("You must be signed in to vote")]
    Unauthorized,
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    RateLimited(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::Unauthorized => Status::Unauthorized,
            ApiError::InvalidRequest(_) => Status::BadRequest,
            ApiError::RateLimited(_) => Status::TooManyRequests,
            ApiError::Internal(_) => Status::InternalServerError,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::InvalidRequest(e.to_string())
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        (status, Json(ErrorResponse::new(self.to_string()))).respond_to(req)
    }
}
