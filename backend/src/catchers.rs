use rocket::{Request, catch, serde::json::Json};
use shared::ErrorResponse;

#[catch(401)]
pub fn unauthorized(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("You must be signed in to vote."))
}

#[catch(429)]
pub fn too_many_requests(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Too many votes. Please wait before trying again."))
}

#[catch(400)]
pub fn bad_request(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Invalid request parameters."))
}

#[catch(422)]
pub fn unprocessable(req: &Request) -> Json<ErrorResponse> {
    let error_msg = match req.uri().path().segments().last() {
        Some("vote") => "Expected a body like {\"vote\": 1} or {\"vote\": -1}.",
        _ => "The request body could not be understood.",
    };
    Json(ErrorResponse::new(error_msg))
}

#[catch(500)]
pub fn internal_error(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("An internal server error occurred."))
}

#[catch(404)]
pub fn not_found(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("The requested resource was not found."))
}
