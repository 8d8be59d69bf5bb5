use lambda_http::http::{header, StatusCode};
use lambda_http::{Body, Error, Response};
use serde::Serialize;

use crate::error::UserError;
use crate::service::UserService;
use crate::types::UserCandidate;

/// GET /getUsers
pub async fn get_users(service: &UserService) -> Result<Response<Body>, Error> {
    match service.list().await {
        Ok(users) => json_response(StatusCode::OK, &users),
        Err(e) => error_response("getting users", e),
    }
}

/// GET /getUserById?userId=
pub async fn get_user_by_id(service: &UserService, user_id: &str) -> Result<Response<Body>, Error> {
    match service.get(user_id).await {
        Ok(user) => json_response(StatusCode::OK, &user),
        Err(e) => error_response("getting user", e),
    }
}

/// POST /createUser
pub async fn create_user(service: &UserService, body: &[u8]) -> Result<Response<Body>, Error> {
    let result = match UserCandidate::from_body(body) {
        Ok(candidate) => service.create(candidate).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(user) => json_response(StatusCode::OK, &user),
        Err(e) => error_response("creating user", e),
    }
}

/// PUT /updateUser?userId=
pub async fn update_user(
    service: &UserService,
    user_id: &str,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    // A missing id is reported ahead of a bad body
    let result = match UserCandidate::from_body(body) {
        Ok(candidate) => service.update(user_id, candidate).await,
        Err(_) if user_id.is_empty() => Err(UserError::MissingId),
        Err(e) => Err(e),
    };

    match result {
        Ok(user) => json_response(StatusCode::OK, &user),
        Err(e) => error_response("updating user", e),
    }
}

/// DELETE /deleteUser?userId=
pub async fn delete_user(service: &UserService, user_id: &str) -> Result<Response<Body>, Error> {
    match service.delete(user_id).await {
        Ok(()) => Ok(Response::builder()
            .status(StatusCode::NO_CONTENT)
            .body(Body::Empty)
            .map_err(Box::new)?),
        Err(e) => error_response("deleting user", e),
    }
}

pub fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(serde_json::to_string(value)?.into())
        .map_err(Box::new)?)
}

pub fn text_response(status: StatusCode, message: &str) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(message.to_string().into())
        .map_err(Box::new)?)
}

/// Map a failed operation to its status and short message.
///
/// Store failures are logged here and reach the caller only as a generic 500.
fn error_response(action: &str, err: UserError) -> Result<Response<Body>, Error> {
    match &err {
        UserError::Store(e) => tracing::error!("Error {}: {}", action, e),
        UserError::InvalidBody(e) => tracing::warn!("Rejected body while {}: {}", action, e),
        _ => tracing::info!("Rejected request while {}: {}", action, err),
    }
    text_response(err.status(), err.public_message())
}
