use actix_web::{
    Error, HttpMessage, ResponseError,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::AUTHORIZATION,
    middleware::Next,
};
use tracing::debug;

use crate::auth::auth::AuthUser;
use crate::auth::token::decode_token;
use crate::error::ApiError;

/// Bearer-token gate for the employee and attendance scopes.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.trim().split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        let resp = ApiError::Auth("Please login first".to_string()).error_response();
        return Ok(req.into_response(resp));
    };

    let user_id = match decode_token(token) {
        Ok(user_id) => user_id,
        Err(e) => {
            debug!(path = %req.path(), "Rejected token");
            return Ok(req.into_response(e.error_response()));
        }
    };

    debug!(user_id, path = %req.path(), "Request authenticated");
    req.extensions_mut().insert(AuthUser { user_id });

    next.call(req).await
}
