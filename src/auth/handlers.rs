use crate::{
    auth::{
        password::{hash_password, verify_password},
        token::issue_token,
    },
    error::ApiError,
    models::{ApiResponse, LoginReqDto, LoginResponse, RegisterReqDto, RegisteredUser, UserInfo},
    repository::{RepoError, UserRepository},
};
use actix_web::{HttpResponse, web};
use tracing::{debug, error, info, instrument};

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Usernames are stored and looked up without surrounding whitespace.
fn username(value: &Option<String>) -> Option<&str> {
    required(value).map(str::trim)
}

/// Login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Username and password are required"),
        (status = 401, description = "Invalid username or password"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(users, body))]
pub async fn login(
    users: web::Data<dyn UserRepository>,
    body: web::Json<LoginReqDto>,
) -> Result<HttpResponse, ApiError> {
    info!("Login request received");

    let (Some(username), Some(password)) = (username(&body.username), required(&body.password))
    else {
        return Err(ApiError::Validation(
            "Username and password are required".to_string(),
        ));
    };

    debug!(username, "Fetching user from database");

    let invalid = || ApiError::Auth("Invalid username or password".to_string());

    let user = users.find_by_username(username).await?.ok_or_else(|| {
        info!(username, "Invalid credentials: user not found");
        invalid()
    })?;

    if !verify_password(password, &user.password) {
        info!(username, "Invalid credentials: password mismatch");
        return Err(invalid());
    }

    let token = issue_token(user.id);
    info!(user_id = user.id, "Login successful");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        LoginResponse {
            token,
            user: UserInfo {
                id: user.id,
                username: user.username,
                role: user.role,
            },
        },
        "Login successful",
    )))
}

/// Register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterReqDto,
    responses(
        (status = 201, description = "Registration successful", body = RegisteredUser),
        (status = 400, description = "Username and password are required"),
        (status = 409, description = "Username already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn register(
    users: web::Data<dyn UserRepository>,
    body: web::Json<RegisterReqDto>,
) -> Result<HttpResponse, ApiError> {
    let (Some(username), Some(password)) = (username(&body.username), required(&body.password))
    else {
        return Err(ApiError::Validation(
            "Username and password are required".to_string(),
        ));
    };

    let taken = || ApiError::Conflict("Username already exists".to_string());

    if users.find_by_username(username).await?.is_some() {
        return Err(taken());
    }

    let hashed = hash_password(password).map_err(|e| {
        error!(error = %e, "Failed to hash password");
        ApiError::Internal(e.to_string())
    })?;

    // the lookup above is not atomic with the insert; the unique index settles races
    let id = users
        .insert(username, &hashed)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => taken(),
            other => other.into(),
        })?;

    info!(user_id = id, username, "User registered");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        RegisteredUser {
            id,
            username: username.to_string(),
        },
        "Registration successful! You can now login.",
    )))
}

/// Logout
///
/// Tokens are stateless, so there is nothing to revoke.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out successfully")
    ),
    tag = "Auth"
)]
pub async fn logout() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::message("Logged out successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::decode_token;
    use crate::repository::memory::MemoryRepository;
    use actix_web::{App, http::StatusCode, test, web::Data};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn users() -> Data<dyn UserRepository> {
        let repo: Arc<dyn UserRepository> = Arc::new(MemoryRepository::new());
        Data::from(repo)
    }

    #[actix_web::test]
    async fn register_then_login_issues_a_decodable_token() {
        let app = test::init_service(
            App::new()
                .app_data(users())
                .route("/auth/register", web::post().to(register))
                .route("/auth/login", web::post().to(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({ "username": "supervisor", "password": "shift-b" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "username": "supervisor", "password": "shift-b" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["user"]["role"], "user");

        let token = body["data"]["token"].as_str().unwrap();
        assert_eq!(decode_token(token).unwrap(), body["data"]["user"]["id"].as_u64().unwrap());
    }

    #[actix_web::test]
    async fn duplicate_username_conflicts() {
        let app = test::init_service(
            App::new()
                .app_data(users())
                .route("/auth/register", web::post().to(register)),
        )
        .await;

        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let req = test::TestRequest::post()
                .uri("/auth/register")
                .set_json(json!({ "username": "op", "password": "pw" }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), expected);
        }
    }

    #[actix_web::test]
    async fn login_rejects_missing_fields_and_bad_password() {
        let app = test::init_service(
            App::new()
                .app_data(users())
                .route("/auth/register", web::post().to(register))
                .route("/auth/login", web::post().to(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "username": "op" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({ "username": "op", "password": "pw" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "username": "op", "password": "nope" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "success": false, "message": "Invalid username or password" }));
    }

    #[actix_web::test]
    async fn username_whitespace_is_ignored_on_register_and_login() {
        let app = test::init_service(
            App::new()
                .app_data(users())
                .route("/auth/register", web::post().to(register))
                .route("/auth/login", web::post().to(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({ "username": " op ", "password": "pw" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["username"], "op");

        for name in [" op ", "op"] {
            let req = test::TestRequest::post()
                .uri("/auth/login")
                .set_json(json!({ "username": name, "password": "pw" }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{name:?}");
        }

        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({ "username": "op  ", "password": "other" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
    }
}
