use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, UserProfile};
use crate::dto::{ApiResponse, MessageResponse};
use crate::middleware::ACCESS_TOKEN_COOKIE;
use crate::services::AuthService;
use crate::state::AppState;
use crate::utils::extract::ValidatedJson;
use crate::utils::AppResult;

/// Public routes: no token needed.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .http_only(true)
        .secure(state.config.is_production())
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(state.config.cookie_max_age))
        .build()
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<UserProfile>),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserProfile>>)> {
    let user = AuthService::new(&state).register(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "You are Successfully Registered",
            UserProfile::from(&user),
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; token set in the access_token cookie", body = LoginResponse),
        (status = 401, description = "Invalid credentials or disabled account")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let (user, token) = AuthService::new(&state).login(request).await?;
    let jar = jar.add(session_cookie(&state, token));

    Ok((
        jar,
        Json(LoginResponse {
            message: "Login Successful".to_string(),
            user: UserProfile::from(&user),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Authentication",
    responses((status = 200, description = "Cookie cleared", body = MessageResponse))
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"));
    (jar, Json(MessageResponse::new("Logged out successfully")))
}
