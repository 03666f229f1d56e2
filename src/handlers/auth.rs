use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse, HttpResponseBuilder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::auth_service::LoggedIn;
use crate::domain::user::UserView;
use crate::errors::AppError;
use crate::handlers::extractors::{session_token, CurrentUser, SESSION_COOKIE};
use crate::state::AppState;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(state.auth.sessions().ttl().num_seconds()))
        .finish()
}

fn logged_in_response(
    state: &AppState,
    mut response: HttpResponseBuilder,
    logged_in: LoggedIn,
) -> HttpResponse {
    response
        .cookie(session_cookie(state, logged_in.token))
        .json(UserView::from(&logged_in.user))
}

/// POST /api/register
///
/// Creates a regular (non-admin) account and starts a session for it.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = Credentials,
    responses(
        (status = 201, description = "Account created and logged in", body = UserView),
        (status = 400, description = "Missing fields or username taken"),
    ),
    tag = "auth"
)]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<Credentials>,
) -> Result<HttpResponse, AppError> {
    let logged_in = state.auth.register(&body.username, &body.password)?;
    Ok(logged_in_response(&state, HttpResponse::Created(), logged_in))
}

/// POST /api/login
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = Credentials,
    responses(
        (status = 200, description = "Logged in", body = UserView),
        (status = 401, description = "Invalid username or password"),
    ),
    tag = "auth"
)]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<Credentials>,
) -> Result<HttpResponse, AppError> {
    let logged_in = state.auth.login(&body.username, &body.password)?;
    Ok(logged_in_response(&state, HttpResponse::Ok(), logged_in))
}

/// POST /api/logout
///
/// Ends the current session, if any, and clears the cookie.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses((status = 200, description = "Logged out")),
    tag = "auth"
)]
pub async fn logout(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    if let Some(token) = session_token(&req) {
        state.auth.logout(&token)?;
    }
    let mut removal = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    removal.make_removal();
    Ok(HttpResponse::Ok().cookie(removal).finish())
}

/// GET /api/user
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "The logged-in user", body = UserView),
        (status = 401, description = "Not logged in"),
    ),
    tag = "auth"
)]
pub async fn current_user(CurrentUser(user): CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(UserView::from(&user))
}
