use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::domain::user::User;
use crate::errors::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "storefront.sid";

/// The logged-in user; rejects the request with 401 otherwise.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// A logged-in admin; 401 when anonymous, 403 for other users.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

pub fn session_token(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE).map(|c| c.value().to_string())
}

fn authenticate(req: &HttpRequest) -> Result<User, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("application state is not configured".to_string()))?;
    let token = session_token(req).ok_or(AppError::Unauthorized)?;
    state.auth.current_user(&token)?.ok_or(AppError::Unauthorized)
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(CurrentUser))
    }
}

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req).and_then(|user| {
            if user.is_admin {
                Ok(AdminUser(user))
            } else {
                Err(AppError::Forbidden)
            }
        }))
    }
}
