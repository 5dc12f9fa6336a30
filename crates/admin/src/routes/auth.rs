//! Login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use crate::error::AppError;
use crate::filters;
use crate::middleware::{LOGIN_PATH, OptionalAdminAuth};
use crate::services::{AdminAuthError, AdminAuthService};
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub token: String,
}

/// Render the login page, or go home when already signed in.
///
/// GET /login
pub async fn login_page(OptionalAdminAuth(admin): OptionalAdminAuth) -> Response {
    if admin.is_some() {
        return Redirect::to("/").into_response();
    }
    LoginTemplate { error: None }.into_response()
}

/// Check the submitted token and sign the session in.
///
/// POST /login
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match AdminAuthService::new(state.access_token())
        .login(&session, &form.token)
        .await
    {
        Ok(_) => {
            info!("Admin signed in");
            Ok(Redirect::to("/").into_response())
        }
        Err(AdminAuthError::InvalidToken) => {
            warn!("Rejected admin login");
            Ok((
                StatusCode::UNAUTHORIZED,
                LoginTemplate {
                    error: Some("That access token is not valid."),
                },
            )
                .into_response())
        }
        Err(AdminAuthError::Session(e)) => Err(AppError::Internal(e.to_string())),
    }
}

/// Sign out and return to the login page.
///
/// POST /logout
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = AdminAuthService::logout(&session).await {
        warn!(error = %e, "Failed to clear admin session");
    }
    Redirect::to(LOGIN_PATH)
}
