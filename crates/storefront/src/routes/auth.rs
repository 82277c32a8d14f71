//! Mock authentication route handlers.
//!
//! There are no passwords and no credential store: logging in fabricates a
//! session identity from the submitted email, and signing up stores the given
//! name and email. The identity lives in the session under a fixed key and
//! is removed on logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use resonant_harmony_core::Email;

use crate::filters;
use crate::models::{CurrentUser, session_keys};

// =============================================================================
// Forms
// =============================================================================

/// Login form data (email only; this is a mock).
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
#[instrument]
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate { error: None }
}

/// Log in: store a guest identity for the submitted email.
#[instrument(skip(session, form))]
pub async fn login(session: Session, Form(form): Form<LoginForm>) -> Response {
    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(e) => {
            return LoginTemplate {
                error: Some(e.to_string()),
            }
            .into_response();
        }
    };

    let user = CurrentUser {
        name: "Guest User".to_owned(),
        email,
    };
    if let Err(e) = session.insert(session_keys::CURRENT_USER, &user).await {
        tracing::error!("Failed to store session identity: {e}");
    }

    Redirect::to("/").into_response()
}

/// Display the register page.
#[instrument]
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate { error: None }
}

/// Sign up: store the given name and email as the session identity.
#[instrument(skip(session, form))]
pub async fn register(session: Session, Form(form): Form<RegisterForm>) -> Response {
    if form.name.trim().is_empty() {
        return RegisterTemplate {
            error: Some("Name is required".to_owned()),
        }
        .into_response();
    }

    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(e) => {
            return RegisterTemplate {
                error: Some(e.to_string()),
            }
            .into_response();
        }
    };

    let user = CurrentUser {
        name: form.name.trim().to_owned(),
        email,
    };
    if let Err(e) = session.insert(session_keys::CURRENT_USER, &user).await {
        tracing::error!("Failed to store session identity: {e}");
    }

    Redirect::to("/").into_response()
}

/// Log out: drop the session identity.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await
    {
        tracing::error!("Failed to clear session identity: {e}");
    }
    Redirect::to("/")
}
