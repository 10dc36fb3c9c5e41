//! Landing and signup page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use chrono::{Datelike, Utc};
use tracing::instrument;

use crate::middleware::OptionalSeller;
use crate::state::AppState;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub app_name: String,
    pub current_year: i32,
    pub viewer: Option<String>,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub app_name: String,
}

/// Display the landing page.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    OptionalSeller(viewer): OptionalSeller,
) -> HomeTemplate {
    HomeTemplate {
        app_name: state.config().app_name.clone(),
        current_year: Utc::now().year(),
        viewer: viewer.map(|v| v.to_string()),
    }
}

/// Display the signup form.
#[instrument(skip_all)]
pub async fn signup(State(state): State<AppState>) -> SignupTemplate {
    SignupTemplate {
        app_name: state.config().app_name.clone(),
    }
}
