//! Sign-in, sign-up and sign-out routes.
//!
//! Credentials are collected by the hosted identity provider; these routes
//! only hand the browser over to it and back.

use axum::{
    Extension,
    extract::State,
    http::header,
    response::{IntoResponse, Redirect},
};
use serde_json::json;
use url::Url;

use crate::error::AppError;
use crate::state::{AppState, SiteSettings};
use crate::web::error::PageError;
use crate::web::middleware::session::Session;

/// Sends the browser to the hosted sign-in page.
///
/// # Endpoint
///
/// `GET /sign-in`
///
/// Already signed-in callers go to `/dashboard` instead.
pub async fn sign_in_handler(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Redirect, PageError> {
    if session.is_signed_in() {
        return Ok(Redirect::to("/dashboard"));
    }

    hosted_redirect(&state.site.sign_in_url, &state.site)
}

/// Sends the browser to the hosted sign-up page.
///
/// # Endpoint
///
/// `GET /sign-up`
pub async fn sign_up_handler(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Redirect, PageError> {
    if session.is_signed_in() {
        return Ok(Redirect::to("/dashboard"));
    }

    hosted_redirect(&state.site.sign_up_url, &state.site)
}

/// Expires the session cookie and returns to the landing page.
///
/// # Endpoint
///
/// `GET /sign-out`
pub async fn sign_out_handler(State(state): State<AppState>) -> impl IntoResponse {
    let secure = if state.site.public_base_url.starts_with("https://") {
        "; Secure"
    } else {
        ""
    };

    let cookie = format!(
        "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax{secure}",
        state.auth_service.cookie_name()
    );

    ([(header::SET_COOKIE, cookie)], Redirect::to("/"))
}

/// Builds `303 See Other` to a hosted auth page, asking the provider to
/// come back to the dashboard afterwards.
fn hosted_redirect(page: &str, site: &SiteSettings) -> Result<Redirect, PageError> {
    let mut url = Url::parse(page).map_err(|e| {
        tracing::error!(error = %e, page, "Invalid hosted auth page URL");
        AppError::internal("Invalid hosted auth page URL", json!({}))
    })?;

    url.query_pairs_mut()
        .append_pair("redirect_url", &site.after_sign_in_url());

    Ok(Redirect::to(url.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteSettings {
        SiteSettings {
            public_base_url: "https://sho.rt".to_string(),
            sign_in_url: "https://accounts.example.com/sign-in".to_string(),
            sign_up_url: "https://accounts.example.com/sign-up?lang=en".to_string(),
            behind_proxy: false,
        }
    }

    fn location(redirect: Redirect) -> String {
        let response = redirect.into_response();
        response.headers()[header::LOCATION]
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_hosted_redirect_appends_return_url() {
        let site = site();
        let redirect = hosted_redirect(&site.sign_in_url, &site).unwrap();

        assert_eq!(
            location(redirect),
            "https://accounts.example.com/sign-in?redirect_url=https%3A%2F%2Fsho.rt%2Fdashboard"
        );
    }

    #[test]
    fn test_hosted_redirect_keeps_existing_query() {
        let site = site();
        let redirect = hosted_redirect(&site.sign_up_url, &site).unwrap();

        assert!(location(redirect).starts_with("https://accounts.example.com/sign-up?lang=en&redirect_url="));
    }
}
