//! Link detail page and deletion.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Path, State},
    response::Redirect,
};

use crate::application::services::click_service::MAX_RECENT_CLICKS;
use crate::domain::entities::{Caller, Click};
use crate::state::AppState;
use crate::web::error::PageError;
use crate::web::handlers::dashboard::LinkRow;

/// One row of the recent clicks table.
#[derive(Debug, Clone)]
pub struct ClickRow {
    pub clicked_at: String,
    pub referer: String,
    pub user_agent: String,
    pub ip: String,
}

impl From<Click> for ClickRow {
    fn from(click: Click) -> Self {
        let dash = || "-".to_string();
        Self {
            clicked_at: click.clicked_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            referer: click.referer.unwrap_or_else(dash),
            user_agent: click.user_agent.unwrap_or_else(dash),
            ip: click.ip.unwrap_or_else(dash),
        }
    }
}

/// Template for the link detail page (`templates/link.html`).
#[derive(Template, WebTemplate)]
#[template(path = "link.html")]
pub struct LinkTemplate {
    pub caller: Option<Caller>,
    pub link: LinkRow,
    pub clicks: Vec<ClickRow>,
}

/// Renders one of the caller's links with its latest clicks.
///
/// # Endpoint
///
/// `GET /dashboard/links/{id}`
///
/// # Errors
///
/// Renders a 404 page if the link is missing or owned by someone else.
pub async fn link_detail_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<LinkTemplate, PageError> {
    let link = state.link_service.get_link(&caller.id, id).await?;
    let clicks = state
        .click_service
        .recent_clicks(&caller.id, id, MAX_RECENT_CLICKS)
        .await?;

    let short_url = state.link_service.short_url(&link.code);

    Ok(LinkTemplate {
        caller: Some(caller),
        link: LinkRow::new(link, short_url),
        clicks: clicks.into_iter().map(ClickRow::from).collect(),
    })
}

/// Deletes one of the caller's links and returns to the dashboard.
///
/// # Endpoint
///
/// `POST /dashboard/links/{id}/delete`
pub async fn delete_link_form_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<Redirect, PageError> {
    state.link_service.delete_link(&caller.id, id).await?;
    Ok(Redirect::to("/dashboard"))
}
