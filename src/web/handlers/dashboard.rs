//! Dashboard: the caller's links and the create form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::api::dto::pagination::PaginationParams;
use crate::application::services::link_service::DEFAULT_PAGE_SIZE;
use crate::domain::entities::{Caller, Link};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::error::PageError;

/// One row of the links table.
#[derive(Debug, Clone)]
pub struct LinkRow {
    pub id: i64,
    pub code: String,
    pub short_url: String,
    pub url: String,
    pub clicks: i64,
    pub created_at: String,
}

impl LinkRow {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            created_at: link.created_at.format("%Y-%m-%d %H:%M").to_string(),
            code: link.code,
            short_url,
            url: link.url,
            clicks: link.clicks,
        }
    }
}

/// Submitted create form.
#[derive(Debug, Default, Deserialize)]
pub struct CreateLinkForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub code: String,
}

/// Template for the dashboard (`templates/dashboard.html`).
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub caller: Option<Caller>,
    pub links: Vec<LinkRow>,
    pub total: i64,
    pub page: u32,
    pub total_pages: u32,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
    pub form: CreateLinkForm,
    pub error: Option<String>,
}

async fn render(
    state: &AppState,
    caller: Caller,
    page: u32,
    form: CreateLinkForm,
    error: Option<String>,
) -> Result<DashboardTemplate, AppError> {
    let mut links = state
        .link_service
        .list_links(&caller.id, page, DEFAULT_PAGE_SIZE)
        .await?;

    // Past the last page: show the last one instead of an empty table.
    if links.items.is_empty() && links.page > links.total_pages() {
        links = state
            .link_service
            .list_links(&caller.id, links.total_pages(), DEFAULT_PAGE_SIZE)
            .await?;
    }

    let total_pages = links.total_pages();
    let prev_page = links.has_previous().then(|| links.page - 1);
    let next_page = links.has_next().then(|| links.page + 1);

    Ok(DashboardTemplate {
        caller: Some(caller),
        total: links.total,
        page: links.page,
        total_pages,
        prev_page,
        next_page,
        links: links
            .items
            .into_iter()
            .map(|link| {
                let short_url = state.link_service.short_url(&link.code);
                LinkRow::new(link, short_url)
            })
            .collect(),
        form,
        error,
    })
}

/// Renders the caller's dashboard.
///
/// # Endpoint
///
/// `GET /dashboard?page=1`
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<PaginationParams>,
) -> Result<DashboardTemplate, PageError> {
    let page = params.page.unwrap_or(1).max(1);

    Ok(render(&state, caller, page, CreateLinkForm::default(), None).await?)
}

/// Handles the create form.
///
/// # Endpoint
///
/// `POST /dashboard/links` (form fields `url`, optional `code`)
///
/// On success redirects back to the dashboard (`303 See Other`). Invalid
/// input or a taken code re-renders the dashboard with the message and the
/// submitted values, status `422 Unprocessable Entity`.
pub async fn create_link_form_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Form(form): Form<CreateLinkForm>,
) -> Result<Response, PageError> {
    let result = state
        .link_service
        .create_link(&caller.id, &form.url, Some(form.code.as_str()))
        .await;

    match result {
        Ok(_) => Ok(Redirect::to("/dashboard").into_response()),
        Err(e @ (AppError::Validation { .. } | AppError::Conflict { .. })) => {
            let message = e.message().to_string();
            let page = render(&state, caller, 1, form, Some(message)).await?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}
