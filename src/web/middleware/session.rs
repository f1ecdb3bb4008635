//! Session resolution and the sign-in gate for browser routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Redirect, Response},
};

use crate::domain::entities::Caller;
use crate::state::AppState;
use crate::web::error::ErrorPage;

/// Caller of the current browser request, resolved once per request.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub caller: Option<Caller>,
}

impl Session {
    pub fn is_signed_in(&self) -> bool {
        self.caller.is_some()
    }
}

/// Resolves the caller from the session cookie (or bearer header) and
/// stores a [`Session`] in the request extensions.
///
/// Never rejects a request: invalid or expired tokens simply produce an
/// anonymous session. Error pages produced further down are re-rendered
/// with the signed-in header.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .merge(web::routes::public_routes())
///     .fallback(not_found_handler)
///     .layer(middleware::from_fn_with_state(state.clone(), session::layer));
/// ```
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let caller = st.auth_service.current_caller(req.headers()).await;
    req.extensions_mut().insert(Session {
        caller: caller.clone(),
    });

    let response = next.run(req).await;

    let error_page = response.extensions().get::<ErrorPage>().cloned();
    match (caller, error_page) {
        (Some(caller), Some(page)) => page.render(Some(caller)),
        _ => response,
    }
}

/// Lets signed-in requests through and exposes their [`Caller`] as an
/// extension; everyone else is sent to `/sign-in` with `303 See Other`.
///
/// Must run inside [`layer`].
pub async fn require_session(mut req: Request, next: Next) -> Result<Response, Redirect> {
    let caller = req
        .extensions()
        .get::<Session>()
        .and_then(|session| session.caller.clone());

    match caller {
        Some(caller) => {
            req.extensions_mut().insert(caller);
            Ok(next.run(req).await)
        }
        None => Err(Redirect::to("/sign-in")),
    }
}
