//! HTML template rendering handlers for the web UI.

mod auth;
mod dashboard;
mod landing;
mod links;

pub use auth::{sign_in_handler, sign_out_handler, sign_up_handler};
pub use dashboard::{create_link_form_handler, dashboard_handler};
pub use landing::landing_handler;
pub use links::{delete_link_form_handler, link_detail_handler};
