//! Shared application state injected into every handler.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AuthService, ClickService, LinkService};
use crate::config::Config;
use crate::domain::click_event::ClickEvent;

/// Site-wide settings used by handlers to build redirects and links.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    /// Externally visible origin, without trailing slash.
    pub public_base_url: String,
    /// Hosted sign-in page of the identity provider.
    pub sign_in_url: String,
    /// Hosted sign-up page of the identity provider.
    pub sign_up_url: String,
    /// Read client IPs from proxy headers.
    pub behind_proxy: bool,
}

impl SiteSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            public_base_url: config.public_base_url.clone(),
            sign_in_url: config.auth.sign_in_url.clone(),
            sign_up_url: config.auth.sign_up_url.clone(),
            behind_proxy: config.behind_proxy,
        }
    }

    /// Where the identity provider sends users back to after signing in.
    pub fn after_sign_in_url(&self) -> String {
        format!("{}/dashboard", self.public_base_url)
    }
}

/// Application state cloned into each request.
///
/// All members are cheap to clone: services are reference counted and the
/// click sender is a channel handle.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub click_service: Arc<ClickService>,
    pub auth_service: Arc<AuthService>,
    /// Producer side of the click channel drained by the click worker.
    pub click_sender: mpsc::Sender<ClickEvent>,
    pub site: Arc<SiteSettings>,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        click_service: Arc<ClickService>,
        auth_service: Arc<AuthService>,
        click_sender: mpsc::Sender<ClickEvent>,
        site: SiteSettings,
    ) -> Self {
        Self {
            link_service,
            click_service,
            auth_service,
            click_sender,
            site: Arc::new(site),
        }
    }
}
