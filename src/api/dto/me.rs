//! DTO for the current caller endpoint.

use serde::Serialize;

use crate::domain::entities::Caller;

/// Response of `GET /api/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub display_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<Caller> for MeResponse {
    fn from(caller: Caller) -> Self {
        Self {
            display_name: caller.display_name().to_string(),
            id: caller.id,
            name: caller.name,
            email: caller.email,
            image_url: caller.image_url,
        }
    }
}
