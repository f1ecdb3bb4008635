//! Caller identity resolved from the session token.

use serde::Serialize;

/// The authenticated user behind the current request.
///
/// `id` is the opaque subject issued by the identity provider and is the
/// value stored as a link's `owner_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caller {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image_url: Option<String>,
}

impl Caller {
    /// Creates a caller with only an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
            image_url: None,
        }
    }

    /// Name shown in the header: name, then email, then the raw id.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }

    /// Up to two uppercase initials used when no avatar image is available.
    pub fn initials(&self) -> String {
        let source = self.display_name();
        let initials: String = source
            .split(|c: char| c.is_whitespace() || c == '.' || c == '@' || c == '_')
            .filter_map(|part| part.chars().next())
            .filter(|c| c.is_alphanumeric())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();

        if initials.is_empty() {
            "?".to_string()
        } else {
            initials
        }
    }
}
