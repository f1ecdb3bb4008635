//! Click event model for asynchronous click tracking.

/// An in-memory click event handed from the redirect handler to the
/// background worker.
///
/// The click counter is already incremented by the time this event exists;
/// the event only carries request metadata for the detail record.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub link_id: i64,
    pub code: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
}

impl ClickEvent {
    /// Creates a new click event.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let event = ClickEvent::new(
    ///     42,
    ///     "abc123".to_string(),
    ///     Some("192.168.1.1".to_string()),
    ///     Some("Mozilla/5.0"),
    ///     Some("https://google.com"),
    /// );
    /// ```
    pub fn new(
        link_id: i64,
        code: String,
        ip: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            code,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }
}
