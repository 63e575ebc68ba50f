use uuid::Uuid;

const JOIN_PATH: &str = "/api/events/join/";

/// Builds and resolves the public links attendees use to reach an approved
/// event. A link depends only on the base URL and the event id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinLinks {
    base_url: String,
}

impl JoinLinks {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn link_for(&self, event_id: Uuid) -> String {
        format!("{}{}{}", self.base_url, JOIN_PATH, event_id)
    }

    /// Recovers the event id from a link produced by [`JoinLinks::link_for`].
    pub fn event_id_from(&self, link: &str) -> Option<Uuid> {
        let rest = link.strip_prefix(&self.base_url)?.strip_prefix(JOIN_PATH)?;
        Uuid::parse_str(rest.trim_end_matches('/')).ok()
    }
}
