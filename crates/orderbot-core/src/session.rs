//! Session identity for webhook calls.
//!
//! The dialogue platform does not send a session id directly; it is embedded
//! in each output context path:
//!
//! ```text
//! projects/<project>/agent/sessions/<session-id>/contexts/<context-name>
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static SESSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/sessions/(.*?)/contexts/").unwrap());

/// Pull the session id out of a context path.
///
/// Returns an empty string when the path does not match. Never fails.
pub fn extract_session_id(context_path: &str) -> String {
    SESSION_RE
        .captures(context_path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Key under which a conversation's draft order is kept.
///
/// Context paths that carry no session id all land on `Unknown`. They still
/// share one draft, but the pseudo-key makes that explicit in logs and tests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Known(String),
    Unknown,
}

impl SessionKey {
    pub fn from_context_path(context_path: &str) -> Self {
        let id = extract_session_id(context_path);
        if id.is_empty() {
            tracing::warn!(context_path, "no session id in output context");
            Self::Unknown
        } else {
            Self::Known(id)
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl From<&str> for SessionKey {
    fn from(id: &str) -> Self {
        if id.is_empty() {
            Self::Unknown
        } else {
            Self::Known(id.to_string())
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(id) => f.write_str(id),
            Self::Unknown => f.write_str("<unknown-session>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: &str = "projects/mira-chatbot-for-food-del-ejcd/agent/sessions/82edb045-ddd6-7c82-ef6a-161ca23e57fd/contexts/ongoing-order";

    #[test]
    fn test_extract_session_id() {
        assert_eq!(
            extract_session_id(CONTEXT),
            "82edb045-ddd6-7c82-ef6a-161ca23e57fd"
        );
    }

    #[test]
    fn test_extract_session_id_no_match() {
        assert_eq!(extract_session_id("projects/p/agent/contexts/x"), "");
        assert_eq!(extract_session_id(""), "");
    }

    #[test]
    fn test_extract_takes_shortest_match() {
        let path = "a/sessions/s1/contexts/c/sessions/s2/contexts/d";
        assert_eq!(extract_session_id(path), "s1");
    }

    #[test]
    fn test_session_key_from_context_path() {
        assert_eq!(
            SessionKey::from_context_path(CONTEXT),
            SessionKey::Known("82edb045-ddd6-7c82-ef6a-161ca23e57fd".into())
        );
        assert_eq!(
            SessionKey::from_context_path("garbage"),
            SessionKey::Unknown
        );
    }

    #[test]
    fn test_session_key_from_str() {
        assert_eq!(SessionKey::from(""), SessionKey::Unknown);
        assert!(SessionKey::from("A").is_known());
    }
}
