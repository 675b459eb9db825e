//! Pull-request automation detection.

const AUTOMATION_VAR: &str = "GITHUB_ACTIONS";
const EVENT_VAR: &str = "GITHUB_EVENT_NAME";
const PULL_REQUEST_EVENT: &str = "pull_request";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiContext {
    pub automation: bool,
    pub event: Option<String>,
}

impl CiContext {
    pub fn from_env() -> Self {
        Self {
            automation: std::env::var(AUTOMATION_VAR).is_ok_and(|v| v == "true"),
            event: std::env::var(EVENT_VAR).ok(),
        }
    }

    /// A pull-request context for callers that already know they are in one.
    pub fn pull_request() -> Self {
        Self {
            automation: true,
            event: Some(PULL_REQUEST_EVENT.to_string()),
        }
    }

    /// Both signals must hold: running under CI automation and the event is a pull request.
    pub fn is_pull_request(&self) -> bool {
        self.automation && self.event.as_deref() == Some(PULL_REQUEST_EVENT)
    }
}
