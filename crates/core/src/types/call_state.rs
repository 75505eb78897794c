//! Result slot for a single external call site.

use serde::Serialize;

/// State of one call site's most recent request.
///
/// Every AI-backed widget owns exactly one of these. A new request moves the
/// slot to `Pending`; whichever request resolves last writes the final state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum CallState<T> {
    #[default]
    Idle,
    Pending,
    Succeeded(T),
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let state: CallState<String> = CallState::default();
        assert_eq!(state, CallState::Idle);
    }

    #[test]
    fn test_serialized_shape() {
        let state = CallState::Succeeded("summary".to_string());
        let json = serde_json::to_value(&state).expect("serialize");
        assert_eq!(json, serde_json::json!({"state": "succeeded", "value": "summary"}));

        let pending: CallState<String> = CallState::Pending;
        let json = serde_json::to_value(&pending).expect("serialize");
        assert_eq!(json, serde_json::json!({"state": "pending"}));
    }
}
