//! Approval decision input.

use serde::{Deserialize, Serialize};

/// Who took an approval decision and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDecision {
    /// Username of the administrator deciding.
    pub decided_by: String,
    /// Optional note explaining the decision.
    #[serde(default)]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_is_optional() {
        let decision: LeaveDecision = serde_json::from_str(r#"{"decided_by": "admin"}"#).unwrap();
        assert_eq!(decision.decided_by, "admin");
        assert!(decision.note.is_none());
    }
}
