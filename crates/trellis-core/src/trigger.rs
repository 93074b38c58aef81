//! Input triggers that may cause dismissal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key code delivered for the Escape key.
pub const ESCAPE_KEY_CODE: u32 = 27;

/// A document-level input event as seen by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Trigger {
    /// Pointer click anywhere in the document.
    Click,
    /// Key-down carrying a numeric key code.
    Key { code: u32 },
}

impl Trigger {
    /// Escape key-down.
    pub const ESCAPE: Trigger = Trigger::Key {
        code: ESCAPE_KEY_CODE,
    };

    /// Returns true if this trigger can dismiss overlays at all.
    ///
    /// Clicks always qualify; keys only when they carry the Escape code.
    pub fn qualifies(self) -> bool {
        match self {
            Trigger::Click => true,
            Trigger::Key { code } => code == ESCAPE_KEY_CODE,
        }
    }

    pub fn is_click(self) -> bool {
        matches!(self, Trigger::Click)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Click => f.write_str("click"),
            Trigger::Key { code } => write!(f, "key({code})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_always_qualifies() {
        assert!(Trigger::Click.qualifies());
    }

    #[test]
    fn test_only_escape_key_qualifies() {
        assert!(Trigger::ESCAPE.qualifies());
        assert!(!Trigger::Key { code: 13 }.qualifies());
        assert!(!Trigger::Key { code: 0 }.qualifies());
        assert!(!Trigger::Key { code: 26 }.qualifies());
    }

    #[test]
    fn test_trigger_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Trigger::ESCAPE).unwrap();
        assert_eq!(json, r#"{"kind":"key","code":27}"#);
        let json = serde_json::to_string(&Trigger::Click).unwrap();
        assert_eq!(json, r#"{"kind":"click"}"#);
    }
}
