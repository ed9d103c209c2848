//! Departure badges.
//!
//! A badge is a semantic tag, not display text. The presentation layer maps
//! each kind to its own label and style.

use serde::{Deserialize, Serialize};

/// What a badge says about a departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    /// Final departure of its service day.
    Last,
    /// Runs via an alternate crossing or interchange.
    ViaAlt,
    /// Overnight trip on an alternate routing.
    Overnight,
    /// Normal routing, shown where alternates also exist.
    Normal,
    /// Plain scheduled departure.
    Estimated,
}

impl BadgeKind {
    pub fn severity(&self) -> Severity {
        match self {
            BadgeKind::Last => Severity::Emphasis,
            BadgeKind::ViaAlt | BadgeKind::Overnight => Severity::Warning,
            BadgeKind::Normal | BadgeKind::Estimated => Severity::Neutral,
        }
    }
}

/// Display weight class for a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Emphasis,
    Warning,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Badge {
    pub kind: BadgeKind,
    pub severity: Severity,
}

impl From<BadgeKind> for Badge {
    fn from(kind: BadgeKind) -> Self {
        Badge {
            kind,
            severity: kind.severity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_per_kind() {
        assert_eq!(Badge::from(BadgeKind::Last).severity, Severity::Emphasis);
        assert_eq!(Badge::from(BadgeKind::ViaAlt).severity, Severity::Warning);
        assert_eq!(Badge::from(BadgeKind::Overnight).severity, Severity::Warning);
        assert_eq!(Badge::from(BadgeKind::Normal).severity, Severity::Neutral);
        assert_eq!(Badge::from(BadgeKind::Estimated).severity, Severity::Neutral);
    }

    #[test]
    fn kind_serde_names() {
        assert_eq!(serde_json::to_string(&BadgeKind::ViaAlt).unwrap(), "\"via_alt\"");
        let kind: BadgeKind = serde_json::from_str("\"overnight\"").unwrap();
        assert_eq!(kind, BadgeKind::Overnight);
    }
}
