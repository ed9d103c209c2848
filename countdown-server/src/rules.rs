//! Route-specific badge rules.
//!
//! Some routes label particular departures: overnight trips that take an
//! alternate routing, half-hourly trips that alternate between two
//! crossings, or a published list whose real last trip is not its final
//! entry. Each is stored as versioned data keyed by (route, direction).
//! The annotator in [`crate::engine`] interprets them without knowing any
//! route by name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{BadgeKind, ClockTime, DirectionIndex, RouteId};

/// One declarative rule for a (route, direction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BadgeRule {
    /// Departures at exactly this time get `kind`.
    At { at: ClockTime, kind: BadgeKind },
    /// Departures whose minute value equals `minute` get `kind`.
    Minute { minute: u32, kind: BadgeKind },
    /// This time is the functional last departure of the day.
    LastAt { last_at: ClockTime },
}

/// Badge rules for every route, tagged with the routing snapshot version.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    version: String,
    rules: HashMap<(RouteId, DirectionIndex), Vec<BadgeRule>>,
}

impl RuleTable {
    /// Create an empty table for a routing snapshot.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            rules: HashMap::new(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Append a rule. Rules are evaluated in insertion order.
    pub fn add(&mut self, route: RouteId, direction: DirectionIndex, rule: BadgeRule) {
        self.rules.entry((route, direction)).or_default().push(rule);
    }

    /// Rules for a (route, direction); empty when none are configured.
    pub fn rules_for(&self, route: &RouteId, direction: DirectionIndex) -> &[BadgeRule] {
        self.rules
            .get(&(route.clone(), direction))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of (route, direction) pairs with rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builder for creating rule tables from literal data.
///
/// Invalid route ids, directions and times are skipped.
#[derive(Debug, Default)]
pub struct RuleTableBuilder {
    inner: RuleTable,
}

impl RuleTableBuilder {
    pub fn new(version: &str) -> Self {
        Self {
            inner: RuleTable::new(version),
        }
    }

    pub fn at(self, route: &str, direction: u8, time: &str, kind: BadgeKind) -> Self {
        match ClockTime::parse_hhmm(time) {
            Ok(at) => self.push(route, direction, BadgeRule::At { at, kind }),
            Err(_) => self,
        }
    }

    pub fn minute(self, route: &str, direction: u8, minute: u32, kind: BadgeKind) -> Self {
        if minute > 59 {
            return self;
        }
        self.push(route, direction, BadgeRule::Minute { minute, kind })
    }

    pub fn last_at(self, route: &str, direction: u8, time: &str) -> Self {
        match ClockTime::parse_hhmm(time) {
            Ok(last_at) => self.push(route, direction, BadgeRule::LastAt { last_at }),
            Err(_) => self,
        }
    }

    fn push(mut self, route: &str, direction: u8, rule: BadgeRule) -> Self {
        if let (Ok(route), Ok(direction)) = (RouteId::parse(route), DirectionIndex::new(direction)) {
            self.inner.add(route, direction, rule);
        }
        self
    }

    pub fn build(self) -> RuleTable {
        self.inner
    }
}

/// The built-in routing snapshot used when the data file carries none.
pub fn default_rules() -> RuleTable {
    RuleTableBuilder::new("2024-10")
        // NR334 alternates between the bridge and the tunnel every half hour;
        // the pattern is mirrored on the return leg.
        .minute("NR334", 0, 0, BadgeKind::ViaAlt)
        .minute("NR334", 0, 30, BadgeKind::Normal)
        .minute("NR334", 1, 30, BadgeKind::ViaAlt)
        .minute("NR334", 1, 0, BadgeKind::Normal)
        // NR330 overnight trips run via the alternate interchange
        .at("NR330", 0, "00:45", BadgeKind::Overnight)
        .at("NR330", 0, "02:15", BadgeKind::Overnight)
        .at("NR330", 1, "01:15", BadgeKind::Overnight)
        .at("NR330", 1, "02:45", BadgeKind::Overnight)
        // NR338 publishes early-morning continuation trips after its last run
        .last_at("NR338", 0, "23:30")
        .last_at("NR338", 1, "23:50")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(s: &str) -> RouteId {
        RouteId::parse(s).unwrap()
    }

    fn t(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    #[test]
    fn empty_table() {
        let table = RuleTable::new("v1");
        assert!(table.is_empty());
        assert_eq!(table.version(), "v1");
        assert!(table.rules_for(&route("NR334"), DirectionIndex::OUTBOUND).is_empty());
    }

    #[test]
    fn rules_keep_insertion_order() {
        let table = RuleTableBuilder::new("v1")
            .at("NR1", 0, "01:00", BadgeKind::Overnight)
            .last_at("NR1", 0, "23:00")
            .build();

        assert_eq!(
            table.rules_for(&route("NR1"), DirectionIndex::OUTBOUND),
            &[
                BadgeRule::At {
                    at: t("01:00"),
                    kind: BadgeKind::Overnight
                },
                BadgeRule::LastAt { last_at: t("23:00") },
            ]
        );
        assert!(table.rules_for(&route("NR1"), DirectionIndex::INBOUND).is_empty());
    }

    #[test]
    fn builder_ignores_invalid_input() {
        let table = RuleTableBuilder::new("v1")
            .at("nr1", 0, "01:00", BadgeKind::Overnight) // lowercase id
            .at("NR1", 2, "01:00", BadgeKind::Overnight) // bad direction
            .at("NR1", 0, "1:00", BadgeKind::Overnight) // bad time
            .minute("NR1", 0, 60, BadgeKind::ViaAlt) // bad minute
            .minute("NR1", 0, 15, BadgeKind::ViaAlt)
            .build();

        assert_eq!(table.len(), 1);
        assert_eq!(table.rules_for(&route("NR1"), DirectionIndex::OUTBOUND).len(), 1);
    }

    #[test]
    fn default_rules_cover_known_routes() {
        let table = default_rules();
        assert_eq!(table.version(), "2024-10");
        assert_eq!(table.rules_for(&route("NR334"), DirectionIndex::OUTBOUND).len(), 2);
        assert_eq!(table.rules_for(&route("NR334"), DirectionIndex::INBOUND).len(), 2);
        assert!(!table.rules_for(&route("NR330"), DirectionIndex::OUTBOUND).is_empty());
        assert!(!table.rules_for(&route("NR338"), DirectionIndex::INBOUND).is_empty());
    }

    #[test]
    fn rules_deserialize_from_json() {
        let rules: Vec<BadgeRule> = serde_json::from_str(
            r#"[
                {"at": "00:45", "kind": "overnight"},
                {"minute": 30, "kind": "via_alt"},
                {"last_at": "23:30"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            rules,
            vec![
                BadgeRule::At {
                    at: t("00:45"),
                    kind: BadgeKind::Overnight
                },
                BadgeRule::Minute {
                    minute: 30,
                    kind: BadgeKind::ViaAlt
                },
                BadgeRule::LastAt { last_at: t("23:30") },
            ]
        );
    }
}
