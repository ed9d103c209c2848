//! JSON timetable data file.
//!
//! The file carries the route catalogue, every published list, the public
//! holidays for the default calendar, and optionally a badge rule snapshot:
//!
//! ```json
//! {
//!   "routes": [
//!     { "id": "NR334", "kind": "bus", "policy": "standard",
//!       "directions": [
//!         { "name": "To Airport",
//!           "departures": { "weekday": ["06:00", "06:30"] } }
//!       ] }
//!   ],
//!   "holidays": ["2024-12-25"],
//!   "badge_rules": { "version": "2024-10", "routes": [
//!     { "route": "NR334", "direction": 0, "rules": [{ "minute": 0, "kind": "via_alt" }] }
//!   ] }
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::calendar::HolidayCalendar;
use crate::domain::{DayType, DirectionIndex, DisplayPolicy, RouteId, TransportKind};
use crate::rules::{BadgeRule, RuleTable, default_rules};

use super::error::LoadError;
use super::store::{DirectionInfo, RouteInfo, StaticTimetable};

#[derive(Debug, Deserialize)]
struct TimetableFile {
    routes: Vec<RouteEntry>,
    #[serde(default)]
    holidays: Vec<NaiveDate>,
    #[serde(default)]
    badge_rules: Option<RuleSnapshot>,
}

#[derive(Debug, Deserialize)]
struct RouteEntry {
    id: RouteId,
    kind: TransportKind,
    #[serde(default)]
    policy: DisplayPolicy,
    directions: Vec<DirectionEntry>,
}

#[derive(Debug, Deserialize)]
struct DirectionEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    departures: HashMap<DayType, Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RuleSnapshot {
    version: String,
    #[serde(default)]
    routes: Vec<RouteRules>,
}

#[derive(Debug, Deserialize)]
struct RouteRules {
    route: RouteId,
    direction: DirectionIndex,
    rules: Vec<BadgeRule>,
}

/// Everything the engine needs, loaded from one data file.
#[derive(Debug, Clone)]
pub struct TimetableData {
    pub store: StaticTimetable,
    pub calendar: HolidayCalendar,
    pub rules: RuleTable,
}

/// Load and check a timetable data file.
///
/// Structural problems (bad JSON, duplicate routes, impossible rules) fail
/// the load. Malformed clock strings do not: they are kept as published and
/// surface through [`StaticTimetable::validate`] and at lookup time.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<TimetableData, LoadError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

/// Parse timetable data from a JSON string.
pub fn load_from_str(contents: &str) -> Result<TimetableData, LoadError> {
    let file: TimetableFile = serde_json::from_str(contents)?;

    let mut store = StaticTimetable::new();
    let mut seen = HashSet::new();

    for entry in file.routes {
        if !seen.insert(entry.id.clone()) {
            return Err(LoadError::DuplicateRoute(entry.id));
        }

        let count = entry.directions.len();
        if count == 0 || count > 2 {
            return Err(LoadError::DirectionCount {
                route: entry.id,
                count,
            });
        }

        let mut route = RouteInfo::new(entry.id.clone(), entry.kind, entry.policy);
        for (idx, direction) in entry.directions.into_iter().enumerate() {
            let index = DirectionIndex::new(idx as u8).map_err(|_| LoadError::DirectionCount {
                route: entry.id.clone(),
                count,
            })?;

            for (day_type, times) in direction.departures {
                store.set_departures(&entry.id, index, day_type, times);
            }
            route.directions.push(DirectionInfo {
                index,
                name: direction.name,
            });
        }
        store.add_route(route);
    }

    let rules = match file.badge_rules {
        Some(snapshot) => build_rules(snapshot)?,
        None => default_rules(),
    };

    Ok(TimetableData {
        store,
        calendar: HolidayCalendar::with_holidays(file.holidays),
        rules,
    })
}

fn build_rules(snapshot: RuleSnapshot) -> Result<RuleTable, LoadError> {
    let mut table = RuleTable::new(snapshot.version);

    for entry in snapshot.routes {
        for rule in entry.rules {
            if let BadgeRule::Minute { minute, .. } = rule
                && minute > 59
            {
                return Err(LoadError::InvalidRule {
                    route: entry.route,
                    direction: entry.direction,
                    reason: format!("minute {minute} is out of range"),
                });
            }
            table.add(entry.route.clone(), entry.direction, rule);
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarClassifier;
    use crate::timetable::TimetableStore;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "routes": [
            { "id": "NR334", "kind": "bus",
              "directions": [
                { "name": "To Airport", "departures": { "weekday": ["07:00", "07:30"] } },
                { "name": "To Discovery Bay", "departures": { "saturday": ["08:00"] } }
              ] },
            { "id": "FERRY", "kind": "ferry", "policy": "single_horizon",
              "directions": [ { "departures": {} } ] }
        ],
        "holidays": ["2024-12-25"]
    }"#;

    fn route(s: &str) -> RouteId {
        RouteId::parse(s).unwrap()
    }

    #[test]
    fn loads_routes_and_lists() {
        let data = load_from_str(SAMPLE).unwrap();

        assert_eq!(data.store.len(), 2);
        let info = data.store.route(&route("NR334")).unwrap();
        assert_eq!(info.kind, TransportKind::Bus);
        assert_eq!(info.policy, DisplayPolicy::Standard);
        assert_eq!(info.directions.len(), 2);
        assert_eq!(info.directions[1].name.as_deref(), Some("To Discovery Bay"));

        let list = data
            .store
            .lookup(&route("NR334"), DirectionIndex::INBOUND, DayType::Saturday)
            .unwrap();
        assert_eq!(list.len(), 1);

        let ferry = data.store.route(&route("FERRY")).unwrap();
        assert_eq!(ferry.policy, DisplayPolicy::SingleHorizon);
    }

    #[test]
    fn holidays_feed_calendar() {
        let data = load_from_str(SAMPLE).unwrap();
        let christmas = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(data.calendar.classify(christmas), DayType::SundayOrHoliday);
    }

    #[test]
    fn default_rules_when_absent() {
        let data = load_from_str(SAMPLE).unwrap();
        assert_eq!(data.rules.version(), default_rules().version());
    }

    #[test]
    fn rule_snapshot_replaces_defaults() {
        let json = r#"{
            "routes": [],
            "badge_rules": { "version": "test-1", "routes": [
                { "route": "NR1", "direction": 1, "rules": [ { "last_at": "22:00" } ] }
            ] }
        }"#;
        let data = load_from_str(json).unwrap();
        assert_eq!(data.rules.version(), "test-1");
        assert_eq!(
            data.rules.rules_for(&route("NR1"), DirectionIndex::INBOUND).len(),
            1
        );
        assert!(data.rules.rules_for(&route("NR334"), DirectionIndex::OUTBOUND).is_empty());
    }

    #[test]
    fn rejects_out_of_range_minute_rule() {
        let json = r#"{
            "routes": [],
            "badge_rules": { "version": "x", "routes": [
                { "route": "NR1", "direction": 0, "rules": [ { "minute": 75, "kind": "via_alt" } ] }
            ] }
        }"#;
        assert!(matches!(
            load_from_str(json),
            Err(LoadError::InvalidRule { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_route() {
        let json = r#"{ "routes": [
            { "id": "NR1", "kind": "bus", "directions": [ {} ] },
            { "id": "NR1", "kind": "bus", "directions": [ {} ] }
        ] }"#;
        assert!(matches!(
            load_from_str(json),
            Err(LoadError::DuplicateRoute(id)) if id.as_str() == "NR1"
        ));
    }

    #[test]
    fn rejects_bad_direction_count() {
        let json = r#"{ "routes": [
            { "id": "NR1", "kind": "bus", "directions": [ {}, {}, {} ] }
        ] }"#;
        assert!(matches!(
            load_from_str(json),
            Err(LoadError::DirectionCount { count: 3, .. })
        ));

        let json = r#"{ "routes": [ { "id": "NR1", "kind": "bus", "directions": [] } ] }"#;
        assert!(matches!(
            load_from_str(json),
            Err(LoadError::DirectionCount { count: 0, .. })
        ));
    }

    #[test]
    fn malformed_times_load_but_validate_fails() {
        let json = r#"{ "routes": [
            { "id": "NR1", "kind": "bus",
              "directions": [ { "departures": { "weekday": ["07:00", "7:30"] } } ] }
        ] }"#;
        let data = load_from_str(json).unwrap();
        assert_eq!(data.store.validate().len(), 1);
    }

    #[test]
    fn invalid_json_is_error() {
        assert!(matches!(load_from_str("{"), Err(LoadError::Json(_))));
        assert!(matches!(
            load_from_str(r#"{ "routes": [ { "id": "nr1", "kind": "bus", "directions": [{}] } ] }"#),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let data = load_from_path(file.path()).unwrap();
        assert_eq!(data.store.len(), 2);
    }

    #[test]
    fn bundled_sample_is_clean() {
        let data = load_from_str(include_str!("../../data/timetable.json")).unwrap();

        assert_eq!(data.store.len(), 5);
        assert!(data.store.validate().is_empty());
        assert_eq!(data.rules.version(), "2024-10");

        let last = data
            .store
            .lookup(&route("NR338"), DirectionIndex::OUTBOUND, DayType::Weekday)
            .unwrap();
        assert!(last.last().unwrap().offset > 86_400);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
