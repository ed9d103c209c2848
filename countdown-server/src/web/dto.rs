//! Data transfer objects for web requests and responses.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Badge, CountdownDisplay, DayType, DepartureItem, DirectionIndex, DisplayPolicy, DomainError,
    RelativeDay, RouteId, ScheduleOverride, TransportKind, Urgency,
};
use crate::engine::{BoardSnapshot, Selection};
use crate::timetable::{DirectionInfo, RouteInfo};

/// Format accepted for the `at` query parameter.
pub const AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Query string for the board endpoint.
#[derive(Debug, Deserialize)]
pub struct BoardRequest {
    /// Route id, case-insensitive
    pub route: String,

    /// Direction index (defaults to 0)
    pub direction: Option<u8>,

    /// Schedule override: auto, weekday, saturday or sunday
    #[serde(rename = "override")]
    pub mode: Option<String>,

    /// Extended view toggle
    #[serde(default)]
    pub extended: bool,

    /// Local evaluation time, `YYYY-MM-DDTHH:MM:SS` (defaults to now)
    pub at: Option<String>,
}

impl BoardRequest {
    /// The selection described by this request.
    pub fn selection(&self) -> Result<Selection, DomainError> {
        let route = RouteId::parse_normalized(&self.route)?;
        let direction = DirectionIndex::new(self.direction.unwrap_or(0))?;
        let mode = match &self.mode {
            Some(mode) => mode.parse::<ScheduleOverride>()?,
            None => ScheduleOverride::Auto,
        };

        let mut selection = Selection::new(route)
            .with_direction(direction)
            .with_mode(mode);
        selection.extended = self.extended;
        Ok(selection)
    }

    /// The injected evaluation time, if any.
    pub fn at(&self) -> Result<Option<NaiveDateTime>, chrono::ParseError> {
        self.at
            .as_deref()
            .map(|s| NaiveDateTime::parse_from_str(s.trim(), AT_FORMAT))
            .transpose()
    }
}

/// Board response.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub route: String,
    pub direction: u8,
    pub service_day: ServiceDayResult,
    pub countdown: CountdownResult,
    pub upcoming: Vec<DepartureResult>,
    pub is_full_list: bool,
    pub is_extended_view: bool,
}

impl BoardResponse {
    pub fn from_snapshot(selection: &Selection, snapshot: &BoardSnapshot) -> Self {
        let day = &snapshot.service_day;
        let countdown = &snapshot.countdown;

        Self {
            route: selection.route.to_string(),
            direction: selection.direction.as_u8(),
            service_day: ServiceDayResult {
                date: day.date,
                day_type: day.day_type,
                was_shifted_back: day.was_shifted_back,
                mode: day.mode,
            },
            countdown: CountdownResult {
                available: countdown.available,
                target: countdown.target.map(|t| t.to_string()),
                minutes: countdown.minutes,
                seconds: countdown.seconds,
                display: countdown.display(),
                urgency: countdown.urgency(),
                badges: countdown.badges.clone(),
            },
            upcoming: snapshot
                .upcoming
                .iter()
                .map(DepartureResult::from_item)
                .collect(),
            is_full_list: snapshot.is_full_list,
            is_extended_view: snapshot.is_extended_view,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceDayResult {
    pub date: NaiveDate,
    pub day_type: DayType,
    pub was_shifted_back: bool,
    pub mode: ScheduleOverride,
}

#[derive(Debug, Serialize)]
pub struct CountdownResult {
    pub available: bool,

    /// Target departure time (HH:MM)
    pub target: Option<String>,

    /// Whole minutes remaining; may exceed 59
    pub minutes: u32,

    pub seconds: u32,
    pub display: CountdownDisplay,
    pub urgency: Urgency,
    pub badges: Vec<Badge>,
}

/// One upcoming departure.
#[derive(Debug, Serialize)]
pub struct DepartureResult {
    /// Departure time (HH:MM)
    pub time: String,

    pub day: RelativeDay,
    pub date: NaiveDate,
    pub day_type: DayType,
    pub badges: Vec<Badge>,
    pub departed: bool,
}

impl DepartureResult {
    pub fn from_item(item: &DepartureItem) -> Self {
        Self {
            time: item.time.to_string(),
            day: item.day_label.relative,
            date: item.day_label.date,
            day_type: item.day_label.day_type,
            badges: item.badges.clone(),
            departed: item.departed,
        }
    }
}

/// Route catalogue response.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteResult>,
}

#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub id: String,
    pub kind: TransportKind,
    pub policy: DisplayPolicy,
    pub extendable: bool,
    pub directions: Vec<DirectionResult>,
}

impl RouteResult {
    pub fn from_route(route: &RouteInfo) -> Self {
        Self {
            id: route.id.to_string(),
            kind: route.kind,
            policy: route.policy,
            extendable: route.policy.is_extendable(),
            directions: route.directions.iter().map(DirectionResult::from_direction).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DirectionResult {
    pub index: u8,
    pub name: Option<String>,
}

impl DirectionResult {
    pub fn from_direction(direction: &DirectionInfo) -> Self {
        Self {
            index: direction.index.as_u8(),
            name: direction.name.clone(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BadgeKind, ClockTime, Countdown, DayLabel};
    use crate::engine::ServiceDay;

    fn request(route: &str) -> BoardRequest {
        BoardRequest {
            route: route.to_string(),
            direction: None,
            mode: None,
            extended: false,
            at: None,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn request_defaults() {
        let sel = request("nr334").selection().unwrap();
        assert_eq!(sel.route.as_str(), "NR334");
        assert_eq!(sel.direction, DirectionIndex::OUTBOUND);
        assert_eq!(sel.mode, ScheduleOverride::Auto);
        assert!(!sel.extended);
    }

    #[test]
    fn request_with_everything() {
        let req = BoardRequest {
            direction: Some(1),
            mode: Some("Saturday".to_string()),
            extended: true,
            at: Some("2024-03-15T05:59:59".to_string()),
            ..request("NR330")
        };

        let sel = req.selection().unwrap();
        assert_eq!(sel.direction, DirectionIndex::INBOUND);
        assert_eq!(sel.mode, ScheduleOverride::Saturday);
        assert!(sel.extended);

        let at = req.at().unwrap().unwrap();
        assert_eq!(at, date().and_hms_opt(5, 59, 59).unwrap());
    }

    #[test]
    fn request_rejects_bad_values() {
        assert!(matches!(
            request("NR 334").selection(),
            Err(DomainError::RouteId(_))
        ));

        let req = BoardRequest {
            direction: Some(2),
            ..request("NR334")
        };
        assert!(matches!(req.selection(), Err(DomainError::Direction(_))));

        let req = BoardRequest {
            mode: Some("holiday".to_string()),
            ..request("NR334")
        };
        assert!(matches!(req.selection(), Err(DomainError::Override(_))));

        let req = BoardRequest {
            at: Some("2024-03-15 07:00".to_string()),
            ..request("NR334")
        };
        assert!(req.at().is_err());
    }

    #[test]
    fn query_string_deserialization() {
        let req: BoardRequest = serde_json::from_str(
            r#"{"route": "NR330", "direction": 1, "override": "sunday", "extended": true}"#,
        )
        .unwrap();
        assert_eq!(req.mode.as_deref(), Some("sunday"));
        assert!(req.extended);
        assert!(req.at.is_none());
    }

    #[test]
    fn board_response_from_snapshot() {
        let sel = Selection::new(RouteId::parse("NR1").unwrap());
        let seven = ClockTime::parse_hhmm("07:00").unwrap();
        let label = DayLabel {
            relative: RelativeDay::Today,
            date: date(),
            day_type: DayType::Weekday,
        };
        let snapshot = BoardSnapshot {
            service_day: ServiceDay {
                day_type: DayType::Weekday,
                date: date(),
                was_shifted_back: false,
                now_offset: 24_300,
                mode: ScheduleOverride::Auto,
            },
            countdown: Countdown::until(
                seven,
                25_200,
                0,
                900,
                vec![Badge::from(BadgeKind::Estimated)],
            ),
            upcoming: vec![DepartureItem {
                time: ClockTime::parse_hhmm("07:30").unwrap(),
                offset: 27_000,
                badges: vec![Badge::from(BadgeKind::Last)],
                day_label: label,
                departed: false,
            }],
            is_full_list: false,
            is_extended_view: false,
        };

        let response = BoardResponse::from_snapshot(&sel, &snapshot);
        assert_eq!(response.route, "NR1");
        assert_eq!(response.countdown.target.as_deref(), Some("07:00"));
        assert_eq!(response.countdown.minutes, 15);
        assert_eq!(
            response.countdown.display,
            CountdownDisplay::Minutes {
                minutes: 15,
                seconds: 0
            }
        );
        assert_eq!(response.upcoming.len(), 1);
        assert_eq!(response.upcoming[0].time, "07:30");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["service_day"]["day_type"], "weekday");
        assert_eq!(json["countdown"]["display"]["tier"], "minutes");
        assert_eq!(json["upcoming"][0]["day"], "today");
        assert_eq!(json["upcoming"][0]["badges"][0]["kind"], "last");
    }

    #[test]
    fn route_result_from_route() {
        let mut route = RouteInfo::new(
            RouteId::parse("F1").unwrap(),
            TransportKind::Ferry,
            DisplayPolicy::Standard,
        );
        route.directions.push(DirectionInfo {
            index: DirectionIndex::OUTBOUND,
            name: Some("To Island".to_string()),
        });

        let result = RouteResult::from_route(&route);
        assert_eq!(result.id, "F1");
        assert!(!result.extendable);
        assert_eq!(result.directions.len(), 1);
        assert_eq!(result.directions[0].name.as_deref(), Some("To Island"));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "ferry");
        assert_eq!(json["policy"], "standard");
    }
}
