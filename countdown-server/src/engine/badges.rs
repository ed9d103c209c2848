//! Badge annotation.
//!
//! The annotator knows nothing about individual routes. It reads the
//! declarative rules for a (route, direction) from a [`RuleTable`] and
//! applies them in a fixed order:
//!
//! 1. `Last`, when the departure is the day's last one;
//! 2. the first matching route rule: an exact-time rule wins over a
//!    minute rule;
//! 3. `Estimated`, only when neither of the above applied.

use crate::domain::{Badge, BadgeKind, ClockTime, DirectionIndex, RouteId};
use crate::rules::{BadgeRule, RuleTable};

#[derive(Debug, Clone, Copy)]
pub struct BadgeAnnotator<'a> {
    rules: &'a RuleTable,
}

impl<'a> BadgeAnnotator<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Self { rules }
    }

    /// Badges for one departure.
    ///
    /// `is_last_in_day` is the departure's position-based status. When the
    /// (route, direction) has `LastAt` rules they decide instead, because
    /// such lists continue past the nominal last trip.
    pub fn annotate(
        &self,
        route: &RouteId,
        direction: DirectionIndex,
        time: ClockTime,
        is_last_in_day: bool,
    ) -> Vec<Badge> {
        let rules = self.rules.rules_for(route, direction);

        let last_overrides: Vec<ClockTime> = rules
            .iter()
            .filter_map(|rule| match rule {
                BadgeRule::LastAt { last_at } => Some(*last_at),
                _ => None,
            })
            .collect();
        let is_last = if last_overrides.is_empty() {
            is_last_in_day
        } else {
            last_overrides.contains(&time)
        };

        let mut badges = Vec::with_capacity(2);
        if is_last {
            badges.push(Badge::from(BadgeKind::Last));
        }
        if let Some(kind) = rule_badge(rules, time) {
            badges.push(Badge::from(kind));
        }
        if badges.is_empty() {
            badges.push(Badge::from(BadgeKind::Estimated));
        }
        badges
    }
}

fn rule_badge(rules: &[BadgeRule], time: ClockTime) -> Option<BadgeKind> {
    let exact = rules.iter().find_map(|rule| match rule {
        BadgeRule::At { at, kind } if *at == time => Some(*kind),
        _ => None,
    });
    exact.or_else(|| {
        rules.iter().find_map(|rule| match rule {
            BadgeRule::Minute { minute, kind } if *minute == time.minute() => Some(*kind),
            _ => None,
        })
    })
}
