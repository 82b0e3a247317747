//! Plan validity over time.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::models::Plan;

/// Plans with fewer whole weeks left than this are about to expire.
pub const EXPIRING_SOON_WEEKS: i64 = 2;

/// Whole weeks left before the plan ends, or `None` once it has ended.
///
/// A plan ends `duration_weeks` after its start date; from that instant on
/// it is expired regardless of how long ago that was.
pub fn remaining_weeks(plan: &Plan, now: DateTime<Utc>) -> Option<i64> {
    let end = plan.end_date();
    if now >= end {
        return None;
    }
    Some((end - now).num_weeks())
}

/// The state a plan is presented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStatus {
    Expired,
    ExpiringSoon { weeks_left: i64 },
    Active { weeks_left: i64 },
}

impl PlanStatus {
    pub fn from_remaining(remaining: Option<i64>) -> Self {
        match remaining {
            None => PlanStatus::Expired,
            Some(weeks_left) if weeks_left < EXPIRING_SOON_WEEKS => {
                PlanStatus::ExpiringSoon { weeks_left }
            }
            Some(weeks_left) => PlanStatus::Active { weeks_left },
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, PlanStatus::Expired)
    }
}

pub fn status(plan: &Plan, now: DateTime<Utc>) -> PlanStatus {
    PlanStatus::from_remaining(remaining_weeks(plan, now))
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanStatus::Expired => write!(f, "expired"),
            PlanStatus::ExpiringSoon { weeks_left: 0 } => {
                write!(f, "expiring soon (less than a week left)")
            }
            PlanStatus::ExpiringSoon { weeks_left } => {
                write!(f, "expiring soon ({} week(s) left)", weeks_left)
            }
            PlanStatus::Active { weeks_left } => write!(f, "active ({} weeks left)", weeks_left),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, day, 0, 0, 0).unwrap()
    }

    fn four_week_plan() -> Plan {
        Plan::new(date(1, 1), 4).unwrap()
    }

    #[test]
    fn test_less_than_a_week_left() {
        assert_eq!(remaining_weeks(&four_week_plan(), date(1, 25)), Some(0));
        assert_eq!(
            status(&four_week_plan(), date(1, 25)),
            PlanStatus::ExpiringSoon { weeks_left: 0 }
        );
    }

    #[test]
    fn test_expired_on_and_after_end() {
        assert_eq!(remaining_weeks(&four_week_plan(), date(1, 29)), None);
        assert_eq!(remaining_weeks(&four_week_plan(), date(6, 1)), None);
        assert!(status(&four_week_plan(), date(1, 29)).is_expired());
    }

    #[test]
    fn test_whole_weeks_are_floored() {
        let plan = four_week_plan();
        assert_eq!(remaining_weeks(&plan, date(1, 1)), Some(4));
        assert_eq!(remaining_weeks(&plan, date(1, 2)), Some(3));
        assert_eq!(remaining_weeks(&plan, date(1, 15)), Some(2));
        assert_eq!(remaining_weeks(&plan, date(1, 16)), Some(1));
    }

    #[test]
    fn test_status_thresholds() {
        let plan = four_week_plan();
        assert_eq!(
            status(&plan, date(1, 15)),
            PlanStatus::Active { weeks_left: 2 }
        );
        assert_eq!(
            status(&plan, date(1, 16)),
            PlanStatus::ExpiringSoon { weeks_left: 1 }
        );
    }

    #[test]
    fn test_zero_duration_is_expired_from_start() {
        let mut plan = four_week_plan();
        plan.duration_weeks = 0;
        assert_eq!(remaining_weeks(&plan, date(1, 1)), None);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(PlanStatus::Expired.to_string(), "expired");
        assert_eq!(
            PlanStatus::ExpiringSoon { weeks_left: 0 }.to_string(),
            "expiring soon (less than a week left)"
        );
        assert_eq!(
            PlanStatus::Active { weeks_left: 3 }.to_string(),
            "active (3 weeks left)"
        );
    }
}
