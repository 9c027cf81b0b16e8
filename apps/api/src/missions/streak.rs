//! Consecutive-day completion streaks.
//!
//! Policy: one calendar-day grace. A prior completion on the same calendar
//! day leaves the streak unchanged, the previous day increments it, anything
//! older (or no prior completion) resets to 1.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub current: i32,
    pub longest: i32,
}

/// Computes the streak after a completion at `now`, given the stored
/// counters and the most recent prior completion from the progress log.
pub fn advance_streak(
    current: i32,
    longest: i32,
    last_completed: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> StreakUpdate {
    let current = match last_completed {
        Some(prev) => {
            let gap_days = (now.date_naive() - prev.date_naive()).num_days();
            if gap_days <= 0 {
                // Same calendar day (or clock skew): the day is already counted.
                current.max(1)
            } else if gap_days == 1 {
                current + 1
            } else {
                1
            }
        }
        None => 1,
    };

    StreakUpdate {
        current,
        longest: longest.max(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_first_completion_starts_streak_at_one() {
        let update = advance_streak(0, 0, None, at(1, 9));
        assert_eq!(update, StreakUpdate { current: 1, longest: 1 });
    }

    #[test]
    fn test_next_day_completion_increments() {
        let update = advance_streak(1, 1, Some(at(1, 22)), at(2, 7));
        assert_eq!(update, StreakUpdate { current: 2, longest: 2 });
    }

    #[test]
    fn test_same_day_completion_does_not_double_count() {
        let update = advance_streak(2, 2, Some(at(2, 9)), at(2, 18));
        assert_eq!(update, StreakUpdate { current: 2, longest: 2 });
    }

    #[test]
    fn test_skipped_day_resets_but_longest_survives() {
        // Day 1 and day 2 completed (current = 2), day 3 skipped, day 4 completes.
        let update = advance_streak(2, 2, Some(at(2, 9)), at(4, 9));
        assert_eq!(update, StreakUpdate { current: 1, longest: 2 });
    }

    #[test]
    fn test_calendar_day_boundary_counts_as_next_day() {
        // 23:59 then 00:01 the next day is a one-day gap, not same-day.
        let prev = Utc.with_ymd_and_hms(2026, 3, 1, 23, 59, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 0, 1, 0).unwrap();
        let update = advance_streak(1, 1, Some(prev), now);
        assert_eq!(update.current, 2);
    }

    #[test]
    fn test_longest_never_decreases() {
        let update = advance_streak(1, 7, Some(at(1, 9)), at(5, 9));
        assert_eq!(update, StreakUpdate { current: 1, longest: 7 });
    }
}
