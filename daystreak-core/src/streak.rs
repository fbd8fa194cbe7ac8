//! Streak bookkeeping

use chrono::NaiveDate;

/// Consecutive fully-completed days plus the dates that drive rollover
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreakState {
    pub current_streak: u32,
    /// Last date credited to the streak
    pub last_completed_date: Option<NaiveDate>,
    /// Last date the tracker was opened
    pub last_active_date: Option<NaiveDate>,
}

impl StreakState {
    pub fn is_credited(&self, date: NaiveDate) -> bool {
        self.last_completed_date == Some(date)
    }

    /// Credit `date` to the streak at most once
    pub fn credit(&mut self, date: NaiveDate) -> bool {
        if self.is_credited(date) {
            return false;
        }
        self.current_streak = self.current_streak.saturating_add(1);
        self.last_completed_date = Some(date);
        true
    }

    pub fn break_streak(&mut self) {
        self.current_streak = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_once_per_date() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let mut streak = StreakState::default();

        assert!(streak.credit(day));
        assert!(!streak.credit(day));
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.last_completed_date, Some(day));

        assert!(streak.credit(day.succ_opt().unwrap()));
        assert_eq!(streak.current_streak, 2);
    }

    #[test]
    fn test_credit_saturates_at_max() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let mut streak = StreakState {
            current_streak: u32::MAX,
            ..StreakState::default()
        };

        assert!(streak.credit(day));
        assert_eq!(streak.current_streak, u32::MAX);
    }

    #[test]
    fn test_break_keeps_dates() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let mut streak = StreakState::default();
        streak.credit(day);
        streak.break_streak();

        assert_eq!(streak.current_streak, 0);
        assert!(streak.is_credited(day));
    }
}
