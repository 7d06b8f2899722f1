//! Due dates for monthly bills

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{BillingPeriod, TemporalError};

/// Bills fall due on a fixed day of their billing month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDatePolicy {
    due_day: u32,
}

impl DueDatePolicy {
    pub const DEFAULT_DUE_DAY: u32 = 15;

    /// # Errors
    ///
    /// Returns `InvalidDay` unless `due_day` is within 1..=31.
    pub fn new(due_day: u32) -> Result<Self, TemporalError> {
        if !(1..=31).contains(&due_day) {
            return Err(TemporalError::InvalidDay(due_day));
        }
        Ok(Self { due_day })
    }

    pub fn due_day(&self) -> u32 {
        self.due_day
    }

    /// Due date of a period's bill, clamped to the end of short months
    pub fn due_date(&self, period: BillingPeriod) -> Result<NaiveDate, TemporalError> {
        period.day(self.due_day)
    }

    /// Period and due date of a lease's first bill
    ///
    /// The period is the start month. A lease starting after that month's
    /// due day gets until the due day of the following month.
    pub fn first_bill(&self, start_date: NaiveDate) -> Result<(BillingPeriod, NaiveDate), TemporalError> {
        let period = BillingPeriod::containing(start_date);
        let due = self.due_date(period)?;
        if start_date > due {
            return Ok((period, self.due_date(period.next())?));
        }
        Ok((period, due))
    }
}

impl Default for DueDatePolicy {
    fn default() -> Self {
        Self {
            due_day: Self::DEFAULT_DUE_DAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_bill_due_in_start_month() {
        let (period, due) = DueDatePolicy::default().first_bill(date(2024, 1, 1)).unwrap();
        assert_eq!(period.label(), "2024-01");
        assert_eq!(due, date(2024, 1, 15));
    }

    #[test]
    fn test_first_bill_after_due_day_rolls_over() {
        let (period, due) = DueDatePolicy::default().first_bill(date(2024, 12, 20)).unwrap();
        assert_eq!(period.label(), "2024-12");
        assert_eq!(due, date(2025, 1, 15));
    }

    #[test]
    fn test_due_day_clamped_in_february() {
        let policy = DueDatePolicy::new(31).unwrap();
        let due = policy.due_date(BillingPeriod::new(2024, 2).unwrap()).unwrap();
        assert_eq!(due, date(2024, 2, 29));
    }

    #[test]
    fn test_invalid_due_day() {
        assert!(DueDatePolicy::new(0).is_err());
        assert!(DueDatePolicy::new(32).is_err());
    }
}
