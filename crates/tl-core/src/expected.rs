//! Expected working hours per calendar period.

use serde::{Deserialize, Serialize};

use crate::calendar::Period;

/// Working-time assumptions used to derive expected hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedHours {
    pub workdays_per_week: u32,
    pub holidays_per_year: u32,
    pub vacation_days_per_year: u32,
    pub workhours_per_week: u32,
}

impl Default for ExpectedHours {
    fn default() -> Self {
        Self {
            workdays_per_week: 5,
            holidays_per_year: 9,
            vacation_days_per_year: 30,
            workhours_per_week: 35,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
impl ExpectedHours {
    pub fn day(&self) -> i64 {
        if self.workdays_per_week == 0 {
            return 0;
        }
        i64::from(self.workhours_per_week / self.workdays_per_week)
    }

    pub fn week(&self) -> i64 {
        i64::from(self.workhours_per_week)
    }

    pub fn month(&self) -> i64 {
        self.year() / 12
    }

    pub fn year(&self) -> i64 {
        (self.day() as f64 * self.workdays_per_year()) as i64
    }

    /// Working days in a year after holidays and vacation.
    pub fn workdays_per_year(&self) -> f64 {
        f64::from(365 - self.holidays_per_year.min(365)) * f64::from(self.workdays_per_week) / 7.0
            - f64::from(self.vacation_days_per_year)
    }

    pub fn for_period(&self, period: Period) -> i64 {
        match period {
            Period::Day => self.day(),
            Period::Week => self.week(),
            Period::Month => self.month(),
            Period::Year => self.year(),
        }
    }
}
