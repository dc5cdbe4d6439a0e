use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{HealthError, Result};
use crate::model::nutrition::DailyNutrition;
use crate::time::WeekKey;

/// Everything known about one calendar date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyHealthRecord {
    pub date: NaiveDate,
    pub nutrition: DailyNutrition,
    pub exercise_minutes: u64,
    /// 0.0 when no weight was measured that day.
    pub weight: f64,
}

impl DailyHealthRecord {
    pub fn new(
        date: NaiveDate,
        nutrition: DailyNutrition,
        exercise_minutes: u64,
        weight: f64,
    ) -> Result<Self> {
        if nutrition.date != date {
            return Err(HealthError::MealDateMismatch {
                day: date,
                meal: "nutrition".to_string(),
                meal_date: nutrition.date,
            });
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(HealthError::NegativeValue {
                date,
                field: "weight".to_string(),
                value: weight,
            });
        }

        Ok(Self {
            date,
            nutrition,
            exercise_minutes,
            weight,
        })
    }

    /// Year, month and day as zero-padded display strings.
    pub fn ymd(&self) -> (String, String, String) {
        (
            self.date.format("%Y").to_string(),
            self.date.format("%m").to_string(),
            self.date.format("%d").to_string(),
        )
    }

    /// Numeric `YYYYMMDD` form, ordered like the date itself.
    pub fn id(&self) -> u32 {
        self.date.year() as u32 * 10_000 + self.date.month() * 100 + self.date.day()
    }

    pub fn week(&self) -> WeekKey {
        WeekKey::of(self.date)
    }

    pub fn has_weight(&self) -> bool {
        self.weight > 0.0
    }
}
