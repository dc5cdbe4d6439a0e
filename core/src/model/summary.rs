use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{HealthError, Result};
use crate::model::health_day::DailyHealthRecord;
use crate::time::{overlap_days, round_to, MonthKey, WeekKey};

/// A per-day value plus the predicate deciding whether a day has that value at all.
pub struct Metric {
    pub name: &'static str,
    pub has_data: fn(&DailyHealthRecord) -> bool,
    pub value: fn(&DailyHealthRecord) -> f64,
}

impl Metric {
    /// Mean over the days that have data, rounded to 2 decimals.
    pub fn average(&self, group: &str, days: &[DailyHealthRecord]) -> Result<f64> {
        let (sum, count) = days
            .iter()
            .filter(|d| (self.has_data)(d))
            .fold((0.0, 0usize), |(sum, count), d| (sum + (self.value)(d), count + 1));

        if count == 0 {
            return Err(HealthError::NoData {
                group: group.to_string(),
                metric: self.name.to_string(),
            });
        }
        Ok(round_to(sum / count as f64, 2))
    }
}

fn nutrition_logged(day: &DailyHealthRecord) -> bool {
    day.nutrition.consumed
}

fn any_day(_: &DailyHealthRecord) -> bool {
    true
}

pub const FAT: Metric = Metric {
    name: "fat",
    has_data: nutrition_logged,
    value: |d| d.nutrition.total_fat,
};
pub const SATURATED_FAT: Metric = Metric {
    name: "saturated fat",
    has_data: nutrition_logged,
    value: |d| d.nutrition.total_saturated_fat,
};
pub const FIBER: Metric = Metric {
    name: "fiber",
    has_data: nutrition_logged,
    value: |d| d.nutrition.total_fiber,
};
pub const PROTEIN: Metric = Metric {
    name: "protein",
    has_data: nutrition_logged,
    value: |d| d.nutrition.total_protein,
};
pub const CARBOHYDRATE: Metric = Metric {
    name: "carbohydrate",
    has_data: nutrition_logged,
    value: |d| d.nutrition.total_carbohydrate,
};
pub const SUGAR: Metric = Metric {
    name: "sugar",
    has_data: nutrition_logged,
    value: |d| d.nutrition.total_sugar,
};
pub const EXERCISE: Metric = Metric {
    name: "exercise",
    has_data: any_day,
    value: |d| d.exercise_minutes as f64,
};
pub const WEIGHT: Metric = Metric {
    name: "weight",
    has_data: DailyHealthRecord::has_weight,
    value: |d| d.weight,
};

/// Aggregate statistics shared by every grouping of days.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub day_count: usize,
    pub nutrition_day_count: usize,
    pub avg_fat: f64,
    pub avg_saturated_fat: f64,
    pub avg_fiber: f64,
    pub avg_protein: f64,
    pub avg_carbohydrate: f64,
    pub avg_sugar: f64,
    pub total_exercise: u64,
    pub avg_exercise: f64,
    pub avg_weight: f64,
    /// Average fat divided by average weight, not a mean of daily ratios.
    pub fat_per_kg: f64,
    pub protein_per_kg: f64,
}

impl GroupStats {
    pub fn compute(group: &str, days: &[DailyHealthRecord]) -> Result<Self> {
        if days.is_empty() {
            return Err(HealthError::EmptyGroup {
                group: group.to_string(),
            });
        }

        let avg_fat = FAT.average(group, days)?;
        let avg_protein = PROTEIN.average(group, days)?;
        let avg_weight = WEIGHT.average(group, days)?;
        if avg_weight == 0.0 {
            return Err(HealthError::ZeroWeight {
                group: group.to_string(),
            });
        }

        let total_exercise = days
            .iter()
            .try_fold(0u64, |sum, d| sum.checked_add(d.exercise_minutes))
            .ok_or_else(|| HealthError::Overflow {
                at: group.to_string(),
                field: EXERCISE.name.to_string(),
            })?;

        Ok(Self {
            day_count: days.len(),
            nutrition_day_count: days.iter().filter(|d| nutrition_logged(d)).count(),
            avg_fat,
            avg_saturated_fat: SATURATED_FAT.average(group, days)?,
            avg_fiber: FIBER.average(group, days)?,
            avg_protein,
            avg_carbohydrate: CARBOHYDRATE.average(group, days)?,
            avg_sugar: SUGAR.average(group, days)?,
            total_exercise,
            avg_exercise: EXERCISE.average(group, days)?,
            avg_weight,
            fat_per_kg: round_to(avg_fat / avg_weight, 2),
            protein_per_kg: round_to(avg_protein / avg_weight, 2),
        })
    }
}

/// One ISO week of daily records.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeeklySummary {
    pub key: WeekKey,
    pub id: String,
    /// Month of the week's Monday.
    pub month: u32,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub days_range: String,
    /// Days of this week inside the overall span of the data set.
    pub covered_days: u32,
    pub days: Vec<DailyHealthRecord>,
    pub stats: GroupStats,
}

impl WeeklySummary {
    /// `span` is the first and last date of the whole data set.
    pub fn new(
        key: WeekKey,
        days: Vec<DailyHealthRecord>,
        span: (NaiveDate, NaiveDate),
    ) -> Result<Self> {
        let id = key.to_string();
        for day in &days {
            let actual = day.week();
            if actual != key {
                return Err(HealthError::MembershipMismatch {
                    date: day.date,
                    expected: id,
                    actual: actual.to_string(),
                });
            }
        }

        let (first_day, last_day) = match (key.monday(), key.sunday()) {
            (Some(mon), Some(sun)) => (mon, sun),
            _ => return Err(HealthError::EmptyGroup { group: id }),
        };
        let stats = GroupStats::compute(&id, &days)?;

        Ok(Self {
            key,
            month: first_day.month(),
            days_range: format!("{}-{}", first_day.day(), last_day.day()),
            covered_days: overlap_days(first_day, last_day, span.0, span.1),
            first_day,
            last_day,
            id,
            days,
            stats,
        })
    }
}

/// One calendar month of daily records.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub key: MonthKey,
    pub id: String,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub covered_days: u32,
    pub days: Vec<DailyHealthRecord>,
    pub stats: GroupStats,
}

impl MonthlySummary {
    pub fn new(
        key: MonthKey,
        days: Vec<DailyHealthRecord>,
        span: (NaiveDate, NaiveDate),
    ) -> Result<Self> {
        let id = key.to_string();
        if let Some(day) = days.iter().find(|d| MonthKey::of(d.date) != key) {
            return Err(HealthError::MembershipMismatch {
                date: day.date,
                expected: id,
                actual: MonthKey::of(day.date).to_string(),
            });
        }

        let (first_day, last_day) = match (key.first_day(), key.last_day()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(HealthError::EmptyGroup { group: id }),
        };
        let stats = GroupStats::compute(&id, &days)?;

        Ok(Self {
            key,
            covered_days: overlap_days(first_day, last_day, span.0, span.1),
            first_day,
            last_day,
            id,
            days,
            stats,
        })
    }
}
