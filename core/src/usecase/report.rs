use tracing::info;

use crate::error::Result;
use crate::model::health_day::DailyHealthRecord;
use crate::model::summary::{MonthlySummary, WeeklySummary};
use crate::repository::RowSource;
use crate::service::import_service::{read_exercise_minutes, read_nutrition_days, read_weights};
use crate::service::merge_service::merge_records;
use crate::usecase::grouping::{group_by_month, group_by_week};

/// Load, merge and group the three exports. Any invalid value aborts the whole run.
pub struct HealthReportUseCase<'a, N: RowSource, W: RowSource, E: RowSource> {
    nutrition: &'a N,
    weights: &'a W,
    exercise: &'a E,
}

impl<'a, N: RowSource, W: RowSource, E: RowSource> HealthReportUseCase<'a, N, W, E> {
    pub fn new(nutrition: &'a N, weights: &'a W, exercise: &'a E) -> Self {
        Self {
            nutrition,
            weights,
            exercise,
        }
    }

    pub fn daily_records(&self) -> Result<Vec<DailyHealthRecord>> {
        // Each source is read to the end before the next one is opened.
        let nutrition = read_nutrition_days(self.nutrition)?;
        let weights = read_weights(self.weights)?;
        let exercise = read_exercise_minutes(self.exercise)?;
        info!(
            nutrition_days = nutrition.len(),
            weight_days = weights.len(),
            exercise_days = exercise.len(),
            "sources loaded"
        );

        merge_records(nutrition, &weights, &exercise)
    }

    pub fn weekly_report(&self) -> Result<Vec<WeeklySummary>> {
        let weeks = group_by_week(self.daily_records()?)?;
        info!(weeks = weeks.len(), "weekly report ready");
        Ok(weeks)
    }

    pub fn monthly_report(&self) -> Result<Vec<MonthlySummary>> {
        let months = group_by_month(self.daily_records()?)?;
        info!(months = months.len(), "monthly report ready");
        Ok(months)
    }
}
