use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::Result;
use crate::model::health_day::DailyHealthRecord;
use crate::model::nutrition::DailyNutrition;

/// Joins the three per-date maps into one record per date, ordered by date.
///
/// A date present in any source yields a record; sources that lack it
/// contribute their empty value (no meals, 0 minutes, 0.0 kg).
pub fn merge_records(
    mut nutrition: BTreeMap<NaiveDate, DailyNutrition>,
    weights: &BTreeMap<NaiveDate, f64>,
    exercise: &BTreeMap<NaiveDate, u64>,
) -> Result<Vec<DailyHealthRecord>> {
    let all_dates: BTreeSet<NaiveDate> = nutrition
        .keys()
        .chain(weights.keys())
        .chain(exercise.keys())
        .copied()
        .collect();

    let mut records = Vec::with_capacity(all_dates.len());
    for date in all_dates {
        let day = nutrition
            .remove(&date)
            .unwrap_or_else(|| DailyNutrition::missing(date));
        let weight = weights.get(&date).copied().unwrap_or(0.0);
        let minutes = exercise.get(&date).copied().unwrap_or(0);
        records.push(DailyHealthRecord::new(date, day, minutes, weight)?);
    }

    debug!(days = records.len(), "merged daily records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_union_of_dates_each_once() {
        let nutrition = BTreeMap::from([
            (date(1), DailyNutrition::missing(date(1))),
            (date(3), DailyNutrition::missing(date(3))),
        ]);
        let weights = BTreeMap::from([(date(3), 80.0), (date(5), 81.0)]);
        let exercise = BTreeMap::from([(date(2), 20), (date(5), 40)]);

        let records = merge_records(nutrition, &weights, &exercise).unwrap();
        let dates: Vec<_> = records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(1), date(2), date(3), date(5)]);

        assert_eq!(records[0].weight, 0.0);
        assert_eq!(records[0].exercise_minutes, 0);
        assert_eq!(records[1].exercise_minutes, 20);
        assert!(!records[1].nutrition.consumed);
        assert_eq!(records[2].weight, 80.0);
        assert_eq!(records[3].weight, 81.0);
        assert_eq!(records[3].exercise_minutes, 40);
    }

    #[test]
    fn test_empty_sources() {
        let records = merge_records(BTreeMap::new(), &BTreeMap::new(), &BTreeMap::new()).unwrap();
        assert!(records.is_empty());
    }
}
