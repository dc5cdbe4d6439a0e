//! Builds the per-date maps for each of the three exports.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{HealthError, Result};
use crate::model::nutrition::{DailyNutrition, Macros, Meal, NutritionRecord};
use crate::repository::{Row, RowSource};
use crate::time::parse_date;

pub const DATE: &str = "Date";
pub const MEAL: &str = "Meal";
pub const CALORIES: &str = "Calories";
pub const FAT: &str = "Fat (g)";
pub const SATURATED_FAT: &str = "Saturated Fat";
pub const FIBER: &str = "Fiber";
pub const SUGAR: &str = "Sugar";
pub const PROTEIN: &str = "Protein (g)";
pub const CARBOHYDRATES: &str = "Carbohydrates (g)";
pub const WEIGHT: &str = "Weight";
pub const EXERCISE_MINUTES: &str = "Exercise Minutes";

fn parse_decimal(source: &str, row: &Row, field: &str) -> Result<f64> {
    let raw = row.get(source, field)?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(HealthError::InvalidNumber {
            source_name: source.to_string(),
            line: row.line,
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}

fn parse_row_date(source: &str, row: &Row) -> Result<NaiveDate> {
    let raw = row.get(source, DATE)?;
    parse_date(raw).ok_or_else(|| HealthError::InvalidDate {
        source_name: source.to_string(),
        line: row.line,
        value: raw.to_string(),
    })
}

pub fn read_nutrition_days<S: RowSource>(source: &S) -> Result<BTreeMap<NaiveDate, DailyNutrition>> {
    let label = source.label();
    let mut meals: BTreeMap<NaiveDate, HashMap<Meal, NutritionRecord>> = BTreeMap::new();

    for row in source.read_rows()? {
        let date = parse_row_date(label, &row)?;
        let meal_raw = row.get(label, MEAL)?;
        let meal = Meal::parse(meal_raw).ok_or_else(|| HealthError::UnknownMeal {
            source_name: label.to_string(),
            line: row.line,
            value: meal_raw.to_string(),
        })?;

        let macros = Macros {
            fat: parse_decimal(label, &row, FAT)?,
            saturated_fat: parse_decimal(label, &row, SATURATED_FAT)?,
            fiber: parse_decimal(label, &row, FIBER)?,
            protein: parse_decimal(label, &row, PROTEIN)?,
            carbohydrate: parse_decimal(label, &row, CARBOHYDRATES)?,
            sugar: parse_decimal(label, &row, SUGAR)?,
            calories: parse_decimal(label, &row, CALORIES)?,
        };
        let record = NutritionRecord::new(date, macros)?;

        let day = meals.entry(date).or_default();
        if day.insert(meal, record).is_some() {
            return Err(HealthError::DuplicateMeal {
                date,
                meal: meal.to_string(),
            });
        }
    }

    let mut days = BTreeMap::new();
    for (date, mut slots) in meals {
        let mut take = |meal: Meal| slots.remove(&meal).unwrap_or_else(|| NutritionRecord::missing(date));
        let day = DailyNutrition::new(
            date,
            take(Meal::Breakfast),
            take(Meal::Lunch),
            take(Meal::Dinner),
            take(Meal::Snacks),
        )?;
        days.insert(date, day);
    }

    debug!(source = %label, days = days.len(), "loaded nutrition");
    Ok(days)
}

pub fn read_weights<S: RowSource>(source: &S) -> Result<BTreeMap<NaiveDate, f64>> {
    let label = source.label();
    let mut weights = BTreeMap::new();

    for row in source.read_rows()? {
        let date = parse_row_date(label, &row)?;
        let weight = parse_decimal(label, &row, WEIGHT)?;
        if weight < 0.0 {
            return Err(HealthError::NegativeValue {
                date,
                field: WEIGHT.to_string(),
                value: weight,
            });
        }
        match weights.entry(date) {
            Entry::Occupied(_) => {
                return Err(HealthError::DuplicateDate {
                    source_name: label.to_string(),
                    date,
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(weight);
            }
        }
    }

    debug!(source = %label, days = weights.len(), "loaded weights");
    Ok(weights)
}

/// Minutes from several rows on the same date are summed.
pub fn read_exercise_minutes<S: RowSource>(source: &S) -> Result<BTreeMap<NaiveDate, u64>> {
    let label = source.label();
    let mut minutes: BTreeMap<NaiveDate, u64> = BTreeMap::new();

    for row in source.read_rows()? {
        let date = parse_row_date(label, &row)?;
        let raw = row.get(label, EXERCISE_MINUTES)?;
        let value: i64 = raw.parse().map_err(|_| HealthError::InvalidNumber {
            source_name: label.to_string(),
            line: row.line,
            field: EXERCISE_MINUTES.to_string(),
            value: raw.to_string(),
        })?;
        if value < 0 {
            return Err(HealthError::NegativeValue {
                date,
                field: EXERCISE_MINUTES.to_string(),
                value: value as f64,
            });
        }
        let total = minutes.entry(date).or_default();
        *total = total
            .checked_add(value as u64)
            .ok_or_else(|| HealthError::Overflow {
                at: date.to_string(),
                field: EXERCISE_MINUTES.to_string(),
            })?;
    }

    debug!(source = %label, days = minutes.len(), "loaded exercise");
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::CsvTextSource;

    const NUTRITION_HEADER: &str =
        "Date,Meal,Calories,Fat (g),Saturated Fat,Fiber,Sugar,Protein (g),Carbohydrates (g)\n";

    fn nutrition(rows: &str) -> CsvTextSource {
        CsvTextSource::new("nutrition", format!("{NUTRITION_HEADER}{rows}"))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_breakfast_and_lunch_make_a_day() {
        let source = nutrition(
            "2024-01-01,Breakfast,400,10.0,2.0,5.0,8.0,20.0,30.0\n\
             2024-01-01,Lunch,600,15.0,3.0,4.0,6.0,25.0,50.0\n",
        );
        let days = read_nutrition_days(&source).unwrap();
        let day = &days[&date(2024, 1, 1)];

        assert_eq!(day.total_fat, 25.0);
        assert!(day.consumed);
        assert!(!day.dinner.consumed);
        assert_eq!(day.snacks, NutritionRecord::missing(date(2024, 1, 1)));
    }

    #[test]
    fn test_unknown_meal() {
        let source = nutrition("2024-01-01,Brunch,400,10.0,2.0,5.0,8.0,20.0,30.0\n");
        let err = read_nutrition_days(&source).unwrap_err();
        assert!(matches!(err, HealthError::UnknownMeal { line: 2, .. }));
    }

    #[test]
    fn test_non_numeric_macro() {
        let source = nutrition("2024-01-01,Dinner,400,ten,2.0,5.0,8.0,20.0,30.0\n");
        let err = read_nutrition_days(&source).unwrap_err();
        assert!(
            matches!(err, HealthError::InvalidNumber { ref field, ref value, .. } if field == FAT && value == "ten")
        );

        let source = nutrition("2024-01-01,Dinner,400,NaN,2.0,5.0,8.0,20.0,30.0\n");
        assert!(read_nutrition_days(&source).is_err());
    }

    #[test]
    fn test_invalid_date_in_nutrition() {
        let source = nutrition("2024-02-30,Dinner,400,10.0,2.0,5.0,8.0,20.0,30.0\n");
        let err = read_nutrition_days(&source).unwrap_err();
        assert!(matches!(
            err,
            HealthError::InvalidDate { ref source_name, line: 2, ref value }
                if source_name == "nutrition" && value == "2024-02-30"
        ));
    }

    #[test]
    fn test_duplicate_meal() {
        let source = nutrition(
            "2024-01-01,Dinner,400,10.0,2.0,5.0,8.0,20.0,30.0\n\
             2024-01-01,Dinner,100,1.0,0.0,0.0,0.0,2.0,3.0\n",
        );
        let err = read_nutrition_days(&source).unwrap_err();
        assert!(matches!(err, HealthError::DuplicateMeal { .. }));
    }

    #[test]
    fn test_saturated_fat_above_fat_in_row() {
        let source = nutrition("2024-01-01,Dinner,400,1.0,2.0,5.0,8.0,20.0,30.0\n");
        let err = read_nutrition_days(&source).unwrap_err();
        assert!(matches!(err, HealthError::SaturatedFatExceedsFat { .. }));
    }

    #[test]
    fn test_duplicate_weight_date() {
        let source = CsvTextSource::new("weights", "Date,Weight\n2024-01-01,80.0\n2024-01-01,80.4\n");
        let err = read_weights(&source).unwrap_err();
        assert!(matches!(err, HealthError::DuplicateDate { date: d, .. } if d == date(2024, 1, 1)));
    }

    #[test]
    fn test_negative_weight() {
        let source = CsvTextSource::new("weights", "Date,Weight\n2024-01-01,-80.0\n");
        assert!(matches!(
            read_weights(&source).unwrap_err(),
            HealthError::NegativeValue { .. }
        ));
    }

    #[test]
    fn test_exercise_accumulates() {
        let source = CsvTextSource::new(
            "exercise",
            "Date,Exercise Minutes\n2024-01-01,30\n2024-01-02,10\n2024-01-01,45\n",
        );
        let minutes = read_exercise_minutes(&source).unwrap();
        assert_eq!(minutes[&date(2024, 1, 1)], 75);
        assert_eq!(minutes[&date(2024, 1, 2)], 10);
    }

    #[test]
    fn test_exercise_total_overflow() {
        let source = CsvTextSource::new(
            "exercise",
            format!(
                "Date,Exercise Minutes\n2024-01-01,{max}\n2024-01-01,{max}\n2024-01-01,{max}\n",
                max = i64::MAX
            ),
        );
        let err = read_exercise_minutes(&source).unwrap_err();
        assert!(matches!(err, HealthError::Overflow { ref at, .. } if at == "2024-01-01"));
    }

    #[test]
    fn test_exercise_rejects_negative_and_fractional() {
        let source = CsvTextSource::new("exercise", "Date,Exercise Minutes\n2024-01-01,-5\n");
        assert!(matches!(
            read_exercise_minutes(&source).unwrap_err(),
            HealthError::NegativeValue { .. }
        ));

        let source = CsvTextSource::new("exercise", "Date,Exercise Minutes\n2024-01-01,12.5\n");
        assert!(matches!(
            read_exercise_minutes(&source).unwrap_err(),
            HealthError::InvalidNumber { .. }
        ));
    }

    #[test]
    fn test_missing_column() {
        let source = CsvTextSource::new("weights", "Date,Body Fat\n2024-01-01,20\n");
        assert!(matches!(
            read_weights(&source).unwrap_err(),
            HealthError::MissingColumn { .. }
        ));
    }
}
