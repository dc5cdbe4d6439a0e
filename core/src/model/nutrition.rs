use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{HealthError, Result};
use crate::time::round_to;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl Meal {
    pub const ALL: [Meal; 4] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner, Meal::Snacks];

    /// Exact, case-sensitive match on the export's meal label.
    pub fn parse(label: &str) -> Option<Meal> {
        Meal::ALL.into_iter().find(|m| m.as_str() == label)
    }

    pub fn initial(&self) -> char {
        match self {
            Meal::Breakfast => 'B',
            Meal::Lunch => 'L',
            Meal::Dinner => 'D',
            Meal::Snacks => 'S',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Meal::Breakfast => "Breakfast",
            Meal::Lunch => "Lunch",
            Meal::Dinner => "Dinner",
            Meal::Snacks => "Snacks",
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


/// Raw per-meal values as read from a source row, before validation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Macros {
    pub fat: f64,
    pub saturated_fat: f64,
    pub fiber: f64,
    pub protein: f64,
    pub carbohydrate: f64,
    pub sugar: f64,
    pub calories: f64,
}

/// One meal's nutrition for one date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NutritionRecord {
    pub date: NaiveDate,
    pub fat: f64,
    pub saturated_fat: f64,
    pub fiber: f64,
    pub protein: f64,
    pub carbohydrate: f64,
    pub sugar: f64,
    pub calories: f64,
    pub consumed: bool,
}

impl NutritionRecord {
    pub fn new(date: NaiveDate, macros: Macros) -> Result<Self> {
        let grams = [
            ("fat", macros.fat),
            ("saturated fat", macros.saturated_fat),
            ("fiber", macros.fiber),
            ("protein", macros.protein),
            ("carbohydrate", macros.carbohydrate),
            ("sugar", macros.sugar),
        ];
        for (field, value) in grams {
            if value < 0.0 {
                return Err(HealthError::NegativeValue {
                    date,
                    field: field.to_string(),
                    value,
                });
            }
        }
        if macros.saturated_fat > macros.fat {
            return Err(HealthError::SaturatedFatExceedsFat {
                date,
                saturated_fat: macros.saturated_fat,
                fat: macros.fat,
            });
        }

        // Decided on the unrounded values so a trace amount still counts as eaten.
        let consumed = macros.fat > 0.0 || macros.protein > 0.0 || macros.carbohydrate > 0.0;

        Ok(Self {
            date,
            fat: round_to(macros.fat, 1),
            saturated_fat: round_to(macros.saturated_fat, 1),
            fiber: round_to(macros.fiber, 1),
            protein: round_to(macros.protein, 1),
            carbohydrate: round_to(macros.carbohydrate, 1),
            sugar: round_to(macros.sugar, 1),
            calories: macros.calories,
            consumed,
        })
    }

    /// Placeholder for a meal that was never logged.
    pub fn missing(date: NaiveDate) -> Self {
        Self {
            date,
            fat: 0.0,
            saturated_fat: 0.0,
            fiber: 0.0,
            protein: 0.0,
            carbohydrate: 0.0,
            sugar: 0.0,
            calories: 0.0,
            consumed: false,
        }
    }
}

/// The four meal slots of one day plus their rounded totals.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyNutrition {
    pub date: NaiveDate,
    pub breakfast: NutritionRecord,
    pub lunch: NutritionRecord,
    pub dinner: NutritionRecord,
    pub snacks: NutritionRecord,
    pub consumed: bool,
    pub total_fat: f64,
    pub total_saturated_fat: f64,
    pub total_fiber: f64,
    pub total_protein: f64,
    pub total_carbohydrate: f64,
    pub total_sugar: f64,
    pub total_calories: f64,
}

impl DailyNutrition {
    pub fn new(
        date: NaiveDate,
        breakfast: NutritionRecord,
        lunch: NutritionRecord,
        dinner: NutritionRecord,
        snacks: NutritionRecord,
    ) -> Result<Self> {
        for (meal, record) in [
            (Meal::Breakfast, &breakfast),
            (Meal::Lunch, &lunch),
            (Meal::Dinner, &dinner),
            (Meal::Snacks, &snacks),
        ] {
            if record.date != date {
                return Err(HealthError::MealDateMismatch {
                    day: date,
                    meal: meal.to_string(),
                    meal_date: record.date,
                });
            }
        }

        // Two of the three main meals make a logged day; snacks never count.
        let main_meals = [&breakfast, &lunch, &dinner]
            .iter()
            .filter(|r| r.consumed)
            .count();
        let consumed = main_meals >= 2;

        let meals = [&breakfast, &lunch, &dinner, &snacks];
        let total = |f: fn(&NutritionRecord) -> f64| round_to(meals.iter().map(|r| f(r)).sum(), 1);
        let total_fat = total(|r| r.fat);
        let total_saturated_fat = total(|r| r.saturated_fat);
        let total_fiber = total(|r| r.fiber);
        let total_protein = total(|r| r.protein);
        let total_carbohydrate = total(|r| r.carbohydrate);
        let total_sugar = total(|r| r.sugar);
        let total_calories = total(|r| r.calories);

        Ok(Self {
            date,
            consumed,
            total_fat,
            total_saturated_fat,
            total_fiber,
            total_protein,
            total_carbohydrate,
            total_sugar,
            total_calories,
            breakfast,
            lunch,
            dinner,
            snacks,
        })
    }

    /// A day with nothing logged.
    pub fn missing(date: NaiveDate) -> Self {
        let empty = NutritionRecord::missing(date);
        Self {
            date,
            breakfast: empty.clone(),
            lunch: empty.clone(),
            dinner: empty.clone(),
            snacks: empty,
            consumed: false,
            total_fat: 0.0,
            total_saturated_fat: 0.0,
            total_fiber: 0.0,
            total_protein: 0.0,
            total_carbohydrate: 0.0,
            total_sugar: 0.0,
            total_calories: 0.0,
        }
    }

    pub fn meal(&self, meal: Meal) -> &NutritionRecord {
        match meal {
            Meal::Breakfast => &self.breakfast,
            Meal::Lunch => &self.lunch,
            Meal::Dinner => &self.dinner,
            Meal::Snacks => &self.snacks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn meal(fat: f64, protein: f64, carbohydrate: f64) -> NutritionRecord {
        NutritionRecord::new(
            day(),
            Macros {
                fat,
                protein,
                carbohydrate,
                ..Macros::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_meal_parse() {
        assert_eq!(Meal::parse("Breakfast"), Some(Meal::Breakfast));
        assert_eq!(Meal::parse("Snacks"), Some(Meal::Snacks));
        assert_eq!(Meal::parse("Brunch"), None);
        assert_eq!(Meal::parse("breakfast"), None);
    }

    #[test]
    fn test_record_rounding_and_consumed() {
        let record = NutritionRecord::new(
            day(),
            Macros {
                fat: 10.04,
                saturated_fat: 2.06,
                fiber: 5.0,
                protein: 20.0,
                carbohydrate: 30.0,
                sugar: 8.0,
                calories: 400.0,
            },
        )
        .unwrap();
        assert_eq!(record.fat, 10.0);
        assert_eq!(record.saturated_fat, 2.1);
        assert!(record.consumed);

        assert!(!NutritionRecord::missing(day()).consumed);
        // Only fiber and sugar logged: not a meal
        let record = NutritionRecord::new(
            day(),
            Macros {
                fiber: 3.0,
                sugar: 4.0,
                ..Macros::default()
            },
        )
        .unwrap();
        assert!(!record.consumed);
    }

    #[test]
    fn test_record_rejects_saturated_fat_above_fat() {
        let err = NutritionRecord::new(
            day(),
            Macros {
                fat: 1.0,
                saturated_fat: 2.0,
                ..Macros::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, HealthError::SaturatedFatExceedsFat { .. }));
    }

    #[test]
    fn test_record_rejects_negative_macro() {
        let err = NutritionRecord::new(
            day(),
            Macros {
                protein: -1.0,
                ..Macros::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, HealthError::NegativeValue { .. }));
    }

    #[test]
    fn test_day_two_of_three_rule() {
        let empty = || NutritionRecord::missing(day());

        let lone_breakfast =
            DailyNutrition::new(day(), meal(10.0, 0.0, 0.0), empty(), empty(), meal(50.0, 50.0, 50.0))
                .unwrap();
        assert!(!lone_breakfast.consumed, "snacks must not count towards a logged day");

        let breakfast_dinner =
            DailyNutrition::new(day(), meal(1.0, 0.0, 0.0), empty(), meal(0.0, 0.0, 2.0), empty()).unwrap();
        assert!(breakfast_dinner.consumed);

        assert!(!DailyNutrition::missing(day()).consumed);
    }

    #[test]
    fn test_day_totals() {
        let day_nutrition = DailyNutrition::new(
            day(),
            meal(10.0, 20.0, 30.0),
            meal(15.0, 0.0, 0.0),
            NutritionRecord::missing(day()),
            meal(0.1, 0.2, 0.0),
        )
        .unwrap();
        assert_eq!(day_nutrition.total_fat, 25.1);
        assert_eq!(day_nutrition.total_protein, 20.2);
        assert_eq!(day_nutrition.total_carbohydrate, 30.0);
        assert!(day_nutrition.consumed);
    }

    #[test]
    fn test_day_rejects_foreign_meal_date() {
        let other = NutritionRecord::missing(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        let err = DailyNutrition::new(
            day(),
            NutritionRecord::missing(day()),
            other,
            NutritionRecord::missing(day()),
            NutritionRecord::missing(day()),
        )
        .unwrap_err();
        assert!(matches!(err, HealthError::MealDateMismatch { .. }));
    }
}
