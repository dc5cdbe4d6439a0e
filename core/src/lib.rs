pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use config::AppConfig;
pub use error::{HealthError, Result};
pub use model::health_day::DailyHealthRecord;
pub use model::nutrition::{DailyNutrition, Macros, Meal, NutritionRecord};
pub use model::summary::{GroupStats, MonthlySummary, WeeklySummary};
pub use repository::{CsvFileSource, CsvTextSource, Row, RowSource};
pub use time::{parse_date, MonthKey, WeekKey};
pub use usecase::report::HealthReportUseCase;
