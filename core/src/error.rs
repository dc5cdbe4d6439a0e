use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HealthError {
    // Malformed input
    #[error("{source_name} line {line}: field '{field}' is not a number: '{value}'")]
    InvalidNumber {
        source_name: String,
        line: u64,
        field: String,
        value: String,
    },

    #[error("{source_name} line {line}: invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate {
        source_name: String,
        line: u64,
        value: String,
    },

    #[error("{source_name} line {line}: unknown meal '{value}'")]
    UnknownMeal {
        source_name: String,
        line: u64,
        value: String,
    },

    #[error("{source_name} line {line}: missing column '{field}'")]
    MissingColumn {
        source_name: String,
        line: u64,
        field: String,
    },

    // Semantic violations
    #[error("{date}: saturated fat {saturated_fat} exceeds fat {fat}")]
    SaturatedFatExceedsFat {
        date: NaiveDate,
        saturated_fat: f64,
        fat: f64,
    },

    #[error("{date}: {field} must be >= 0, got {value}")]
    NegativeValue {
        date: NaiveDate,
        field: String,
        value: f64,
    },

    #[error("{source_name}: duplicate date {date}")]
    DuplicateDate { source_name: String, date: NaiveDate },

    #[error("{date}: duplicate {meal} entry")]
    DuplicateMeal { date: NaiveDate, meal: String },

    #[error("day {day}: {meal} record is dated {meal_date}")]
    MealDateMismatch {
        day: NaiveDate,
        meal: String,
        meal_date: NaiveDate,
    },

    #[error("{at}: {field} total overflows")]
    Overflow { at: String, field: String },

    // Aggregation singularities
    #[error("group {group}: no days with {metric} data, average is undefined")]
    NoData { group: String, metric: String },

    #[error("group {group}: average weight is 0, per-kg ratios are undefined")]
    ZeroWeight { group: String },

    // Membership violations
    #[error("{date} belongs to group {actual}, not {expected}")]
    MembershipMismatch {
        date: NaiveDate,
        expected: String,
        actual: String,
    },

    #[error("group {group} has no days")]
    EmptyGroup { group: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HealthError>;
