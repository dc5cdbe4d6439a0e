pub mod health_day;
pub mod nutrition;
pub mod summary;
