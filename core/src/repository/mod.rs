pub mod file;
pub mod traits;

pub use file::{CsvFileSource, CsvTextSource};
pub use traits::{Row, RowSource};
