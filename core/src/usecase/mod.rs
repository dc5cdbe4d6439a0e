pub mod grouping;
pub mod report;
