pub mod import_service;
pub mod merge_service;
