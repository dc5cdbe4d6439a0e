use crate::error::{HealthError, Result};

/// One data row: header name to value, in file column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// 1-based line in the source, header included.
    pub line: u64,
    pub fields: Vec<(String, String)>,
}

impl Row {
    pub fn get(&self, source_name: &str, field: &str) -> Result<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
            .ok_or_else(|| HealthError::MissingColumn {
                source_name: source_name.to_string(),
                line: self.line,
                field: field.to_string(),
            })
    }
}

pub trait RowSource {
    /// Name used in diagnostics, usually the file path.
    fn label(&self) -> &str;
    fn read_rows(&self) -> Result<Vec<Row>>;
}
