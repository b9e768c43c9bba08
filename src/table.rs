use {
    indexmap::IndexSet,
    serde_json::{Map, Value},
    tap::Pipe,
};

/// Ordered columns plus ordered rows. The column set is the union of all row
/// keys in first-seen order; a row missing a column renders as an empty cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Map<String, Value>>,
}

impl Table {
    pub fn from_records(records: impl IntoIterator<Item = Map<String, Value>>) -> Self {
        let rows = records.into_iter().collect::<Vec<_>>();
        rows.iter()
            .flat_map(|row| row.keys())
            .cloned()
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect::<Vec<_>>()
            .pipe(|columns| Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Map<String, Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|row| row.get(column))
    }
}
