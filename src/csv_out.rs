use {
    crate::table::Table,
    serde_json::Value,
    std::io::Write,
    tap::Pipe,
};

/// File name offered for download by the UI layer.
pub const DOWNLOAD_FILE_NAME: &str = "converted_data.csv";
pub const CSV_MIME_TYPE: &str = "text/csv";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not convert into inner error:\n{0}")]
    IntoInner(Box<str>),
    #[error("Could not write headers")]
    WritingHeaders(#[source] csv::Error),
    #[error("Writing record #{idx}")]
    WritingRecord {
        idx: usize,
        #[source]
        source: csv::Error,
    },
    #[error("CSV output is not valid utf-8")]
    NonUtf8Output(#[source] std::string::FromUtf8Error),
}

type Result<T> = std::result::Result<T, self::Error>;

/// Renders a single cell. Nested values can still reach this point through
/// the degraded (non-flatten) policies; they render as compact JSON text.
pub fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(value) => value.to_string(),
        Value::Number(value) => value.to_string(),
        Value::String(value) => value.clone(),
        nested => nested.to_string(),
    }
}

#[extension_traits::extension(pub trait CsvWriterWriteTableExt)]
impl<W: Write> csv::Writer<W> {
    /// Writes the header row followed by one record per table row, in table
    /// order. Cells missing from a row are written as empty fields.
    fn write_table(&mut self, table: &Table) -> Result<()> {
        self.write_record(table.columns())
            .map_err(self::Error::WritingHeaders)?;
        table.rows().iter().enumerate().try_for_each(|(idx, row)| {
            table
                .columns()
                .iter()
                .map(|column| row.get(column).map(render_cell).unwrap_or_default())
                .collect::<Vec<_>>()
                .pipe(|record| self.write_record(&record))
                .map_err(|source| self::Error::WritingRecord { idx, source })
        })
    }
}

pub fn to_csv_string(table: &Table) -> Result<String> {
    csv::WriterBuilder::new()
        .from_writer(Vec::new())
        .pipe(|mut writer| {
            writer.write_table(table).and_then(|()| {
                writer
                    .into_inner()
                    .map_err(|e| self::Error::IntoInner(format!("{e:#?}").pipe(Box::from)))
            })
        })
        .and_then(|buffer| String::from_utf8(buffer).map_err(self::Error::NonUtf8Output))
}

/// The download artifact handed to the UI layer. Only produced when the whole
/// table serialized successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub contents: String,
}

pub fn export(table: &Table) -> Result<CsvExport> {
    to_csv_string(table).map(|contents| CsvExport {
        file_name: DOWNLOAD_FILE_NAME,
        mime_type: CSV_MIME_TYPE,
        contents,
    })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::table::Table,
        serde_json::{Map, Value, json},
    };

    fn table_of(records: impl IntoIterator<Item = Value>) -> Table {
        records
            .into_iter()
            .map(|value| match value {
                Value::Object(map) => map,
                other => panic!("expected an object literal, got {other:#?}"),
            })
            .collect::<Vec<Map<String, Value>>>()
            .pipe(Table::from_records)
    }

    #[test]
    fn test_header_and_row_order() {
        let csv = to_csv_string(&table_of([
            json!({ "name": "John", "age": 30, "city": "New York" }),
        ]))
        .expect("serializes");

        assert_eq!(csv, "name,age,city\nJohn,30,New York\n");
    }

    #[test]
    fn test_missing_cells_render_empty() {
        let csv = to_csv_string(&table_of([
            json!({ "a": 1 }),
            json!({ "b": 2 }),
        ]))
        .expect("serializes");

        assert_eq!(csv, "a,b\n1,\n,2\n");
    }

    #[test]
    fn test_quoting_of_delimiters_quotes_and_newlines() {
        let csv = to_csv_string(&table_of([json!({
            "comma": "a,b",
            "quote": "say \"hi\"",
            "newline": "line1\nline2"
        })]))
        .expect("serializes");

        assert_eq!(
            csv,
            "comma,quote,newline\n\"a,b\",\"say \"\"hi\"\"\",\"line1\nline2\"\n"
        );
    }

    #[test]
    fn test_null_renders_empty_and_nested_renders_json() {
        let csv = to_csv_string(&table_of([json!({
            "none": null,
            "truthy": true,
            "raw": { "city": "NY" }
        })]))
        .expect("serializes");

        assert_eq!(csv, "none,truthy,raw\n,true,\"{\"\"city\"\":\"\"NY\"\"}\"\n");
    }

    #[test]
    fn test_export_metadata() {
        let export = export(&table_of([json!({ "a": 1 })])).expect("exports");

        assert_eq!(export.file_name, "converted_data.csv");
        assert_eq!(export.mime_type, "text/csv");
        assert_eq!(export.contents, "a\n1\n");
    }
}
