pub mod convert;
pub mod csv_out;
pub mod flatten_json_value;
pub mod table;

pub use {
    convert::{ConvertOptions, convert, convert_serialized},
    csv_out::{CsvExport, export, to_csv_string},
    table::Table,
};
