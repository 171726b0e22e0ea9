pub mod csv_parser;
pub mod xlsx_parser;

pub use csv_parser::CsvParser;
pub use xlsx_parser::XlsxParser;
