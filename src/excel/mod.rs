pub mod export;
pub mod import;

pub use export::{write_results, write_template};
pub use import::parse_workbook;
