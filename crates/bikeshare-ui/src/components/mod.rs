pub mod date_picker;
pub mod footer;
pub mod header;
pub mod metric;
