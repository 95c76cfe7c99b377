//! Built-in tools registered by default.

pub mod file_writer;
pub mod web_search;

pub use file_writer::FileWriterTool;
pub use web_search::WebSearchTool;
