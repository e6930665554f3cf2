pub mod base;
pub mod file;

pub use base::BaseReader;
pub use file::HtmlReader;
