pub mod parallel;
pub mod reader;

pub use parallel::load_files_parallel;
pub use reader::{FileFailure, FileOutcome, load_file};
