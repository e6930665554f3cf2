pub mod args;
pub mod exit;

pub use args::Cli;
pub use exit::Outcome;
