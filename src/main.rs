use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(spyder_index::run())
}
