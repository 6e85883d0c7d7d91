use std::process::ExitCode;

fn main() -> ExitCode {
    polybar_play::cli::init_logging();
    // Delegate to the CLI runner in the library crate.
    match polybar_play::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", polybar_play::cli::error_line(&err));
            ExitCode::from(polybar_play::cli::exit_code(&err))
        }
    }
}
