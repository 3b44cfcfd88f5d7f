use std::process::ExitCode;

fn main() -> ExitCode {
    match gop_warm_core::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
