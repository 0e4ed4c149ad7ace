use std::process::ExitCode;

fn main() -> ExitCode {
    match stager_lib::main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
