use std::process::ExitCode;

fn main() -> ExitCode {
    match user_extract::run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
