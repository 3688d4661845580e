use calorie_query::FilterError;
use colored::Colorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    match calorie_query::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            if err.downcast_ref::<FilterError>().is_some() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
