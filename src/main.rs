use std::env;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    varmap::config::init_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    match varmap::cli::run(&args, io::stdin().lock()) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
