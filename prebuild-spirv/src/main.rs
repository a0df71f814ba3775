use std::path::Path;
use std::process::ExitCode;

use prebuild_spirv::driver::{self, Layout};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let layout = Layout::under(Path::new("."));
    match driver::run(&layout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::from(driver::exit_code(&err))
        }
    }
}
