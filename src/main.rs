// SPDX-License-Identifier: MPL-2.0
use gen_thumb::cli::{self, Command};
use gen_thumb::driver::Driver;
use gen_thumb::logging;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();

    let command = match cli::parse_from(std::env::args_os().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{}", cli::USAGE);
            return ExitCode::from(2);
        }
    };

    let args = match command {
        Command::Help => {
            println!("{}", cli::USAGE);
            return ExitCode::SUCCESS;
        }
        Command::Version => {
            println!("gen-thumb {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Command::Run(args) => args,
    };

    if args.paths.is_empty() {
        eprintln!("{}", cli::USAGE);
        return ExitCode::from(1);
    }

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };
    let settings = args.resolve(&config);
    tracing::debug!(?settings, "resolved settings");

    let driver = Driver::with_default_adapters(
        settings.thumb_size,
        settings.output_dir,
        settings.video_seek,
    );

    let mut out = io::stdout().lock();
    if let Err(e) = driver.run(&args.paths, &mut out) {
        tracing::error!(error = %e, "cannot write report");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
