//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::process::ExitCode;

use log::{error, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use squeezer::tools::cli::{sqzopts_init, Mode};
use squeezer::{check_file, decode_file, encode_file};

fn main() -> ExitCode {
    let args = sqzopts_init();

    if let Err(e) = TermLogger::init(
        args.level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Unable to start the logger: {}", e);
    }
    args.report();
    let opts = args.options();

    //----- Figure how what we need to do and go do it
    let result = match &args.mode {
        Mode::Encode { input, output } => encode_file(input, output, &opts, args.force).map(|report| {
            println!(
                "The compression score (final size VS initial size) is {:.02}",
                report.score()
            );
        }),
        Mode::Decode { input, output } => {
            decode_file(input, output, &opts, args.force).map(|report| {
                info!("Expanded {} bytes into {}.", report.read, report.written);
            })
        }
        Mode::Check { input } => check_file(input, &opts).map(|report| {
            println!(
                "{}: ok, {} digrams, {} bytes expand to {}",
                input.display(),
                report.dictionary,
                report.read,
                report.written
            );
        }),
    };

    match result {
        Ok(()) => {
            info!("Done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
