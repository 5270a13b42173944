//! CLI front end: runs each file argument as an independent LJ program.
//! `-p`/`-s` raise the log level so the parser/scanner's `log::trace!`
//! calls become visible; `-d` dumps the parsed AST instead of running it.

use std::path::PathBuf;

use clap::Parser as ClapParser;
use log::error;

use lj::driver::Driver;

#[derive(ClapParser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Source files to run, in order.
    files: Vec<PathBuf>,

    /// Trace the parser's grammar rules.
    #[arg(short = 'p', long = "trace-parser")]
    trace_parser: bool,

    /// Trace the scanner's token production.
    #[arg(short = 's', long = "trace-scanner")]
    trace_scanner: bool,

    /// Dump the parsed AST instead of running it.
    #[arg(short, long)]
    dump: bool,
}

fn main() {
    let args = Cli::parse();

    let level = if args.trace_parser || args.trace_scanner {
        log::Level::Trace
    } else {
        log::Level::Warn
    };
    simple_logger::init_with_level(level).unwrap();

    for file in &args.files {
        let mut driver = Driver::new();

        if let Err(err) = driver.parse(file) {
            error!("{err}");
            std::process::exit(1);
        }

        if args.dump {
            driver.dump();
            continue;
        }

        if let Err(err) = driver.run() {
            error!("{err}");
            std::process::exit(1);
        }
    }
}
