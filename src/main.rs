use std::io::{self, Write};

use anyhow::Result;
use structopt::StructOpt;

mod options;

fn main() -> Result<()> {
    let options = options::Options::from_args();
    let filter_level = match options.verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::builder()
        .format(|buf, record| writeln!(buf, "infix-calc : {} : {}", record.level(), record.args()))
        .filter_level(filter_level)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    infix_calc::serve(stdin.lock(), stdout.lock(), &options.quit, &options.error_marker)
}
