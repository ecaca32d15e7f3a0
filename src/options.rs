use structopt::StructOpt;

/// Reads one infix expression per line from stdin, prints its postfix form and its value.
#[derive(StructOpt, Debug)]
pub struct Options {
    /// A line holding exactly this text ends the session.
    #[structopt(long, default_value = "q")]
    pub quit: String,

    /// Printed instead of the two result lines when a line fails.
    #[structopt(long, default_value = "ERROR")]
    pub error_marker: String,

    /// Output verbosity, logged to stderr.
    /// Default: errors.
    /// -v: warnings.
    /// -vv: info.
    /// -vvv: debug.
    /// -vvvv: trace.
    #[structopt(short, parse(from_occurrences))]
    pub verbosity: u8,
}
