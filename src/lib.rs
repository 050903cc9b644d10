extern crate parser;
extern crate logger;

use parser::{Cli, Commands::{Convert, FromYaml}};
use anyhow::Result;

#[macro_use]
extern crate log;

/// Unpack the command line arguments, and run the requested subcommand.
///
/// # Errors
/// - if a `from-yaml` configuration file cannot be deserialized.
/// - if the conversion itself fails (see [`matrix::run`]).
pub fn run(cli: Cli) -> Result<()> {
    match cli.commands {
        Convert {convert} => {
            let summary = matrix::run(&convert)?;
            info!("Processed {} genotype rows: {} matched, {} discarded.", summary.rows, summary.matched, summary.discarded);
        },

        FromYaml {yaml} => {
            let cli = Cli::deserialize(&yaml)?;
            logger::Logger::set_level(if cli.quiet {0} else {cli.verbose + 1});
            self::run(cli)?;
        },
    };
    Ok(())
}
