use clap::Parser;
use fob_models_cli::{cli::Cli, error, logger, run};
use miette::Result;

fn main() -> Result<()> {
    let args = Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    run::execute(&args).map_err(error::cli_error_to_miette)
}
