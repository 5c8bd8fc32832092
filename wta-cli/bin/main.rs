use clap::Parser;

use wta_cli::{cli, logger, Args};

pub fn main() -> Result<(), String> {
    let args = Args::parse();
    logger::configure(args.verbose, args.log_file.clone())?;
    cli::run(args)
}
