use clap::Parser;
use levelstamp::cli::{Cli, Commands};
use levelstamp::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().quiet(cli.quiet);

    match cli.command {
        Commands::Build(args) => {
            levelstamp::cli::build::run(args, &printer)?;
        }
        Commands::Check(args) => levelstamp::cli::check::run(args, &printer)?,
        Commands::Sample(args) => levelstamp::cli::sample::run(args, &printer)?,
    }

    Ok(())
}
