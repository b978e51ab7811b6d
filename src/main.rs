use clap::Parser;
use miette::Result;
use mdrf::cli::{Cli, Commands};
use mdrf::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();
    // Completions must work even with a broken config file.
    let options = cli.options();

    match cli.command {
        Commands::Parse(args) => mdrf::cli::parse::run(args, options?, &printer)?,
        Commands::Generate(args) => mdrf::cli::generate::run(args, options?, &printer)?,
        Commands::Check(args) => mdrf::cli::check::run(args, options?, &printer)?,
        Commands::Completions(args) => mdrf::cli::completions::run(args)?,
    }

    Ok(())
}
