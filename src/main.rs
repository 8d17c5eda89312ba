use clap::Parser;
use miette::Result;
use mortimer::cli::{Cli, Commands};
use mortimer::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => {
            let printer = if args.quiet { Printer::quiet() } else { Printer::new() };
            let input = mortimer::output::display_path(&args.input);
            if let Err(e) = mortimer::cli::convert::run(args, &printer) {
                printer.error("Failed", &format!("failure: {}", input));
                return Err(e.into());
            }
        }
        Commands::Inspect(args) => {
            mortimer::cli::inspect::run(args, &Printer::new())?;
        }
        Commands::Completions(args) => mortimer::cli::completions::run(args)?,
    }

    Ok(())
}
