mod cli;
mod commands;
mod error;

use structopt::StructOpt;
use tracing::Level;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::from_iter(wild::args_os());

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::List(args) => commands::list(args),
        Commands::Validate(args) => commands::validate(args),
        Commands::Create(args) => commands::create(args),
        Commands::Extract(args) => commands::extract(args),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = std::error::Error::source(cause);
        }
        std::process::exit(1);
    }
}
