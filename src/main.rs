use clap::Parser;
use portico::cli::commands::{Cli, Commands};
use portico::cli::handlers;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => {
            // Init is handled before site discovery
            if let Err(e) = handlers::cmd_init(args) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        _ => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
