mod cmd;

use clap::Parser;
use cmd::config::{Cli, Commands, GenEffective, RunEffective};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => RunEffective::new(&args).and_then(|eff| cmd::bench::run(&eff)),
        Commands::Generate(args) => GenEffective::new(&args).and_then(|eff| cmd::generate::run(&eff)),
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
