use clap::Parser;
use tracing_subscriber::EnvFilter;

use v8forge_build::HostEnvironment;
use v8forge_cli::Cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let root = match cli.root.clone() {
        Some(root) => root,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(error) => {
                eprintln!("cannot determine the current directory: {}", error);
                std::process::exit(1);
            }
        },
    };
    if let Err(error) = v8forge_cli::run(cli, root, HostEnvironment::from_process()) {
        eprintln!("{}", error);
        std::process::exit(error.exit_code());
    }
}
