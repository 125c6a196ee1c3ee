//! Premsel CLI: the `premsel` command.

mod cli;
mod commands;
mod config;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config;

    match cli.command {
        Commands::Parse {
            problem,
            root,
            list,
            json,
        } => commands::parse::run(&config_path, problem, root, list, json),

        Commands::Select {
            problem,
            root,
            k,
            emit_problem,
            prove,
            json,
        } => commands::select::run(commands::select::Args {
            config_path,
            problem,
            root,
            k,
            emit_problem,
            prove,
            json,
        }),

        Commands::Extract { input, json } => commands::extract::run(input, json),

        Commands::Prove {
            problem,
            root,
            binary,
            cpu_limit,
            json,
        } => commands::prove::run(commands::prove::Args {
            config_path,
            problem,
            root,
            binary,
            cpu_limit,
            json,
        }),

        Commands::Generate {
            problems,
            extension,
            output,
            append,
            workers,
            binary,
            cpu_limit,
            json,
        } => commands::generate::run(commands::generate::Args {
            config_path,
            problems,
            extension,
            output,
            append,
            workers,
            binary,
            cpu_limit,
            json,
        }),

        Commands::Inspect {
            dataset,
            samples,
            json,
        } => commands::inspect::run(&config_path, dataset, samples, json),

        Commands::Evaluate {
            dataset,
            root,
            ks,
            json,
        } => commands::evaluate::run(commands::evaluate::Args {
            config_path,
            dataset,
            root,
            ks,
            json,
        }),

        Commands::Init { path, force, json } => commands::init::run(path, force, json),
    }
}
