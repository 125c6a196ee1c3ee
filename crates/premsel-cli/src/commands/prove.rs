use crate::config::PremselConfig;
use crate::support::{build_runtime_or_exit, load_config_or_exit, print_json, yes_no};
use premsel_kernel::ProofOutcome;
use premsel_proof::{ProverClient, ProverConfig};
use premsel_store::ResultRecord;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct Args {
    pub config_path: String,
    pub problem: String,
    pub root: Option<String>,
    pub binary: Option<String>,
    pub cpu_limit: Option<u64>,
    pub json: bool,
}

/// Config-file prover settings with command-line overrides applied.
pub fn prover_config_or_exit(
    config: &PremselConfig,
    root: Option<String>,
    binary: Option<String>,
    cpu_limit: Option<u64>,
) -> ProverConfig {
    let mut prover = config.prover_config().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    if let Some(root) = root {
        prover.corpus_root = Some(PathBuf::from(root));
    }
    if let Some(binary) = binary {
        prover.binary = PathBuf::from(binary);
    }
    if let Some(secs) = cpu_limit {
        prover.cpu_limit = Duration::from_secs(secs);
    }
    prover
}

pub fn client_or_exit(prover: ProverConfig) -> ProverClient {
    ProverClient::new(prover).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn run(args: Args) {
    let config = load_config_or_exit(&args.config_path);
    let client = client_or_exit(prover_config_or_exit(
        &config,
        args.root,
        args.binary,
        args.cpu_limit,
    ));
    let problem = Path::new(&args.problem);

    let runtime = build_runtime_or_exit();
    let run = runtime.block_on(client.prove_file(problem));
    let record = ResultRecord::from_verdict(problem, &run.verdict, Some(run.elapsed));

    if args.json {
        print_json(&record);
        return;
    }

    println!("premsel prove {}", args.problem);
    println!("  status: {}", record.status);
    println!("  proved: {}", yes_no(record.proved()));
    println!("  runtime: {} ms", record.runtime_ms.unwrap_or_default());
    if let Some(code) = run.exit_code {
        println!("  exit code: {code}");
    }
    if let Some(error) = &record.error_msg {
        println!("  error: {error}");
    }
    println!("  positive axioms: {}", record.positive_axioms.len());
    for name in &record.positive_axioms {
        println!("    - {name}");
    }
}
