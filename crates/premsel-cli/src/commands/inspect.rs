use crate::support::{load_config_or_exit, print_json};
use premsel_store::{DatasetSummary, read_records_from_path};
use std::path::PathBuf;

pub fn run(config_path: &str, dataset: Option<String>, samples: usize, json_output: bool) {
    let config = load_config_or_exit(config_path);
    let path = dataset
        .map(PathBuf::from)
        .unwrap_or_else(|| config.batch.output.clone());
    let records = read_records_from_path(&path).unwrap_or_else(|e| {
        eprintln!("error: failed to load {}: {e}", path.display());
        std::process::exit(1);
    });
    let summary = DatasetSummary::from_records(&records, samples);

    if json_output {
        print_json(&summary);
        return;
    }

    println!("premsel inspect {}", path.display());
    println!("  total problems: {}", summary.total);
    println!(
        "  solved: {} ({:.1}%)",
        summary.solved,
        summary.solved_percent()
    );
    println!(
        "  failed/unknown: {} ({:.1}%)",
        summary.failed,
        summary.failed_percent()
    );
    for (status, count) in &summary.statuses {
        println!("    {status}: {count}");
    }

    if summary.solved == 0 {
        println!();
        println!("  warning: no problems were solved; check the prover configuration");
        return;
    }

    if !summary.solved_without_axioms.is_empty() {
        println!();
        println!(
            "  alarm: {} solved without extracted axioms",
            summary.solved_without_axioms.len()
        );
        for filename in &summary.solved_without_axioms {
            println!("    - {filename}");
        }
    }

    if !summary.samples.is_empty() {
        println!();
        println!("  samples:");
        for (i, sample) in summary.samples.iter().enumerate() {
            println!("    #{} {}", i + 1, sample.filename);
            println!("      axioms used: {}", sample.axiom_count);
            println!("      labels: {}", sample.axioms.join(", "));
        }
    }
}
