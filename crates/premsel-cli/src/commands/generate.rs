use crate::commands::prove::{client_or_exit, prover_config_or_exit};
use crate::support::{build_runtime_or_exit, load_config_or_exit, print_json};
use premsel_kernel::ProofOutcome;
use premsel_proof::{BatchEvent, discover_problems, prove_batch};
use premsel_store::{DatasetSummary, JsonlAppender, ResultRecord, write_records_to_path};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct Args {
    pub config_path: String,
    pub problems: Option<String>,
    pub extension: String,
    pub output: Option<String>,
    pub append: bool,
    pub workers: Option<usize>,
    pub binary: Option<String>,
    pub cpu_limit: Option<u64>,
    pub json: bool,
}

pub fn run(args: Args) {
    let config = load_config_or_exit(&args.config_path);
    let problems_dir = args
        .problems
        .map(PathBuf::from)
        .unwrap_or_else(|| config.corpus.root.join("Problems"));
    let output = args
        .output
        .map(PathBuf::from)
        .unwrap_or_else(|| config.batch.output.clone());
    let workers = args.workers.unwrap_or(config.batch.workers);
    if workers == 0 {
        eprintln!("error: --workers must be at least 1");
        std::process::exit(1);
    }
    let client = client_or_exit(prover_config_or_exit(
        &config,
        None,
        args.binary,
        args.cpu_limit,
    ));

    let problems = discover_problems(&problems_dir, &args.extension).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    if problems.is_empty() {
        eprintln!(
            "error: no .{} files found under {}",
            args.extension,
            problems_dir.display()
        );
        std::process::exit(1);
    }

    let mut sink = if args.append {
        JsonlAppender::append_to(&output)
    } else {
        JsonlAppender::create(&output)
    }
    .unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    tracing::info!(
        problems = problems.len(),
        workers,
        dir = %problems_dir.display(),
        output = %output.display(),
        "starting batch"
    );

    let runtime = build_runtime_or_exit();
    let mut records = runtime.block_on(async {
        let (tx, mut rx) = mpsc::channel(workers * 2);
        let batch = tokio::spawn(prove_batch(Arc::new(client), problems, workers, tx));

        let mut records = Vec::new();
        while let Some(event) = rx.recv().await {
            let BatchEvent::Finished {
                index,
                total,
                problem,
                run,
            } = event
            else {
                continue;
            };
            let record = ResultRecord::from_verdict(&problem, &run.verdict, Some(run.elapsed));
            if let Err(e) = sink.append(&record) {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
            if record.proved() {
                tracing::info!("[{}/{total}] {} solved", index + 1, record.filename);
            } else {
                tracing::info!("[{}/{total}] {} {}", index + 1, record.filename, record.status);
            }
            records.push((index, record));
        }

        if let Err(e) = batch.await {
            tracing::error!(error = %e, "batch driver failed");
        }
        records
    });

    let written = sink.written();
    drop(sink);
    records.sort_by_key(|(index, _)| *index);
    let records: Vec<ResultRecord> = records.into_iter().map(|(_, record)| record).collect();
    // Streamed lines are in completion order; a fresh dataset ends up in
    // discovery order.
    if !args.append {
        if let Err(e) = write_records_to_path(&output, &records) {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }

    let summary = DatasetSummary::from_records(&records, 0);

    if args.json {
        print_json(&json!({
            "output": output,
            "written": written,
            "total": summary.total,
            "solved": summary.solved,
            "failed": summary.failed,
            "statuses": summary.statuses,
        }));
        return;
    }

    println!("premsel generate");
    println!("  output: {}", output.display());
    println!("  written: {written}");
    println!(
        "  solved: {} / {} ({:.1}%)",
        summary.solved,
        summary.total,
        summary.solved_percent()
    );
    for (status, count) in &summary.statuses {
        println!("    {status}: {count}");
    }
}
