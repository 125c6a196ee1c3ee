use crate::commands::prove::{client_or_exit, prover_config_or_exit};
use crate::support::{
    build_runtime_or_exit, corpus_root, load_config_or_exit, parse_corpus_or_exit, print_json,
    yes_no,
};
use premsel_corpus::build_problem;
use premsel_kernel::ProofOutcome;
use premsel_select::select_premises;
use premsel_store::ResultRecord;
use serde_json::json;
use std::path::{Path, PathBuf};

pub struct Args {
    pub config_path: String,
    pub problem: String,
    pub root: Option<String>,
    pub k: Option<usize>,
    pub emit_problem: Option<String>,
    pub prove: bool,
    pub json: bool,
}

pub fn run(args: Args) {
    let config = load_config_or_exit(&args.config_path);
    let root = corpus_root(&config, args.root);
    let k = args.k.unwrap_or(config.selection.k);
    let corpus = parse_corpus_or_exit(Path::new(&args.problem), &root);
    let goal = corpus.goal().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    let candidates = corpus.premise_texts();
    let selection = select_premises(&goal.text(), &candidates, k);
    if selection.is_empty() {
        tracing::warn!(problem = %args.problem, candidates = candidates.len(), "empty selection");
    }

    let stem = Path::new(&args.problem)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "problem".to_string());
    let reduced_name = format!("{stem}_top{k}");
    let reduced = (args.emit_problem.is_some() || args.prove).then(|| {
        let premises: Vec<_> = selection
            .iter()
            .filter_map(|entry| corpus.get(&entry.name))
            .collect();
        build_problem(&reduced_name, &goal, &premises)
    });

    if let (Some(out), Some(text)) = (&args.emit_problem, &reduced) {
        if let Err(e) = std::fs::write(out, text) {
            eprintln!("error: failed to write {out}: {e}");
            std::process::exit(1);
        }
    }

    let record = match (&reduced, args.prove) {
        (Some(text), true) => {
            let client = client_or_exit(prover_config_or_exit(
                &config,
                Some(root.display().to_string()),
                None,
                None,
            ));
            let runtime = build_runtime_or_exit();
            let run = runtime.block_on(client.prove_text(text, &reduced_name));
            let problem = PathBuf::from(format!("{reduced_name}.p"));
            Some(ResultRecord::from_verdict(&problem, &run.verdict, Some(run.elapsed)))
        }
        _ => None,
    };

    if args.json {
        let mut payload = json!({
            "problem": args.problem,
            "goal": goal.names(),
            "k": k,
            "candidates": candidates.len(),
            "selected": selection,
        });
        if let Some(out) = &args.emit_problem {
            payload["emittedProblem"] = json!(out);
        }
        if let Some(record) = &record {
            payload["reducedResult"] = json!(record);
        }
        print_json(&payload);
        return;
    }

    println!("premsel select {}", args.problem);
    println!("  goal: {}", goal.names().join(", "));
    println!("  candidates: {}", candidates.len());
    println!("  selected: {} (k={k})", selection.len());
    for (rank, entry) in selection.iter().enumerate() {
        println!("    {:>3}. {:<32} {:.4}", rank + 1, entry.name, entry.score);
    }
    if let Some(out) = &args.emit_problem {
        println!("  reduced problem: {out}");
    }
    if let Some(record) = &record {
        println!(
            "  reduced proof: {} (proved: {}, {} ms)",
            record.status,
            yes_no(record.proved()),
            record.runtime_ms.unwrap_or_default()
        );
        if let Some(error) = &record.error_msg {
            println!("    error: {error}");
        }
    }
}
