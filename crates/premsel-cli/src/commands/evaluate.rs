use crate::support::{corpus_root, load_config_or_exit, print_json};
use premsel_corpus::CorpusCache;
use premsel_kernel::ProofOutcome;
use premsel_metrics::{MetricsSummary, ScoreCard, prove_rate};
use premsel_select::select_premises;
use premsel_store::{ResultRecord, read_records_from_path};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub struct Args {
    pub config_path: String,
    pub dataset: Option<String>,
    pub root: Option<String>,
    pub ks: Vec<usize>,
    pub json: bool,
}

pub fn run(args: Args) {
    let config = load_config_or_exit(&args.config_path);
    let root = corpus_root(&config, args.root);
    let dataset = args
        .dataset
        .map(PathBuf::from)
        .unwrap_or_else(|| config.batch.output.clone());
    let mut ks = if args.ks.is_empty() {
        vec![config.selection.k]
    } else {
        args.ks
    };
    ks.sort_unstable();
    ks.dedup();

    let records = read_records_from_path(&dataset).unwrap_or_else(|e| {
        eprintln!("error: failed to load {}: {e}", dataset.display());
        std::process::exit(1);
    });

    let cache = CorpusCache::new(&root);
    let mut cards = Vec::new();
    let mut skipped: BTreeMap<&'static str, usize> = BTreeMap::new();
    for record in records.iter().filter(|r| r.proved()) {
        match score_record(&cache, record, &ks) {
            Ok(card) => cards.push(card),
            Err(reason) => *skipped.entry(reason).or_default() += 1,
        }
    }
    let summary = MetricsSummary::from_cards(&cards);
    let rate = prove_rate(&records);

    if args.json {
        print_json(&json!({
            "dataset": dataset,
            "records": records.len(),
            "proveRate": rate,
            "ks": ks,
            "summary": summary,
            "skipped": skipped,
            "problems": cards,
        }));
        return;
    }

    println!("premsel evaluate {}", dataset.display());
    println!("  records: {}", records.len());
    println!("  prove rate: {:.3}", rate);
    println!("  scored problems: {}", summary.problems);
    for (reason, count) in &skipped {
        println!("  skipped ({reason}): {count}");
    }
    for k in &ks {
        println!(
            "  recall@{k}: {:.3}  success@{k}: {:.3}",
            summary.mean_recall.get(k).copied().unwrap_or_default(),
            summary.mean_success.get(k).copied().unwrap_or_default()
        );
    }
    println!("  mrr: {:.3}", summary.mean_mrr);
}

/// Rank one solved problem's premises and score them against the premises its
/// proof cited. Cited names that are not candidate premises of the problem
/// (the conjecture, derived clauses) are ignored.
fn score_record(
    cache: &CorpusCache,
    record: &ResultRecord,
    ks: &[usize],
) -> Result<ScoreCard, &'static str> {
    if record.positive_axioms.is_empty() {
        return Err("no positive axioms");
    }
    let Some(problem) = locate_problem(cache.root_dir(), record) else {
        tracing::warn!(filename = %record.filename, "problem file not found");
        return Err("problem not found");
    };
    let corpus = cache.get_or_parse(&problem).map_err(|e| {
        tracing::warn!(problem = %problem.display(), error = %e, "failed to parse problem");
        "unreadable problem"
    })?;
    let goal = corpus.goal().map_err(|e| {
        tracing::warn!(problem = %problem.display(), error = %e, "problem has no usable goal");
        "no goal"
    })?;

    let candidates = corpus.premise_texts();
    let positives: Vec<&str> = record
        .positive_axioms
        .iter()
        .map(String::as_str)
        .filter(|name| corpus.get(name).is_some_and(|f| f.role.is_premise()))
        .collect();
    if positives.is_empty() {
        return Err("no positive axioms among candidates");
    }

    let ranked = select_premises(&goal.text(), &candidates, candidates.len());
    Ok(ScoreCard::score(
        record.problem_name(),
        &ranked.names(),
        &positives,
        ks,
    ))
}

/// The recorded path when it still exists, else the TPTP layout
/// `<root>/Problems/<domain>/<filename>` with the domain taken from the
/// first three characters of the file name.
fn locate_problem(root: &Path, record: &ResultRecord) -> Option<PathBuf> {
    let recorded = PathBuf::from(&record.filepath);
    if !record.filepath.is_empty() && recorded.is_file() {
        return Some(recorded);
    }
    let domain: String = record.filename.chars().take(3).collect();
    let candidate = root.join("Problems").join(domain).join(&record.filename);
    candidate.is_file().then_some(candidate)
}
