use crate::config::PremselConfig;
use premsel_corpus::Corpus;
use std::path::{Path, PathBuf};

pub fn load_config_or_exit(path: &str) -> PremselConfig {
    PremselConfig::load(path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

/// `--root` beats the config file.
pub fn corpus_root(config: &PremselConfig, root_arg: Option<String>) -> PathBuf {
    root_arg
        .map(PathBuf::from)
        .unwrap_or_else(|| config.corpus.root.clone())
}

pub fn parse_corpus_or_exit(problem: &Path, root: &Path) -> Corpus {
    premsel_corpus::parse(problem, root).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn read_text_or_exit(path: &str) -> String {
    if path == "-" {
        let mut text = String::new();
        if let Err(e) = std::io::Read::read_to_string(&mut std::io::stdin(), &mut text) {
            eprintln!("error: failed to read stdin: {e}");
            std::process::exit(1);
        }
        return text;
    }
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: failed to read {path}: {e}");
        std::process::exit(1);
    })
}

pub fn build_runtime_or_exit() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(1);
        })
}

pub fn print_json(value: &impl serde::Serialize) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).expect("json serialization")
    );
}

pub fn yes_no(ok: bool) -> &'static str {
    if ok { "yes" } else { "no" }
}
