use crate::support::{corpus_root, load_config_or_exit, parse_corpus_or_exit, print_json};
use serde_json::json;
use std::path::Path;

pub fn run(config_path: &str, problem: String, root: Option<String>, list: bool, json_output: bool) {
    let config = load_config_or_exit(config_path);
    let root = corpus_root(&config, root);
    let corpus = parse_corpus_or_exit(Path::new(&problem), &root);
    let goal = corpus.goal();

    if json_output {
        let formulas: Vec<_> = if list {
            corpus
                .iter()
                .map(|f| {
                    json!({
                        "name": f.name,
                        "role": f.role,
                        "dialect": f.dialect.keyword(),
                        "file": f.source_file,
                        "line": f.line,
                    })
                })
                .collect()
        } else {
            Vec::new()
        };
        let (goal_names, goal_error) = match &goal {
            Ok(goal) => (goal.names(), None),
            Err(e) => (Vec::new(), Some(e.to_string())),
        };
        let mut payload = json!({
            "problem": problem,
            "root": root,
            "formulaCount": corpus.len(),
            "roles": corpus.role_counts(),
            "goal": goal_names,
            "files": corpus.files(),
            "diagnostics": corpus.diagnostics(),
        });
        if let Some(error) = goal_error {
            payload["goalError"] = json!(error);
        }
        if list {
            payload["formulas"] = json!(formulas);
        }
        print_json(&payload);
        return;
    }

    println!("premsel parse {problem}");
    println!("  root: {}", root.display());
    println!("  files: {}", corpus.files().len());
    println!("  formulas: {}", corpus.len());
    for (role, count) in corpus.role_counts() {
        println!("    {role}: {count}");
    }
    match &goal {
        Ok(goal) => println!("  goal: {}", goal.names().join(", ")),
        Err(e) => println!("  goal: none ({e})"),
    }
    if !corpus.diagnostics().is_empty() {
        println!("  diagnostics: {}", corpus.diagnostics().len());
        for diagnostic in corpus.diagnostics() {
            println!("    - {diagnostic}");
        }
    }
    if list {
        println!();
        for formula in corpus.iter() {
            println!(
                "  {} {} {} ({}:{})",
                formula.dialect,
                formula.role,
                formula.name,
                formula.source_file.display(),
                formula.line
            );
        }
    }
}
