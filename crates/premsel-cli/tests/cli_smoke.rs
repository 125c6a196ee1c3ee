use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "premsel-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_premsel<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_premsel");
    Command::new(bin)
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("premsel command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout should be json: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

/// A miniature TPTP tree: one problem including one axiom file.
fn write_corpus(root: &Path) -> PathBuf {
    fs::create_dir_all(root.join("Axioms")).expect("axioms dir");
    fs::create_dir_all(root.join("Problems/PUZ")).expect("problems dir");
    fs::write(
        root.join("Axioms/PUZ001+0.ax"),
        "% shared axioms\n\
         fof(ax1, axiom, lives(agatha)).\n\
         fof(ax2, axiom, ( killed(agatha, agatha) => hates(agatha, agatha) )).\n",
    )
    .expect("axiom file");
    let problem = root.join("Problems/PUZ/PUZ001+1.p");
    fs::write(
        &problem,
        "include('Axioms/PUZ001+0.ax').\n\
         fof(ax3, axiom, richer(butler, agatha)).\n\
         fof(goal, conjecture, hates(agatha, agatha)).\n",
    )
    .expect("problem file");
    problem
}

/// Config whose prover is a shell script that always reports a refutation
/// citing `ax2`.
fn write_fake_prover_config(dir: &Path, root: &Path) -> PathBuf {
    let script = dir.join("fake-prover.sh");
    fs::write(
        &script,
        "echo '# SZS status Theorem'\n\
         echo '# SZS output start CNFRefutation'\n\
         echo \"fof(c_0_1, axiom, p, file('PUZ001+1.p', ax2)).\"\n\
         echo '# SZS output end CNFRefutation'\n",
    )
    .expect("fake prover");
    let config = dir.join("premsel.toml");
    fs::write(
        &config,
        format!(
            "[corpus]\nroot = \"{}\"\n\n\
             [prover]\nbinary = \"sh\"\nargs = [\"{}\"]\ncpu_limit_secs = 5\ngrace_secs = 5.0\ncpu_limit_flag = \"\"\n\n\
             [batch]\nworkers = 2\noutput = \"{}\"\n\n\
             [selection]\nk = 2\n",
            root.display(),
            script.display(),
            dir.join("dataset.jsonl").display()
        ),
    )
    .expect("config file");
    config
}

#[test]
fn parse_json_reports_roles_and_goal() {
    let tmp = TempDirGuard::new("parse");
    let problem = write_corpus(tmp.path());

    let output = run_premsel([
        OsStr::new("parse"),
        problem.as_os_str(),
        OsStr::new("--root"),
        tmp.path().as_os_str(),
        OsStr::new("--json"),
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["formulaCount"], 4);
    assert_eq!(payload["roles"]["axiom"], 3);
    assert_eq!(payload["roles"]["conjecture"], 1);
    assert_eq!(payload["goal"], serde_json::json!(["goal"]));
    assert_eq!(payload["diagnostics"], serde_json::json!([]));
}

#[test]
fn parse_missing_problem_fails() {
    let tmp = TempDirGuard::new("parse-missing");
    let output = run_premsel([
        OsStr::new("parse"),
        tmp.path().join("nope.p").as_os_str(),
        OsStr::new("--root"),
        tmp.path().as_os_str(),
    ]);
    assert_failure(&output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("error: failed to read"));
}

#[test]
fn select_emits_reduced_problem() {
    let tmp = TempDirGuard::new("select");
    let problem = write_corpus(tmp.path());
    let reduced = tmp.path().join("reduced.p");

    let output = run_premsel([
        OsStr::new("select"),
        problem.as_os_str(),
        OsStr::new("--root"),
        tmp.path().as_os_str(),
        OsStr::new("--k"),
        OsStr::new("1"),
        OsStr::new("--emit-problem"),
        reduced.as_os_str(),
        OsStr::new("--json"),
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["candidates"], 3);
    assert_eq!(payload["selected"][0]["name"], "ax2");

    let text = fs::read_to_string(&reduced).expect("reduced problem should exist");
    assert!(text.contains("fof(ax2, axiom,"));
    assert!(text.contains("fof(goal, conjecture,"));
    assert!(!text.contains("ax1"));
}

#[test]
fn extract_reads_saved_output() {
    let tmp = TempDirGuard::new("extract");
    let log = tmp.path().join("eprover.out");
    fs::write(
        &log,
        "# SZS status Theorem\n# SZS output start CNFRefutation\n\
         cnf(c1, axiom, q, file('p.p', ax2)).\ncnf(c2, axiom, p, file('p.p', ax1)).\n\
         # SZS output end CNFRefutation\n",
    )
    .expect("log file");

    let output = run_premsel([OsStr::new("extract"), log.as_os_str(), OsStr::new("--json")]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["status"], "Theorem");
    assert_eq!(payload["proved"], true);
    assert_eq!(payload["positive_axioms"], serde_json::json!(["ax1", "ax2"]));
}

#[test]
fn init_writes_config() {
    let tmp = TempDirGuard::new("init");
    let output = run_premsel([OsStr::new("init"), tmp.path().as_os_str(), OsStr::new("--json")]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["wroteConfig"], true);
    let written = fs::read_to_string(tmp.path().join("premsel.toml")).expect("config exists");
    assert!(written.contains("[prover]"));
    assert!(written.contains("eprover"));
}

#[test]
fn invalid_config_is_rejected() {
    let tmp = TempDirGuard::new("bad-config");
    let config = tmp.path().join("premsel.toml");
    fs::write(&config, "[prover]\ngrace_secs = 0.0\n").expect("config file");
    let log = tmp.path().join("empty.out");
    fs::write(&log, "").expect("log file");

    let output = run_premsel([
        OsStr::new("--config"),
        config.as_os_str(),
        OsStr::new("extract"),
        log.as_os_str(),
    ]);
    assert_success(&output);

    let output = run_premsel([
        OsStr::new("--config"),
        config.as_os_str(),
        OsStr::new("inspect"),
        log.as_os_str(),
    ]);
    assert_failure(&output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("grace_secs must be positive"));
}

#[cfg(unix)]
#[test]
fn generate_inspect_evaluate_pipeline() {
    let tmp = TempDirGuard::new("pipeline");
    let root = tmp.path().join("TPTP");
    write_corpus(&root);
    let config = write_fake_prover_config(tmp.path(), &root);

    let output = run_premsel([
        OsStr::new("--config"),
        config.as_os_str(),
        OsStr::new("generate"),
        OsStr::new("--json"),
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["written"], 1);
    assert_eq!(payload["solved"], 1);

    let dataset = tmp.path().join("dataset.jsonl");
    let line = fs::read_to_string(&dataset).expect("dataset exists");
    let record: Value = serde_json::from_str(line.trim()).expect("record is json");
    assert_eq!(record["filename"], "PUZ001+1.p");
    assert_eq!(record["positive_axioms"], serde_json::json!(["ax2"]));

    let output = run_premsel([
        OsStr::new("--config"),
        config.as_os_str(),
        OsStr::new("inspect"),
        OsStr::new("--json"),
    ]);
    assert_success(&output);
    let summary = parse_json_stdout(&output);
    assert_eq!(summary["total"], 1);
    assert_eq!(summary["solved"], 1);
    assert_eq!(summary["samples"][0]["axiom_count"], 1);

    let output = run_premsel([
        OsStr::new("--config"),
        config.as_os_str(),
        OsStr::new("evaluate"),
        OsStr::new("--k"),
        OsStr::new("1"),
        OsStr::new("--json"),
    ]);
    assert_success(&output);
    let report = parse_json_stdout(&output);
    assert_eq!(report["proveRate"], 1.0);
    assert_eq!(report["summary"]["problems"], 1);
    assert_eq!(report["summary"]["mean_mrr"], 1.0);
    assert_eq!(report["summary"]["mean_recall"]["1"], 1.0);
}

#[cfg(unix)]
#[test]
fn generate_writes_dataset_in_discovery_order() {
    let tmp = TempDirGuard::new("generate-order");
    let root = tmp.path().join("TPTP");
    write_corpus(&root);
    for name in ["PUZ003+1.p", "PUZ002+1.p"] {
        fs::write(
            root.join("Problems/PUZ").join(name),
            "include('Axioms/PUZ001+0.ax').\nfof(goal, conjecture, lives(agatha)).\n",
        )
        .expect("problem file");
    }
    let config = write_fake_prover_config(tmp.path(), &root);

    let output = run_premsel([
        OsStr::new("--config"),
        config.as_os_str(),
        OsStr::new("generate"),
        OsStr::new("--json"),
    ]);
    assert_success(&output);
    assert_eq!(parse_json_stdout(&output)["written"], 3);

    let dataset = fs::read_to_string(tmp.path().join("dataset.jsonl")).expect("dataset exists");
    let filenames: Vec<String> = dataset
        .lines()
        .map(|line| {
            let record: Value = serde_json::from_str(line).expect("record is json");
            record["filename"].as_str().expect("filename").to_string()
        })
        .collect();
    assert_eq!(filenames, vec!["PUZ001+1.p", "PUZ002+1.p", "PUZ003+1.p"]);

    let leftovers = fs::read_dir(tmp.path())
        .expect("temp dir lists")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp."))
        .count();
    assert_eq!(leftovers, 0);
}

#[cfg(unix)]
#[test]
fn select_can_prove_the_reduced_problem() {
    let tmp = TempDirGuard::new("select-prove");
    let root = tmp.path().join("TPTP");
    let problem = write_corpus(&root);
    let config = write_fake_prover_config(tmp.path(), &root);

    let output = run_premsel([
        OsStr::new("--config"),
        config.as_os_str(),
        OsStr::new("select"),
        problem.as_os_str(),
        OsStr::new("--k"),
        OsStr::new("1"),
        OsStr::new("--prove"),
        OsStr::new("--json"),
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["selected"][0]["name"], "ax2");
    let result = &payload["reducedResult"];
    assert_eq!(result["filename"], "PUZ001+1_top1.p");
    assert_eq!(result["status"], "Theorem");
    assert_eq!(result["proof_found"], true);
    assert_eq!(result["positive_axioms"], serde_json::json!(["ax2"]));
}

#[cfg(unix)]
#[test]
fn prove_reports_record() {
    let tmp = TempDirGuard::new("prove");
    let root = tmp.path().join("TPTP");
    let problem = write_corpus(&root);
    let config = write_fake_prover_config(tmp.path(), &root);

    let output = run_premsel([
        OsStr::new("--config"),
        config.as_os_str(),
        OsStr::new("prove"),
        problem.as_os_str(),
        OsStr::new("--json"),
    ]);
    assert_success(&output);
    let record = parse_json_stdout(&output);
    assert_eq!(record["status"], "Theorem");
    assert_eq!(record["proof_found"], true);
    assert_eq!(record["positive_axioms"], serde_json::json!(["ax2"]));
}
