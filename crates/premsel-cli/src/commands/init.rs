use crate::config::{DEFAULT_CONFIG_PATH, PremselConfig};
use crate::support::{print_json, yes_no};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct InitOutcome {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub created_root: bool,
    pub wrote_config: bool,
}

pub fn init_layout(path: impl AsRef<Path>, force: bool) -> Result<InitOutcome, String> {
    let root = path.as_ref().to_path_buf();

    let mut created_root = false;
    if !root.exists() {
        fs::create_dir_all(&root)
            .map_err(|e| format!("failed to create init path {}: {e}", root.display()))?;
        created_root = true;
    }
    if !root.is_dir() {
        return Err(format!("init path is not a directory: {}", root.display()));
    }

    let config_path = root.join(DEFAULT_CONFIG_PATH);
    if config_path.exists() && !config_path.is_file() {
        return Err(format!(
            "config path exists but is not a file: {}",
            config_path.display()
        ));
    }

    let mut wrote_config = false;
    if force || !config_path.exists() {
        let rendered = PremselConfig::default()
            .to_toml()
            .map_err(|e| e.to_string())?;
        fs::write(&config_path, rendered)
            .map_err(|e| format!("failed to write {}: {e}", config_path.display()))?;
        wrote_config = true;
    }

    Ok(InitOutcome {
        root,
        config_path,
        created_root,
        wrote_config,
    })
}

pub fn run(path: String, force: bool, json_output: bool) {
    let outcome = init_layout(&path, force).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if json_output {
        print_json(&json!({
            "root": outcome.root,
            "configPath": outcome.config_path,
            "createdRoot": outcome.created_root,
            "wroteConfig": outcome.wrote_config,
        }));
        return;
    }

    println!("premsel init {path}");
    println!();
    println!("  root: {}", outcome.root.display());
    println!("  config: {}", outcome.config_path.display());
    println!("  created root: {}", yes_no(outcome.created_root));
    println!("  wrote config: {}", yes_no(outcome.wrote_config));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "premsel-cli-init-{prefix}-{}-{unique}",
            std::process::id()
        ))
    }

    #[test]
    fn init_writes_loadable_config() {
        let root = temp_dir("create");
        let outcome = init_layout(&root, false).expect("init should succeed");
        assert!(outcome.created_root);
        assert!(outcome.wrote_config);
        let loaded = PremselConfig::load(&outcome.config_path).expect("config should load");
        assert_eq!(loaded, PremselConfig::default());
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn init_keeps_existing_config_without_force() {
        let root = temp_dir("keep");
        fs::create_dir_all(&root).expect("temp dir should exist");
        let config_path = root.join(DEFAULT_CONFIG_PATH);
        fs::write(&config_path, "[selection]\nk = 8\n").expect("config should be written");

        let outcome = init_layout(&root, false).expect("init should succeed");
        assert!(!outcome.wrote_config);
        let loaded = PremselConfig::load(&config_path).expect("config should load");
        assert_eq!(loaded.selection.k, 8);

        let outcome = init_layout(&root, true).expect("forced init should succeed");
        assert!(outcome.wrote_config);
        assert_eq!(
            PremselConfig::load(&config_path).expect("config should load").selection.k,
            32
        );
        let _ = fs::remove_dir_all(root);
    }
}
