//! Integration tests for layered configuration

use super::test_utils::ENV_MUTEX;
use culler::cli::{Cli, RunContext};
use culler::config::{ConfigLoader, CullerConfig};
use culler::listing::HashMode;
use clap::Parser;
use tempfile::TempDir;

struct ConfigHome {
    previous: Option<String>,
    _dir: TempDir,
}

impl ConfigHome {
    fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        let previous = std::env::var("XDG_CONFIG_HOME").ok();
        std::env::set_var("XDG_CONFIG_HOME", dir.path());
        std::env::remove_var("CULLER_ENV");
        Self { previous, _dir: dir }
    }
}

impl Drop for ConfigHome {
    fn drop(&mut self) {
        match &self.previous {
            Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }
}

#[test]
fn test_workspace_config_drives_commands() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let _home = ConfigHome::empty();
    let workspace = TempDir::new().unwrap();
    std::fs::write(
        workspace.path().join("culler.toml"),
        "[ignore]\nnames = [\"skip.me\"]\n\n[manifest]\ninclude_files = true\n",
    )
    .unwrap();
    let listing = workspace.path().join("l.tsv");
    std::fs::write(
        &listing,
        "/a/x\t4\ts1\n/a/skip.me\t1\ts2\n/b/x\t4\ts1\n/b/z\t1\ts3\n",
    )
    .unwrap();

    let ctx = RunContext::new(workspace.path().to_path_buf(), None).unwrap();
    assert_eq!(ctx.config().ignore.names, vec!["skip.me"]);

    let cli = Cli::try_parse_from(["culler", "manifest", "-l", listing.to_str().unwrap()]).unwrap();
    let out = ctx.execute(&cli.command).unwrap();
    // include_files comes from the workspace file
    assert!(out.contains("\t/a/x\n"));
    assert!(out.contains("# 2 files, each 4.0B in 1 files\n"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let _home = ConfigHome::empty();
    let workspace = TempDir::new().unwrap();
    let file = workspace.path().join("bad.toml");
    std::fs::write(&file, "[listing]\nsample_size = 0\n").unwrap();

    assert!(CullerConfig::resolve(Some(&file), workspace.path()).is_err());
    // The raw loader does not validate
    let raw = ConfigLoader::load_from_file(&file).unwrap();
    assert_eq!(raw.listing.sample_size, 0);
    assert_eq!(raw.listing.hash_mode, HashMode::Full);
}
