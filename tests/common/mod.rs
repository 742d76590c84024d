#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub fn jambiato_cmd() -> Command {
    let mut cmd = Command::cargo_bin("jambiato").unwrap();
    cmd.env_remove("JAMBIATO_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write a file under `root`, creating parent directories
pub fn write_source(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
