#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn mjour_cmd() -> Command {
    let mut cmd = Command::cargo_bin("mjour").unwrap();
    cmd.env_remove("MJOUR_ROOT");
    cmd.env_remove("EDITOR");
    cmd.env_remove("VISUAL");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Command running inside an initialized journal
pub fn in_journal(root: &Path) -> Command {
    let mut cmd = mjour_cmd();
    cmd.current_dir(root);
    cmd
}

pub fn init_journal(root: &Path) {
    mjour_cmd().arg("init").arg(root).assert().success();
}

/// Write an entry non-interactively
pub fn write_entry(root: &Path, date: &str, title: &str, content: &str, extra: &[&str]) {
    in_journal(root)
        .arg("write")
        .arg(date)
        .args(["--title", title, "--content", content])
        .args(extra)
        .assert()
        .success();
}
