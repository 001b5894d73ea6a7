use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use assert_cmd::cargo::CommandCargoExt;

pub fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("rp-tests").join(name);
    fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn sample_conf() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("conf")
        .join("tests")
        .join("conf.yaml")
}

pub fn run(conf: &Path, log_dir: &Path, args: &[&str]) -> Output {
    Command::cargo_bin("rp")
        .unwrap()
        .arg("--conf")
        .arg(conf)
        .arg("--log-dir")
        .arg(log_dir)
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .unwrap()
}
