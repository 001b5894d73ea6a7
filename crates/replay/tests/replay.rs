use std::fs;

mod common;

#[test]
fn test_replay() {
    let dir = common::test_dir("replay");
    let log_dir = dir.join("logs");

    let output = common::run(common::sample_conf().as_path(), log_dir.as_path(), &["--ticks", "2"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Replayed 2 ticks: 4 plans, 2 blocked, 0 failed"));
    assert!(fs::read_dir(log_dir).unwrap().next().is_some());
}

#[test]
fn test_invalid_conf() {
    let dir = common::test_dir("invalid");
    let conf = dir.join("conf.yaml");
    fs::write(&conf, "planner:\n  radius: -3.0\n").unwrap();

    let output = common::run(conf.as_path(), dir.join("logs").as_path(), &[]);
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Invalid `planner` configuration"));
}
