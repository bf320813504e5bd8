//! CLI arg handling tests for tempwatch
use std::process::Command;

#[test]
fn test_help_mentions_short_and_long_flags() {
    let output = Command::new(env!("CARGO_BIN_EXE_tempwatch"))
        .arg("--help")
        .output()
        .expect("run tempwatch --help");
    assert!(output.status.success());
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        text.contains("--interval")
            && text.contains("-i")
            && text.contains("--capacity")
            && text.contains("-c")
            && text.contains("--offline"),
        "help text missing expected flags\n{text}"
    );
}

#[test]
fn test_help_wins_over_other_flags() {
    let exe = env!("CARGO_BIN_EXE_tempwatch");
    let out = Command::new(exe)
        .args(["--interval", "5", "-c", "3", "--help"])
        .output()
        .expect("run tempwatch");
    assert!(out.status.success(), "--interval … --help did not succeed");
    assert!(String::from_utf8_lossy(&out.stdout).contains("Usage:"));
}

#[test]
fn test_bad_values_exit_with_usage_error() {
    let exe = env!("CARGO_BIN_EXE_tempwatch");
    let out = Command::new(exe)
        .args(["--interval", "soon"])
        .output()
        .expect("run tempwatch");
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("--interval"));

    let out = Command::new(exe)
        .arg("--what")
        .output()
        .expect("run tempwatch");
    assert_eq!(out.status.code(), Some(2));
}
