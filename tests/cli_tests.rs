//! CLI integration tests using assert_cmd.
//!
//! All tests are self-contained: small ranges, small sieves, temporary
//! config files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

#[allow(deprecated)]
fn millrab() -> Command {
    let mut cmd = Command::cargo_bin("millrab").unwrap();
    cmd.env_remove("MILLRAB_CONFIG").env_remove("MILLRAB_THREADS");
    cmd
}

// --- Help and arg validation ---

#[test]
fn help_shows_all_subcommands() {
    millrab().arg("--help").assert().success().stdout(
        predicate::str::contains("check")
            .and(predicate::str::contains("verify"))
            .and(predicate::str::contains("tiers")),
    );
}

#[test]
fn help_verify_shows_args() {
    millrab()
        .args(["verify", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--tier")
                .and(predicate::str::contains("--start"))
                .and(predicate::str::contains("--end"))
                .and(predicate::str::contains("--chunk-size"))
                .and(predicate::str::contains("--json")),
        );
}

#[test]
fn verify_requires_tier() {
    millrab()
        .args(["verify", "--start", "0", "--end", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--tier"));
}

#[test]
fn verify_rejects_unknown_tier() {
    millrab()
        .args(["verify", "--tier", "16", "--start", "0", "--end", "10"])
        .assert()
        .failure();
}

#[test]
fn check_requires_a_number() {
    millrab().arg("check").assert().failure();
}

// --- check ---

#[test]
fn check_classifies_numbers() {
    millrab()
        .args(["check", "2", "3215031751", "174440041", "4952019383323"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("2 prime")
                .and(predicate::str::contains("3215031751 composite"))
                .and(predicate::str::contains("174440041 prime"))
                .and(predicate::str::contains("4952019383323 prime")),
        );
}

#[test]
fn check_big_and_negative() {
    millrab()
        .args(["check", "18446744073709551629", "-7"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("18446744073709551629 prime")
                .and(predicate::str::contains("-7 composite")),
        );
}

#[test]
fn check_beyond_supported_range_fails() {
    millrab()
        .args(["check", "3317044064679887385961981"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("3317044064679887385961981"));
}

#[test]
fn check_rejects_garbage() {
    millrab()
        .args(["check", "12abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid integer"));
}

// --- verify ---

#[test]
fn verify_tier32_small_range() {
    millrab()
        .args([
            "--threads",
            "2",
            "verify",
            "--tier",
            "32",
            "--start",
            "0",
            "--end",
            "100000",
            "--chunk-size",
            "5000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS").and(predicate::str::contains("9592 primes")));
}

#[test]
fn verify_json_report() {
    let output = millrab()
        .args([
            "--threads",
            "3",
            "verify",
            "--tier",
            "dispatch",
            "--start",
            "1000",
            "--end",
            "2000",
            "--chunk-size",
            "64",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["tier"], "dispatch");
    assert_eq!(report["checked"], 1000);
    assert_eq!(report["primes"], 135); // pi(1999) - pi(999)
    assert_eq!(report["workers"], 3);
    assert_eq!(report["cancelled"], false);
}

#[test]
fn verify_out_of_domain_fails() {
    millrab()
        .args([
            "verify",
            "--tier",
            "64-restricted",
            "--start",
            "3037001000",
            "--end",
            "3037001100",
            "--sieve-limit",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tier64-restricted"));
}

#[test]
fn verify_empty_range_fails() {
    millrab()
        .args(["verify", "--tier", "64", "--start", "10", "--end", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty range"));
}

#[test]
fn verify_rejects_oversized_sieve() {
    millrab()
        .args([
            "verify",
            "--tier",
            "64",
            "--start",
            "18446744073709550000",
            "--end",
            "18446744073709551000",
            "--sieve-limit",
            "18446744073709551615",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sieve_limit"));
}

#[test]
fn verify_reads_config_file() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "threads = 2\nchunk_size = 128\nsieve_limit = 0\ncertainty = 25").unwrap();
    let output = millrab()
        .arg("--config")
        .arg(config.path())
        .args(["verify", "--tier", "big", "--start", "18446744073709551000", "--end", "18446744073709552000", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["workers"], 2);
    assert_eq!(report["oracle"], "mr(25)");
    assert_eq!(report["checked"], 1000);
}

#[test]
fn verify_bad_config_file_fails() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "threads = 0").unwrap();
    millrab()
        .arg("--config")
        .arg(config.path())
        .args(["verify", "--tier", "32", "--start", "0", "--end", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("threads"));
}

// --- tiers ---

#[test]
fn tiers_lists_every_tier() {
    millrab().arg("tiers").assert().success().stdout(
        predicate::str::contains("tier32")
            .and(predicate::str::contains("tier64-restricted"))
            .and(predicate::str::contains("tier64"))
            .and(predicate::str::contains("tier-big"))
            .and(predicate::str::contains("2147483647"))
            .and(predicate::str::contains("3037001056"))
            .and(predicate::str::contains("3317044064679887385961980")),
    );
}
