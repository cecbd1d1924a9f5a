//! End-to-end tests for the gridreport binary
//!
//! Every command runs in a fresh temporary directory with
//! `GRIDREPORT_OUT_DIR` and `RUST_LOG` cleared.

use std::path::Path;
use std::process::{Command, Output};

fn gridreport(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gridreport"))
        .args(args)
        .current_dir(dir)
        .env_remove("GRIDREPORT_OUT_DIR")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute gridreport")
}

fn is_xlsx(path: &Path) -> bool {
    std::fs::read(path).map(|b| b.len() > 100 && b.starts_with(b"PK")).unwrap_or(false)
}

#[test]
fn gantt_writes_named_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = gridreport(dir.path(), &["gantt", "-o", "chart.xlsx"]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(is_xlsx(&dir.path().join("chart.xlsx")));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("chart.xlsx"));
    assert!(stdout.contains("36 activities, 6 milestones"), "{stdout}");
}

#[test]
fn resources_prints_subtotals_and_total() {
    let dir = tempfile::tempdir().unwrap();
    let out = gridreport(dir.path(), &["resources"]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(is_xlsx(&dir.path().join("RECURSOS_LOGISTICA_ACEX.xlsx")));

    let stdout = String::from_utf8_lossy(&out.stdout);
    for amount in ["74.400 €", "15.200 €", "2.500 €", "3.672 €", "7.140 €", "102.912 €"] {
        assert!(stdout.contains(amount), "missing {amount} in {stdout}");
    }
}

#[test]
fn no_subcommand_writes_both_workbooks() {
    let dir = tempfile::tempdir().unwrap();
    let out = gridreport(dir.path(), &[]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(is_xlsx(&dir.path().join("GANTT_ACEX.xlsx")));
    assert!(is_xlsx(&dir.path().join("RECURSOS_LOGISTICA_ACEX.xlsx")));
}

#[test]
fn out_dir_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_gridreport"))
        .arg("all")
        .current_dir(dir.path())
        .env("GRIDREPORT_OUT_DIR", "reports")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute gridreport");

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(is_xlsx(&dir.path().join("reports/GANTT_ACEX.xlsx")));
    assert!(is_xlsx(&dir.path().join("reports/RECURSOS_LOGISTICA_ACEX.xlsx")));
}

#[test]
fn timeline_json_lists_every_activity() {
    let dir = tempfile::tempdir().unwrap();
    let out = gridreport(dir.path(), &["timeline", "--format", "json"]);
    assert!(out.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 36);

    let h1 = rows.iter().find(|r| r["id"] == "H1").unwrap();
    assert_eq!(h1["start"], "2024-09-22");
    assert_eq!(h1["duration_label"], "Hito");
    assert_eq!(h1["marker"], 3);
    assert_eq!(h1["kind"], "milestone");
}

#[test]
fn timeline_text_is_the_default() {
    let dir = tempfile::tempdir().unwrap();
    let out = gridreport(dir.path(), &["timeline"]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 36);
    assert!(stdout.contains("HITO 6: Proyecto Finalizado"));
}

#[test]
fn unwritable_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = gridreport(dir.path(), &["gantt", "-o", "missing/dir/chart.xlsx"]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Failed to write"), "{stderr}");
}

#[test]
fn unknown_format_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = gridreport(dir.path(), &["timeline", "--format", "svg"]);
    assert!(!out.status.success());
}
