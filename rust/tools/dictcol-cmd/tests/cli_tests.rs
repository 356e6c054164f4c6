use std::process::Command;

use dictcol_testkit::files::write_column_file;
use serde_json::Value;

fn dictcol_cmd(args: &[&str]) -> (bool, Value) {
    let output = Command::new(env!("CARGO_BIN_EXE_dictcol-cmd"))
        .args(args)
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let value = if output.status.success() {
        serde_json::from_str(&stdout).unwrap()
    } else {
        Value::Null
    };
    (output.status.success(), value)
}

#[test]
fn test_encode_then_query() {
    let source = write_column_file(&["apple", "banana", "apple", "cherry", "applause"]).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("fruit.dump");
    let dump = dump.to_str().unwrap();

    let (ok, summary) = dictcol_cmd(&[
        "encode",
        "--file",
        source.path().to_str().unwrap(),
        "--output",
        dump,
        "--workers",
        "2",
    ]);
    assert!(ok);
    assert_eq!(summary["rows"], 5);
    assert_eq!(summary["distinct_values"], 4);

    for strategy in ["scalar", "vectorized", "auto"] {
        let (ok, report) = dictcol_cmd(&["exact", dump, "apple", "--strategy", strategy]);
        assert!(ok);
        assert_eq!(report["rows"], serde_json::json!([0, 2]));
    }

    let (ok, report) = dictcol_cmd(&["prefix", dump, "app"]);
    assert!(ok);
    assert_eq!(
        report["matches"],
        serde_json::json!([
            { "value": "apple", "rows": [0, 2] },
            { "value": "applause", "rows": [4] },
        ])
    );
}

#[test]
fn test_invalid_arguments_fail() {
    let source = write_column_file(&["a"]).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("a.dump");
    let dump = dump.to_str().unwrap();
    let source = source.path().to_str().unwrap();

    let (ok, _) = dictcol_cmd(&["encode", "--file", source, "--output", dump, "--workers", "0"]);
    assert!(!ok);

    let (ok, _) = dictcol_cmd(&["encode", "--file", source, "--output", dump]);
    assert!(ok);
    let (ok, _) = dictcol_cmd(&["prefix", dump, ""]);
    assert!(!ok);
    let (ok, _) = dictcol_cmd(&["exact", dump, "a", "--strategy", "fastest"]);
    assert!(!ok);
}

#[test]
fn test_bench() {
    let rows = dictcol_testkit::data_gen::generate_rows(2000, 30, 5);
    let source = write_column_file(&rows).unwrap();
    let (ok, report) = dictcol_cmd(&[
        "bench",
        "--file",
        source.path().to_str().unwrap(),
        "--workers",
        "3",
        "--iterations",
        "2",
    ]);
    assert!(ok);
    assert_eq!(report["rows"], 2000);
    assert!(report["exact"]["matched_rows"].as_u64().unwrap() >= 1);
}
