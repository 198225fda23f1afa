use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const DATASET: &str = r#"[
    {"question": "What are CAT and FAT?", "answer": "Continuous and final assessment tests."},
    {"question": "Where is the hostel office?", "answer": "Block C, ground floor."},
    {"question": "Library opening hours", "answer": "8am to 10pm on weekdays."}
]"#;

fn setup() -> TempDir {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("queries.json"), DATASET).unwrap();
    temp
}

#[allow(deprecated)]
fn qa(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("qa").expect("binary");
    cmd.current_dir(workdir)
        .env("QA_EMBEDDING_MODE", "stub")
        .env("QA_DATASET", workdir.join("queries.json"))
        .env_remove("QA_CONFIG")
        .env_remove("OPENAI_API_KEY");
    cmd
}

#[test]
fn ask_answers_from_corpus() {
    let temp = setup();
    qa(temp.path())
        .args(["ask", "what are cat and fat"])
        .assert()
        .success()
        .stdout("Continuous and final assessment tests.\n");
}

#[test]
fn ask_matches_shuffled_words() {
    let temp = setup();
    qa(temp.path())
        .args(["ask", "hours opening library"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8am to 10pm"));
}

#[test]
fn ask_json_reports_source() {
    let temp = setup();
    let output = qa(temp.path())
        .args(["--quiet", "ask", "--json", "Where is the hostel office?"])
        .output()
        .expect("command run");
    assert!(output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["response"], "Block C, ground floor.");
    assert_eq!(body["source"], "corpus");
}

#[test]
fn ask_miss_without_fallback_fails() {
    let temp = setup();
    qa(temp.path())
        .args(["ask", "Is there a swimming pool?"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("No answer found"));
}

#[test]
fn ask_with_missing_dataset_degrades() {
    let temp = tempdir().unwrap();
    qa(temp.path())
        .args(["ask", "What are CAT and FAT?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error loading dataset"));
}

#[test]
fn dataset_flag_overrides_env() {
    let temp = setup();
    let other = temp.path().join("other.jsonl");
    fs::write(&other, "{\"question\":\"Mess menu\",\"answer\":\"Weekly.\"}\n").unwrap();
    qa(temp.path())
        .arg("--dataset")
        .arg(&other)
        .args(["ask", "mess menu"])
        .assert()
        .success()
        .stdout("Weekly.\n");
}

#[test]
fn config_file_is_honoured() {
    let temp = setup();
    fs::write(
        temp.path().join("qa.toml"),
        "[engine]\nconfidence_threshold = 1.0\n\n[engine.weights]\nfuzzy = 0.5\n",
    )
    .unwrap();
    // Fuzzy alone can no longer reach the gate.
    qa(temp.path())
        .args(["ask", "hours opening library"])
        .assert()
        .failure();
}

#[test]
fn inspect_emits_trace() {
    let temp = setup();
    let output = qa(temp.path())
        .args(["--quiet", "inspect", "Where is the hostel office?"])
        .output()
        .expect("command run");
    assert!(output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["answer"], "Block C, ground floor.");
    assert_eq!(body["best"]["strategy"], "exact");
    assert_eq!(body["variants"].as_array().unwrap().len(), 3);
}

#[test]
fn normalize_and_expand_print_plain_text() {
    let temp = tempdir().unwrap();
    qa(temp.path())
        .args(["normalize", "What are CAT and FAT?"])
        .assert()
        .success()
        .stdout("continuous assessment test final assessment test\n");

    qa(temp.path())
        .args(["expand", "Where is the VIT hostel?"])
        .assert()
        .success()
        .stdout(
            "Where is the VIT hostel?\nthe vit hostel?\nwhere vellore institute technology dormitory\n",
        );
}

#[test]
fn unknown_embed_mode_env_is_rejected() {
    let temp = setup();
    qa(temp.path())
        .env("QA_EMBEDDING_MODE", "onnx")
        .args(["normalize", "hostel"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("QA_EMBEDDING_MODE"));
}
