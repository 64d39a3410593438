//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn studypath(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("studypath").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("STUDYPATH_API_URL")
        .env_remove("STUDYPATH_SUMMARY_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// A workspace with the starter config and sample content from `init`.
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    studypath(&dir).arg("init").assert().success();
    dir
}

fn select_sets(dir: &TempDir) {
    studypath(dir)
        .args(["select", "--subject", "mathematics", "--level", "beginner"])
        .args(["--module", "sets"])
        .assert()
        .success();
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    studypath(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created studypath.toml"))
        .stdout(predicate::str::contains("Next steps:"));

    assert!(dir.path().join("studypath.toml").exists());
    assert!(dir.path().join("content/mathematics_curriculum.json").exists());
    assert!(dir.path().join("content/quizzes/mathematics_quizzes.json").exists());
    assert!(dir
        .path()
        .join("content/mathematics/beginner/flashcards.json")
        .exists());
}

#[test]
fn init_skips_existing() {
    let dir = workspace();

    studypath(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn sample_content_is_valid() {
    let dir = workspace();

    studypath(&dir)
        .args(["validate", "--content", "content"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All content valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("content/quizzes/mathematics_quizzes.json"),
        r#"{"ghost": {"questions": [{"question": "?", "options": ["a", "b"], "correct": 0}]}}"#,
    )
    .unwrap();

    studypath(&dir)
        .args(["validate", "--content", "content"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ghost] WARNING"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_nonexistent_dir() {
    let dir = TempDir::new().unwrap();

    studypath(&dir)
        .args(["validate", "--content", "no_such_dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn subjects_lists_directory_curricula() {
    let dir = workspace();

    studypath(&dir)
        .arg("subjects")
        .assert()
        .success()
        .stdout(predicate::str::contains("mathematics"))
        .stdout(predicate::str::contains("Mathematics"))
        .stdout(predicate::str::contains("aiml").not());
}

#[test]
fn roadmap_shows_levels_and_modules() {
    let dir = workspace();

    studypath(&dir)
        .args(["roadmap", "--subject", "mathematics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mathematics Roadmap"))
        .stdout(predicate::str::contains("[ ] Sets and Membership (sets)"))
        .stdout(predicate::str::contains("Eigenvalues (eigenvalues)"))
        .stdout(predicate::str::contains("4 modules."));
}

#[test]
fn roadmap_writes_html_page() {
    let dir = workspace();

    studypath(&dir)
        .args(["roadmap", "--subject", "mathematics", "--html", "out/roadmap.html"])
        .assert()
        .success();

    let html = std::fs::read_to_string(dir.path().join("out/roadmap.html")).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Sets and Membership"));
}

#[test]
fn roadmap_for_missing_subject_shows_error_banner() {
    let dir = workspace();

    studypath(&dir)
        .args(["roadmap", "--subject", "physics"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error loading roadmap data."));
}

#[test]
fn module_requires_a_selection() {
    let dir = workspace();

    studypath(&dir)
        .arg("module")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no subject selected"));

    studypath(&dir)
        .args(["select", "--subject", "mathematics", "--level", "beginner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected mathematics/beginner"));

    studypath(&dir)
        .arg("module")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no module selected"));
}

#[test]
fn select_rejects_unknown_module() {
    let dir = workspace();

    studypath(&dir)
        .args(["select", "--subject", "mathematics", "--level", "beginner"])
        .args(["--module", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn module_renders_content_and_placeholders() {
    let dir = workspace();
    select_sets(&dir);

    studypath(&dir)
        .arg("module")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sets and Membership"))
        .stdout(predicate::str::contains("unordered collection"))
        .stdout(predicate::str::contains("Inclusion-exclusion"));

    studypath(&dir)
        .args(["select", "--subject", "mathematics", "--level", "beginner"])
        .args(["--module", "functions"])
        .assert()
        .success();

    studypath(&dir)
        .arg("module")
        .assert()
        .success()
        .stdout(predicate::str::contains("No example provided."))
        .stdout(predicate::str::contains("No formulation required."));
}

#[test]
fn quiz_without_answers_lists_questions() {
    let dir = workspace();
    select_sets(&dir);

    studypath(&dir)
        .arg("quiz")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. How many elements does {a, a, b} have?"))
        .stdout(predicate::str::contains("Submit with:"));
}

#[test]
fn unanswered_quiz_is_rejected_and_not_recorded() {
    let dir = workspace();
    select_sets(&dir);

    studypath(&dir)
        .args(["quiz", "--answers", "0,-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("please answer all questions"));

    studypath(&dir)
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("No quiz scores recorded yet."));
}

#[test]
fn failing_quiz_needs_review() {
    let dir = workspace();
    select_sets(&dir);

    studypath(&dir)
        .args(["quiz", "--answers", "1,0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Incorrect."))
        .stdout(predicate::str::contains("Score: 0%"));

    studypath(&dir)
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Review"));
}

#[test]
fn passing_every_module_completes_the_level() {
    let dir = workspace();
    select_sets(&dir);

    studypath(&dir)
        .args(["quiz", "--answers", "0,1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("Score: 100%"))
        .stdout(predicate::str::contains("Module Passed!"));

    studypath(&dir)
        .args(["select", "--subject", "mathematics", "--level", "beginner"])
        .args(["--module", "functions"])
        .assert()
        .success();

    studypath(&dir)
        .args(["quiz", "--answers", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LEVEL COMPLETE!"));

    studypath(&dir)
        .args(["roadmap", "--subject", "mathematics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] Sets and Membership (sets)  best 100%"))
        .stdout(predicate::str::contains("[x] Functions (functions)  best 100%"));
}

#[test]
fn progress_table_and_export() {
    let dir = workspace();
    select_sets(&dir);
    studypath(&dir)
        .args(["quiz", "--answers", "0,1"])
        .assert()
        .success();

    studypath(&dir)
        .args(["progress", "--export", "export/progress.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Best Score"))
        .stdout(predicate::str::contains("100%"))
        .stdout(predicate::str::contains("Passed"))
        .stderr(predicate::str::contains("Progress exported to:"));

    let json = std::fs::read_to_string(dir.path().join("export/progress.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["exported_at"].is_string());
    assert_eq!(value["progress"]["mathematics"]["beginner"]["sets"], 100);
}

#[test]
fn complete_marks_module_once() {
    let dir = workspace();
    select_sets(&dir);

    studypath(&dir)
        .arg("complete")
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked sets as completed."))
        .stdout(predicate::str::contains(
            "beginner level progress: 50% (1 of 2 modules)",
        ));

    studypath(&dir)
        .arg("complete")
        .assert()
        .success()
        .stdout(predicate::str::contains("sets was already completed."));
}

#[test]
fn static_summary_from_module_content() {
    let dir = workspace();
    select_sets(&dir);

    studypath(&dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "A set is determined by its elements alone.",
        ))
        .stdout(predicate::str::contains("Counting repeated elements twice."));
}

#[test]
fn dynamic_summary_needs_a_backend() {
    let dir = workspace();
    select_sets(&dir);

    studypath(&dir)
        .args(["summary", "--dynamic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no summary backend configured"));
}

#[test]
fn flashcards_step_through_and_wrap() {
    let dir = workspace();
    select_sets(&dir);

    studypath(&dir)
        .arg("flashcards")
        .write_stdin("\n\n\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Card 1 of 3"))
        .stdout(predicate::str::contains("Card 3 of 3"))
        .stdout(predicate::str::contains("An unordered collection of distinct objects."));
}

#[test]
fn explicit_config_flag() {
    let dir = workspace();
    let alt = TempDir::new().unwrap();
    let content = dir.path().join("content");
    let config = format!(
        "store_path = \"{}\"\n\n[source]\ntype = \"directory\"\npath = \"{}\"\n",
        alt.path().join("storage.json").display(),
        content.display()
    );
    let config_path = alt.path().join("custom.toml");
    std::fs::write(&config_path, config).unwrap();

    studypath(&alt)
        .arg("--config")
        .arg(&config_path)
        .args(["roadmap", "--subject", "mathematics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sets and Membership"));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();

    studypath(&dir)
        .args(["--config", "nope.toml", "subjects"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
