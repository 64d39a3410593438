//! The `studypath init` command.

use std::path::Path;

use anyhow::{Context, Result};

const CONFIG_FILE: &str = "studypath.toml";

/// Sample content written under `content/`, as (relative path, body).
const SAMPLE_CONTENT: &[(&str, &str)] = &[
    ("content/mathematics_curriculum.json", SAMPLE_CURRICULUM),
    ("content/quizzes/mathematics_quizzes.json", SAMPLE_QUIZZES),
    ("content/mathematics/beginner/flashcards.json", SAMPLE_FLASHCARDS),
];

fn write_if_missing(path: &Path, body: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

pub fn execute() -> Result<()> {
    write_if_missing(Path::new(CONFIG_FILE), SAMPLE_CONFIG)?;
    for (path, body) in SAMPLE_CONTENT {
        write_if_missing(Path::new(path), body)?;
    }

    println!("\nNext steps:");
    println!("  1. Run: studypath validate --content content");
    println!("  2. Run: studypath roadmap --subject mathematics");
    println!("  3. Run: studypath select --subject mathematics --level beginner --module sets");
    println!("  4. Run: studypath module, then studypath quiz");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# studypath configuration

# Selection and quiz progress are kept here.
store_path = "./.studypath/storage.json"

# Subjects offered by static sources.
subjects = ["mathematics"]

# Summary backend for `studypath summary --dynamic`.
# summary_url = "http://127.0.0.1:5000"

# Request timeout in seconds. Requests wait indefinitely when unset.
# timeout_secs = 30

# Where curriculum content comes from. One of:
#   type = "api"        base_url = "http://127.0.0.1:8000"
#   type = "static"     base_url = "https://example.org/curriculum"
#   type = "directory"  path = "./content"
[source]
type = "directory"
path = "./content"
"#;

const SAMPLE_CURRICULUM: &str = r#"{
  "subject": "mathematics",
  "levels": {
    "beginner": {
      "modules": [
        {
          "module_id": "sets",
          "module_name": "Sets and Membership",
          "motivation": "Sets are the language the rest of mathematics is written in.",
          "concept_overview": ["Membership", "Subsets", "Union and intersection"],
          "theory": "A **set** is an unordered collection of distinct objects.\n\nTwo sets are equal when they have exactly the same elements.",
          "formulas": [
            {"expression": "|A ∪ B| = |A| + |B| - |A ∩ B|", "explanation": "Inclusion-exclusion for two sets."}
          ],
          "worked_examples": [
            {
              "problem": "How many elements does {1, 2, 2, 3} have?",
              "solution": "Repeated elements collapse, so the set is {1, 2, 3}.",
              "difficulty": "easy",
              "final_answer": "3"
            }
          ],
          "key_takeaways": ["Order and repetition do not matter in a set."],
          "ai_summary": {
            "key_ideas": ["A set is determined by its elements alone."],
            "important_formulas": ["|A ∪ B| = |A| + |B| - |A ∩ B|"],
            "common_exam_traps": ["Counting repeated elements twice."],
            "exam_tip": "Rewrite a set without duplicates before counting."
          }
        },
        {
          "module_id": "functions",
          "module_name": "Functions",
          "theory": "A function assigns exactly one output to every input."
        }
      ]
    },
    "intermediate": {
      "modules": [
        {"module_id": "limits", "module_name": "Limits"}
      ]
    },
    "advanced": {
      "modules": [
        {"module_id": "eigenvalues", "module_name": "Eigenvalues"}
      ]
    }
  }
}
"#;

const SAMPLE_QUIZZES: &str = r#"{
  "sets": {
    "questions": [
      {
        "question": "How many elements does {a, a, b} have?",
        "options": ["2", "3"],
        "correct": 0,
        "explanation": "Repeated elements count once."
      },
      {
        "question": "Is {1, 2} equal to {2, 1}?",
        "options": ["No", "Yes"],
        "correct": 1,
        "explanation": "Order does not matter in a set."
      }
    ]
  },
  "functions": {
    "questions": [
      {
        "question": "Can a function map one input to two outputs?",
        "options": ["Yes", "No"],
        "correct": 1,
        "explanation": "Each input has exactly one output."
      }
    ]
  }
}
"#;

const SAMPLE_FLASHCARDS: &str = r#"[
  {"front": "Set", "back": "An unordered collection of distinct objects."},
  {"front": "Subset", "back": "A set whose elements all belong to another set."},
  {"front": "Union", "back": "The elements in either set."}
]
"#;
