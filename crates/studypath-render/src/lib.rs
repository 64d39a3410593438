//! studypath-render: turns content records and page state into render
//! instructions, and serializes instructions as HTML or terminal text.
//!
//! Nothing in this crate performs I/O except [`html::write_html_page`]; every
//! `render_*` function is a pure function of its inputs.

pub mod html;
pub mod instruction;
pub mod markup;
pub mod pages;
pub mod terminal;

pub use instruction::{
    Control, Entry, Feedback, Instruction, Mark, OptionMark, QuestionBlock, RoadmapNode, Slot,
};
pub use markup::format_text;
pub use pages::{
    render_flashcard, render_generated_summary, render_graded_quiz, render_module,
    render_progression, render_quiz, render_roadmap, render_static_summary,
    subject_display_name,
};
