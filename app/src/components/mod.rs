//! UI Components

pub mod lesson_panel;

pub use lesson_panel::LessonPanel;
