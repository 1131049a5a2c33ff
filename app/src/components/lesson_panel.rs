//! Lesson output rendering
//!
//! Turns a lesson response into paragraph blocks plus the optional meme
//! image. Lesson text is rendered as text nodes only; markup in the reply
//! never reaches the DOM as markup.

use dioxus::prelude::*;

use studyspark_types::{LessonResponse, lesson_paragraphs};

#[component]
pub fn LessonPanel(response: LessonResponse) -> Element {
    let paragraphs = lesson_paragraphs(&response.lesson);

    rsx! {
        div { class: "lesson-content",
            for (i , paragraph) in paragraphs.iter().enumerate() {
                p { key: "{i}", "{paragraph}" }
            }
        }
        if let Some(meme_url) = response.meme_url.as_ref() {
            img {
                class: "meme-img",
                src: "{meme_url}",
                alt: "Educational meme illustrating the lesson",
            }
        }
    }
}
