#![allow(non_snake_case)]

use std::rc::Rc;

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use studyspark_types::{
    Language, LessonRequest, LessonResponse, Subject, Theme, VoicePhase, lesson_paragraphs,
};

use crate::components::LessonPanel;
use crate::speech::{SpeechInput, SpeechOutput, VoiceStatus};
use crate::{api, dom, theme};

static CSS: Asset = asset!("/assets/styles.css");

/// Id of the output section, used for the scroll-on-success behavior.
const LESSON_OUTPUT_ID: &str = "lesson-output";

pub fn App() -> Element {
    // Form state
    let mut question = use_signal(String::new);
    let mut subject = use_signal(Subject::default);
    let mut language = use_signal(Language::default);

    // At most one lesson request in flight; this flag guards every entry
    // path, not just the disabled button.
    let mut busy = use_signal(|| false);

    let mut lesson = use_signal(|| None::<LessonResponse>);

    // Theme is read from storage and applied to the document exactly once.
    let mut current_theme = use_signal(theme::initialize);

    // Voice capture state
    let voice_phase = use_signal(VoicePhase::default);
    let voice_status = use_signal(VoiceStatus::default);

    // Capability adapters; `None` hides the dependent controls for the
    // whole session.
    let speech_input =
        use_hook(|| Rc::new(SpeechInput::new(voice_phase, question, voice_status)));
    let speech_output = use_hook(SpeechOutput::new);

    // One submission path for both the button and the keyboard shortcut.
    let submit = move || {
        if busy() {
            return;
        }
        let request = match LessonRequest::new(&question(), subject(), language()) {
            Ok(request) => request,
            Err(err) => {
                dom::alert(&err.to_string());
                return;
            }
        };
        spawn(async move {
            busy.set(true);
            match api::generate_lesson(&request).await {
                Ok(response) => {
                    lesson.set(Some(response));
                    // Give the output section a tick to mount, then bring
                    // it into view. Failures never scroll.
                    TimeoutFuture::new(50).await;
                    dom::scroll_into_view(LESSON_OUTPUT_ID);
                }
                Err(err) => dom::alert(&err.to_string()),
            }
            busy.set(false);
        });
    };

    let voice_input = speech_input.clone();
    let listening = voice_phase().is_listening();
    let status = voice_status();

    let speech_out_play = speech_output.clone();
    let speech_out_pause = speech_output.clone();

    rsx! {
        link { rel: "stylesheet", href: CSS }
        main { class: "container",
            header { class: "app-header",
                div { class: "header-content",
                    h1 { "StudySpark" }
                    p { class: "subtitle", "Ask anything, get a lesson" }
                }
                label { class: "theme-switch",
                    input {
                        r#type: "checkbox",
                        checked: current_theme().is_dark(),
                        onchange: move |e: Event<FormData>| {
                            let next = if e.checked() { Theme::Dark } else { Theme::Light };
                            theme::set(next);
                            current_theme.set(next);
                        }
                    }
                    span { "Dark mode" }
                }
            }

            section { class: "question-panel",
                if speech_input.is_some() {
                    div { class: "voice-controls",
                        button {
                            class: "btn btn-voice",
                            disabled: listening,
                            onclick: move |_| {
                                if let Some(input) = voice_input.as_ref() {
                                    input.start();
                                }
                            },
                            "🎤 Ask by Voice"
                        }
                        span { class: status.class(), "{status.text}" }
                    }
                }

                textarea {
                    class: "question-input",
                    placeholder: "Type your question, e.g. \"what is 5G\"",
                    value: question,
                    oninput: move |e| question.set(e.value()),
                    onkeydown: move |e| {
                        let mods = e.modifiers();
                        if e.key() == Key::Enter && (mods.ctrl() || mods.meta()) {
                            submit();
                        }
                    },
                }

                div { class: "form-row",
                    label { class: "field-label", r#for: "subject", "Subject" }
                    select {
                        id: "subject",
                        class: "subject-select",
                        value: subject().value(),
                        onchange: move |e| subject.set(Subject::from_value(&e.value())),
                        for option_subject in Subject::all().iter().copied() {
                            option {
                                value: option_subject.value(),
                                selected: subject() == option_subject,
                                "{option_subject.label()}"
                            }
                        }
                    }
                }

                div { class: "form-row",
                    span { class: "field-label", "Style" }
                    for option_language in Language::all().iter().copied() {
                        label { class: "radio-option",
                            input {
                                r#type: "radio",
                                name: "language",
                                value: option_language.value(),
                                checked: language() == option_language,
                                onchange: move |_| language.set(option_language),
                            }
                            span { "{option_language.label()}" }
                        }
                    }
                }

                button {
                    class: "btn btn-submit",
                    disabled: busy(),
                    onclick: move |_| submit(),
                    if busy() { "Generating..." } else { "Generate Lesson" }
                }
            }

            if let Some(response) = lesson() {
                section { id: LESSON_OUTPUT_ID, class: "lesson-output",
                    h2 { "Your Lesson" }
                    LessonPanel { response }
                    if speech_output.is_some() {
                        div { class: "speech-controls",
                            button {
                                class: "btn btn-speech",
                                onclick: move |_| {
                                    if let (Some(out), Some(current)) =
                                        (speech_out_play.as_ref(), lesson())
                                    {
                                        let text = lesson_paragraphs(&current.lesson).join(" ");
                                        out.speak(&text);
                                    }
                                },
                                "🔊 Voice It"
                            }
                            button {
                                class: "btn btn-speech",
                                onclick: move |_| {
                                    if let Some(out) = speech_out_pause.as_ref() {
                                        out.toggle_pause();
                                    }
                                },
                                "⏯ Pause / Resume"
                            }
                        }
                    }
                }
            }
        }
    }
}
