use std::rc::Rc;

use dioxus::prelude::*;
use letterwheel_shared::{GameOverStats, Language};

use super::view::GameView;
use crate::ws::GameHandle;

#[component]
pub fn LanguageScreen(onselect: EventHandler<Language>) -> Element {
    rsx! {
        div { class: "screen language-screen",
            h1 { "Letterwheel" }
            p { "Choose a language" }
            div { class: "language-options",
                for language in Language::ALL {
                    button {
                        key: "{language.tag()}",
                        class: "btn",
                        onclick: move |_| onselect.call(language),
                        "{language.display_name()}"
                    }
                }
            }
        }
    }
}

fn submit(handle: &GameHandle, mut answer: Signal<String>) {
    let text = answer.read().clone();
    match handle.submit_answer(&text) {
        Ok(true) => answer.set(String::new()),
        Ok(false) => {}
        Err(e) => crate::log_warn!("Answer not sent: {}", e),
    }
}

#[component]
pub fn GameScreen() -> Element {
    let view = use_context::<GameView>();
    let handle = use_context::<GameHandle>();
    let mut answer = use_signal(String::new);
    let mut input = use_signal(|| None::<Rc<MountedData>>);

    use_effect(move || {
        let _seq = (view.question_seq)();
        answer.set(String::new());
        if let Some(element) = input() {
            spawn(async move {
                let _ = element.set_focus(true).await;
            });
        }
    });

    let question = view.question.read().clone();
    let (letter, text) = match question {
        Some(q) => (q.letter, q.question),
        None => (String::new(), "Waiting for the first question…".to_string()),
    };

    let on_enter = handle.clone();
    let on_submit = handle.clone();
    let on_pass = handle;

    rsx! {
        div { class: "screen game-screen",
            div { class: "timer", "{view.timer}" }
            LetterCircle {}
            div { class: "question-panel",
                div { class: "current-letter", "{letter}" }
                p { class: "question", "{text}" }
                input {
                    class: "answer",
                    r#type: "text",
                    value: "{answer}",
                    autocomplete: "off",
                    onmounted: move |e| input.set(Some(e.data())),
                    oninput: move |e: FormEvent| answer.set(e.value()),
                    onkeydown: move |e: KeyboardEvent| {
                        if e.key() == Key::Enter {
                            submit(&on_enter, answer);
                        }
                    },
                }
                div { class: "actions",
                    button { class: "btn", onclick: move |_| submit(&on_submit, answer), "Submit" }
                    button {
                        class: "btn secondary",
                        onclick: move |_| {
                            if let Err(e) = on_pass.pass_question() {
                                crate::log_warn!("Pass not sent: {}", e);
                            }
                        },
                        "Pass"
                    }
                }
            }
        }
    }
}

#[component]
fn LetterCircle() -> Element {
    let view = use_context::<GameView>();
    let size = view.size;
    let placed = view.placed.read().clone();

    rsx! {
        div { class: "letter-circle", style: "width: {size}px; height: {size}px;",
            for (index, letter) in placed.into_iter().enumerate() {
                div {
                    key: "{letter.key}",
                    class: view.node_class(index),
                    style: "left: {letter.x}px; top: {letter.y}px;",
                    "{letter.key}"
                }
            }
        }
    }
}

#[component]
pub fn ResultScreen(stats: GameOverStats) -> Element {
    rsx! {
        div { class: "screen result-screen",
            h1 { "Game over" }
            ul { class: "stats",
                li { class: "green", "Correct: {stats.correct_count}" }
                li { class: "red", "Wrong: {stats.wrong_count}" }
                li { class: "yellow", "Passed: {stats.passed_count}" }
            }
        }
    }
}
