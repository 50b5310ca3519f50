//! Dioxus front end: language choice, the game itself, and the results.

mod screens;
mod view;

use dioxus::prelude::*;
use letterwheel_shared::Language;

pub use screens::{GameScreen, LanguageScreen, ResultScreen};
pub use view::GameView;

use crate::config::ClientConfig;
use crate::ws::{ConnectionManager, GameHandle};

const STYLE: &str = include_str!("style.css");

#[component]
pub fn App() -> Element {
    let mut language = use_signal(|| None::<Language>);

    rsx! {
        style { {STYLE} }
        match language() {
            None => rsx! {
                LanguageScreen { onselect: move |choice| language.set(Some(choice)) }
            },
            Some(choice) => rsx! {
                Session { language: choice }
            },
        }
    }
}

/// One game per run of the app. The connection task lives as long as this
/// component does.
#[component]
fn Session(language: Language) -> Element {
    let started = use_hook(move || start(language).map_err(|e| format!("{:#}", e)));

    match started {
        Ok((view, handle)) => rsx! {
            SessionScreens { view, handle }
        },
        Err(e) => rsx! {
            div { class: "screen error", "Could not start the game: {e}" }
        },
    }
}

#[component]
fn SessionScreens(view: GameView, handle: GameHandle) -> Element {
    use_context_provider(|| view);
    use_context_provider(|| handle.clone());

    match (view.stats)() {
        Some(stats) => rsx! { ResultScreen { stats } },
        None => rsx! { GameScreen {} },
    }
}

/// Build the session and spawn its connection loop on the current scope.
fn start(language: Language) -> anyhow::Result<(GameView, GameHandle)> {
    #[cfg(not(target_arch = "wasm32"))]
    let (config, connector, session_id) = {
        let session_id = crate::storage::load_or_create_session_id();
        (
            ClientConfig::from_env()?,
            crate::ws::TungsteniteConnector::new(Some(session_id.clone())),
            Some(session_id),
        )
    };
    #[cfg(target_arch = "wasm32")]
    let (config, connector, session_id) = (
        ClientConfig::from_location()?,
        crate::ws::WebSocketConnector,
        None,
    );

    let view = GameView::new(config.circle.size);
    let mut manager = ConnectionManager::new(config.session(language, session_id)?, view);
    let handle = manager.handle();

    spawn(async move {
        manager.run(&connector).await;
    });

    Ok((view, handle))
}
