//! Letterwheel - main entry point
//!
//! Runs in the browser (`web`) or as a desktop window (`desktop`).

#![allow(non_snake_case)]

use letterwheel_client::{logging, ui::App};

fn main() {
    logging::init();
    dioxus::launch(App);
}
