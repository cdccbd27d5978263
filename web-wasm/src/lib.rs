//! ImSteg Web App (Leptos + WASM)

mod app;
mod components;
pub mod dom;
pub mod logger;
pub mod transport;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
    leptos::mount::mount_to_body(app::App);
}

/// 複製送信（ページ側のスクリプトから呼び出す）
#[wasm_bindgen(js_name = "doReplicate")]
pub fn do_replicate() {
    app::send(true);
}
