//! メインアプリケーションコンポーネント
//!
//! 各イベントはスレッドローカルのコントローラへ渡す。
//! コントローラは最初のイベントで生成する（その時点でマークアップは描画済み）。

use std::cell::RefCell;

use imsteg_common::{submit, Controller, KeyKind, Mode, Shared, TransportChain};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

use crate::components::{
    action_panel::ActionPanel,
    decoded_output::DecodedOutput,
    footer::Footer,
    header::Header,
    image_select::ImageSelect,
    key_select::KeySelect,
    loading_panel::LoadingPanel,
    mode_select::ModeSelect,
    text_entry::TextEntry,
};
use crate::dom::DomPage;
use crate::transport::browser_chain;

thread_local! {
    static CONTROLLER: RefCell<Option<Shared<DomPage>>> = const { RefCell::new(None) };
    static TRANSPORTS: TransportChain<File> = browser_chain();
}

fn controller() -> Shared<DomPage> {
    CONTROLLER.with(|cell| {
        cell.borrow_mut()
            .get_or_insert_with(|| Controller::new(DomPage::new()).into_shared())
            .clone()
    })
}

pub fn select_mode(mode: Mode) {
    controller().borrow_mut().set_mode(mode);
}

pub fn key_selected(kind: KeyKind) {
    controller().borrow_mut().on_key_selected(kind);
}

pub fn file_selected() {
    controller().borrow_mut().on_file_selected();
}

pub fn text_updated(value: &str) {
    controller().borrow_mut().on_text_changed(value);
}

pub fn copy_output() {
    // 失敗はコントローラ側でログ済み
    let _ = controller().borrow_mut().copy_output();
}

/// 送信して、完了をログに残す
pub fn send(replicating: bool) {
    let controller = controller();
    let result = TRANSPORTS.with(|chain| submit(&controller, chain, replicating));

    match result {
        Ok(pending) => spawn_local(async move {
            let id = pending.id();
            match pending.wait().await {
                Some(outcome) => log::info!("request #{} settled: {:?}", id, outcome),
                None => log::warn!("request #{} was dropped before completing", id),
            }
        }),
        Err(err) => log::warn!("submission aborted: {}", err),
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    view! {
        <div class="container">
            <Header />

            // モードボタンはページ内の先頭2つの <button> であること
            <ModeSelect on_select=select_mode />

            <KeySelect on_key_selected=key_selected />

            <ImageSelect on_file_selected=move |_| file_selected() />

            <TextEntry on_text_changed=move |value: String| text_updated(&value) />

            <ActionPanel on_submit=move |_| send(false) />

            <LoadingPanel />

            <DecodedOutput on_copy=move |_| copy_output() />

            <Footer on_replicate=move |_| send(true) />
        </div>
    }
}
