//! シークレット/パスフレーズ入力パネル
//!
//! ラベルと送信フィールド名（`key` 属性）はモード選択時にコントローラが書き換える。

use imsteg_common::{Mode, Panel};
use leptos::prelude::*;

use crate::dom::{TEXT_ID, TEXT_LABEL_ID};

#[component]
pub fn TextEntry<F>(on_text_changed: F) -> impl IntoView
where
    F: Fn(String) + 'static + Clone + Send,
{
    view! {
        <div id={Panel::EnterText.id()} class="panel">
            <label id={TEXT_LABEL_ID} for={TEXT_ID}>{Mode::default().text_label()}</label>
            <input
                type="text"
                id={TEXT_ID}
                autocomplete="off"
                on:input=move |ev| on_text_changed(event_target_value(&ev))
            />
        </div>
    }
}
