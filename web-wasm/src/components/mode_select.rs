//! モード選択ボタン

use imsteg_common::Mode;
use leptos::prelude::*;

#[component]
pub fn ModeSelect<F>(on_select: F) -> impl IntoView
where
    F: Fn(Mode) + 'static + Clone + Send,
{
    view! {
        <div class="mode-select">
            <button
                class="btn"
                on:click={
                    let on_select = on_select.clone();
                    move |_| on_select(Mode::Encode)
                }
            >
                "Encode"
            </button>
            <button
                class="btn"
                on:click={
                    let on_select = on_select.clone();
                    move |_| on_select(Mode::Decode)
                }
            >
                "Decode"
            </button>
        </div>
    }
}
