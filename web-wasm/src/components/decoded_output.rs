//! デコード結果パネル

use imsteg_common::Panel;
use leptos::prelude::*;

use crate::dom::DECODED_OUTPUT_TEXT_ID;

#[component]
pub fn DecodedOutput<F>(on_copy: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send,
{
    view! {
        <div id={Panel::DecodedOutput.id()} class="panel">
            <label for={DECODED_OUTPUT_TEXT_ID}>"Decoded message"</label>
            <textarea id={DECODED_OUTPUT_TEXT_ID} rows="6" disabled=true />
            <button class="btn btn-secondary btn-small" on:click=move |_| on_copy(())>
                "Copy"
            </button>
        </div>
    }
}
