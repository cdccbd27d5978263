//! 送信ボタン

use imsteg_common::Panel;
use leptos::prelude::*;

#[component]
pub fn ActionPanel<F>(on_submit: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send,
{
    view! {
        <div id={Panel::Action.id()} class="panel">
            <button class="btn btn-primary" on:click=move |_| on_submit(())>
                "Submit"
            </button>
        </div>
    }
}
