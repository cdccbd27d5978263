//! フッター（複製送信）

use leptos::prelude::*;

#[component]
pub fn Footer<F>(on_replicate: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send,
{
    view! {
        <footer class="footer">
            <button class="btn btn-tertiary btn-small" on:click=move |_| on_replicate(())>
                "Replicate..."
            </button>
        </footer>
    }
}
