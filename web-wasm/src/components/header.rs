//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"ImSteg"</h1>
            <p class="text-muted">"Hide encrypted text inside an image, or reveal it again."</p>
        </header>
    }
}
