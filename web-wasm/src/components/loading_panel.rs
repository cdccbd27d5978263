//! 応答待ち表示

use imsteg_common::Panel;
use leptos::prelude::*;

#[component]
pub fn LoadingPanel() -> impl IntoView {
    view! {
        <div id={Panel::Loading.id()} class="panel">
            <div class="progress-container">
                <div class="progress-bar">
                    <div class="progress-fill indeterminate" />
                </div>
                <p class="progress-text">"Processing..."</p>
            </div>
        </div>
    }
}
