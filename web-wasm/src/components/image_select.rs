//! 画像選択パネル

use imsteg_common::{FileInput, Panel};
use leptos::prelude::*;

#[component]
pub fn ImageSelect<F>(on_file_selected: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send,
{
    view! {
        <div id={Panel::SelectImage.id()} class="panel">
            <label for={FileInput::Image.id()}>"Select an image."</label>
            <input
                type="file"
                id={FileInput::Image.id()}
                accept="image/png, image/jpeg"
                on:change=move |_| on_file_selected(())
            />
            <p class="text-muted">"Supported formats: JPEG, PNG"</p>
        </div>
    }
}
