//! 鍵ファイル選択パネル

use imsteg_common::{FileInput, KeyKind, Panel};
use leptos::prelude::*;

#[component]
pub fn KeySelect<F>(on_key_selected: F) -> impl IntoView
where
    F: Fn(KeyKind) + 'static + Clone + Send,
{
    view! {
        <div id={Panel::SelectKeys.id()} class="panel">
            <label for={FileInput::PublicKey.id()} id="select-keys-text">
                "Select the public key."
            </label>
            <input
                type="file"
                id={FileInput::PublicKey.id()}
                on:change={
                    let on_key_selected = on_key_selected.clone();
                    move |_| on_key_selected(KeyKind::Public)
                }
            />
        </div>

        <div id={Panel::SelectPrvKey.id()} class="panel">
            <label for={FileInput::PrivateKey.id()}>"Select your private key."</label>
            <input
                type="file"
                id={FileInput::PrivateKey.id()}
                on:change={
                    let on_key_selected = on_key_selected.clone();
                    move |_| on_key_selected(KeyKind::Private)
                }
            />
        </div>
    }
}
