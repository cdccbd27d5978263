//! 実DOM上のページ
//!
//! 要素はidで毎回引き直すので、状態は持たない。
//! モードボタンはページ内の `<button>` の並び順（0: エンコード, 1: デコード）で特定する。

use imsteg_common::class_set::DISABLED_TAG;
use imsteg_common::{ClassSet, Element, Error, FileInput, Mode, Page, Result};
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlButtonElement, HtmlDocument, HtmlInputElement, HtmlTextAreaElement};

pub const TEXT_ID: &str = "text";
pub const TEXT_LABEL_ID: &str = "enter-text-label";
pub const DECODED_OUTPUT_TEXT_ID: &str = "decoded-output-text";
/// テキスト入力欄の送信フィールド名を持つ属性
pub const TEXT_KEY_ATTR: &str = "key";

#[derive(Debug, Default, Clone, Copy)]
pub struct DomPage;

impl DomPage {
    pub fn new() -> Self {
        Self
    }

    fn element(&self, element: Element) -> Option<web_sys::Element> {
        let document = gloo::utils::document();
        match element {
            Element::Panel(panel) => document.get_element_by_id(panel.id()),
            Element::ModeButton(mode) => document
                .get_elements_by_tag_name("button")
                .item(mode.button_index() as u32),
        }
    }

    fn by_id(&self, id: &str) -> Option<web_sys::Element> {
        gloo::utils::document().get_element_by_id(id)
    }
}

/// input/textarea の値を読む
fn value_of(element: &web_sys::Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn set_value_of(element: &web_sys::Element, value: &str) {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

fn js_error(context: &str, err: wasm_bindgen::JsValue) -> Error {
    Error::Clipboard(format!("{}: {:?}", context, err))
}

impl Page for DomPage {
    type File = File;

    fn class_name(&self, element: Element) -> Option<String> {
        self.element(element).map(|e| e.class_name())
    }

    fn set_class_name(&mut self, element: Element, value: &str) {
        let Some(target) = self.element(element) else {
            return;
        };
        target.set_class_name(value);

        // タグだけではクリックを止められないのでボタンの disabled も合わせる
        if let Element::ModeButton(_) = element {
            if let Some(button) = target.dyn_ref::<HtmlButtonElement>() {
                button.set_disabled(ClassSet::parse(value).has(DISABLED_TAG));
            }
        }
    }

    fn file(&self, input: FileInput) -> Option<File> {
        self.by_id(input.id())?
            .dyn_into::<HtmlInputElement>()
            .ok()?
            .files()?
            .get(0)
    }

    fn text(&self) -> String {
        self.by_id(TEXT_ID).map(|e| value_of(&e)).unwrap_or_default()
    }

    fn set_text(&mut self, value: &str) {
        if let Some(e) = self.by_id(TEXT_ID) {
            set_value_of(&e, value);
        }
    }

    fn text_key(&self) -> String {
        self.by_id(TEXT_ID)
            .and_then(|e| e.get_attribute(TEXT_KEY_ATTR))
            .unwrap_or_else(|| Mode::default().text_key().to_string())
    }

    fn set_text_key(&mut self, key: &str) {
        if let Some(e) = self.by_id(TEXT_ID) {
            let _ = e.set_attribute(TEXT_KEY_ATTR, key);
        }
    }

    fn set_text_label(&mut self, label: &str) {
        if let Some(e) = self.by_id(TEXT_LABEL_ID) {
            e.set_text_content(Some(label));
        }
    }

    fn decoded_output(&self) -> String {
        self.by_id(DECODED_OUTPUT_TEXT_ID)
            .map(|e| value_of(&e))
            .unwrap_or_default()
    }

    fn set_decoded_output(&mut self, value: &str) {
        if let Some(e) = self.by_id(DECODED_OUTPUT_TEXT_ID) {
            set_value_of(&e, value);
        }
    }

    fn scroll_to_bottom(&mut self) {
        let height = gloo::utils::body().scroll_height();
        gloo::utils::window().scroll_to_with_x_and_y(0.0, f64::from(height));
    }

    fn alert(&mut self, message: &str) {
        gloo::dialogs::alert(message);
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        gloo::dialogs::prompt(message, None)
    }

    /// 無効化された出力欄を一時的に有効にして選択し、copyコマンドを実行する
    fn copy_to_clipboard(&mut self, _text: &str) -> Result<()> {
        let output = self
            .by_id(DECODED_OUTPUT_TEXT_ID)
            .and_then(|e| e.dyn_into::<HtmlTextAreaElement>().ok())
            .ok_or_else(|| Error::Clipboard("decoded output field not found".to_string()))?;

        output.set_disabled(false);
        output.select();
        let length = output.value().encode_utf16().count() as u32;
        let _ = output.set_selection_range(0, length);

        let copied = gloo::utils::document()
            .dyn_into::<HtmlDocument>()
            .map_err(|e| js_error("document is not an HTML document", e.into()))
            .and_then(|doc| {
                doc.exec_command("copy")
                    .map_err(|e| js_error("copy command failed", e))
            });
        output.set_disabled(true);

        match copied? {
            true => Ok(()),
            false => Err(Error::Clipboard("copy command was rejected".to_string())),
        }
    }
}
