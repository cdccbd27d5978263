//! ページ（DOM）との境界
//!
//! コントローラはフィールド値を自前で保持せず、常にこのトレイト経由で読み書きする。
//! ブラウザ版は実DOM、CLI版はコンソール、テストはメモリ上の実装を使う。

use crate::class_set::{add_tag, has_tag, remove_tag, DISABLED_TAG, HIGHLIGHT_TAG, SHOW_TAG};
use crate::error::Result;
use crate::types::{Element, FileInput, Mode, Panel};

pub trait Page {
    /// ファイル入力欄から取得できるファイルハンドル
    type File: Clone;

    /// 要素のclass属性（要素が無ければ `None`）
    fn class_name(&self, element: Element) -> Option<String>;
    fn set_class_name(&mut self, element: Element, value: &str);

    /// ファイル入力欄の先頭ファイル
    fn file(&self, input: FileInput) -> Option<Self::File>;

    /// テキスト入力欄（シークレット/パスフレーズ）
    fn text(&self) -> String;
    fn set_text(&mut self, value: &str);
    /// テキスト入力欄の `key` 属性（送信時のフィールド名）
    fn text_key(&self) -> String;
    fn set_text_key(&mut self, key: &str);
    fn set_text_label(&mut self, label: &str);

    fn decoded_output(&self) -> String;
    fn set_decoded_output(&mut self, value: &str);

    fn scroll_to_bottom(&mut self);

    /// ブロッキングな通知
    fn alert(&mut self, message: &str);
    /// ブロッキングな文字列入力（キャンセル時 `None`）
    fn prompt(&mut self, message: &str) -> Option<String>;

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()>;
}

/// タグ操作の糖衣
pub trait PageExt: Page {
    fn show(&mut self, panel: Panel) {
        add_tag(self, Element::Panel(panel), SHOW_TAG);
    }

    fn hide(&mut self, panel: Panel) {
        remove_tag(self, Element::Panel(panel), SHOW_TAG);
    }

    fn is_shown(&self, panel: Panel) -> bool {
        has_tag(self, Element::Panel(panel), SHOW_TAG)
    }

    fn highlight(&mut self, mode: Mode) {
        add_tag(self, Element::ModeButton(mode), HIGHLIGHT_TAG);
        remove_tag(self, Element::ModeButton(mode.other()), HIGHLIGHT_TAG);
    }

    fn is_highlighted(&self, mode: Mode) -> bool {
        has_tag(self, Element::ModeButton(mode), HIGHLIGHT_TAG)
    }

    /// 両方のモードボタンを有効/無効にする
    fn set_mode_buttons_enabled(&mut self, enabled: bool) {
        for mode in [Mode::Encode, Mode::Decode] {
            if enabled {
                remove_tag(self, Element::ModeButton(mode), DISABLED_TAG);
            } else {
                add_tag(self, Element::ModeButton(mode), DISABLED_TAG);
            }
        }
    }

    fn is_mode_button_enabled(&self, mode: Mode) -> bool {
        !has_tag(self, Element::ModeButton(mode), DISABLED_TAG)
    }
}

impl<P: Page + ?Sized> PageExt for P {}
