//! パネル開示コントローラ
//!
//! モードと入力状況からどのパネルを表示するかを決め、ページへ命令的に反映する。
//! 表示/非表示は冪等なので、同じ命令を何度発行しても結果は変わらない。

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use crate::error::Result;
use crate::gate::KeyPairGate;
use crate::page::{Page, PageExt};
use crate::submission::CompletionQueue;
use crate::types::{FileInput, KeyKind, Mode, Panel, ReadinessFlags};

/// イベントハンドラ間で共有するコントローラ
pub type Shared<P> = Rc<RefCell<Controller<P>>>;

pub struct Controller<P: Page> {
    pub(crate) page: P,
    pub(crate) mode: Mode,
    pub(crate) gate: KeyPairGate,
    pub(crate) requests_sent: u64,
    /// 借用中に届いた完了通知（借用を持つ側が解放前に処理する）
    pub(crate) completions: CompletionQueue,
}

impl<P: Page> Controller<P> {
    pub fn new(page: P) -> Self {
        Self {
            page,
            mode: Mode::default(),
            gate: KeyPairGate::new(),
            requests_sent: 0,
            completions: CompletionQueue::default(),
        }
    }

    pub fn into_shared(self) -> Shared<P> {
        Rc::new(RefCell::new(self))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn gate(&self) -> &KeyPairGate {
        &self.gate
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// モードを選択する
    ///
    /// 現在と同じモードならボタンの強調とラベル類の更新のみで、入力済みの内容は消さない。
    /// 異なるモードなら依存パネルを隠し、テキストとデコード結果を空にし、鍵ラッチを戻す。
    pub fn set_mode(&mut self, new_mode: Mode) {
        if new_mode != self.mode {
            debug!("mode {} -> {}", self.mode, new_mode);
            for panel in Panel::MODE_DEPENDENT {
                self.page.hide(panel);
            }
            self.page.set_text("");
            self.page.set_decoded_output("");
            self.gate.reset();
        }

        self.mode = new_mode;
        self.page.highlight(new_mode);
        self.page.set_text_label(new_mode.text_label());
        self.page.set_text_key(new_mode.text_key());

        if !new_mode.is_encoding() {
            self.page.show(Panel::SelectPrvKey);
        }
        self.page.show(Panel::SelectKeys);
    }

    /// 画像が選択された
    pub fn on_file_selected(&mut self) {
        self.page.show(Panel::EnterText);
    }

    /// テキストが変更された（空白のみでも1文字以上なら送信可能）
    pub fn on_text_changed(&mut self, value: &str) {
        if value.is_empty() {
            self.page.hide(Panel::Action);
        } else {
            self.page.show(Panel::Action);
        }
    }

    /// 鍵ファイルが選択された。ラッチが開いたら画像選択を表示して `true` を返す
    pub fn on_key_selected(&mut self, kind: KeyKind) -> bool {
        let opened = self.gate.notify(kind, self.mode);
        if opened {
            debug!("key pair complete for {}, revealing image selection", self.mode);
            self.page.show(Panel::SelectImage);
        }
        opened
    }

    /// 現在の入力状況
    pub fn readiness(&self) -> ReadinessFlags {
        ReadinessFlags {
            has_file: self.page.file(FileInput::Image).is_some(),
            has_text: !self.page.text().is_empty(),
            pub_key_selected: self.page.file(FileInput::PublicKey).is_some(),
            priv_key_selected: self.page.file(FileInput::PrivateKey).is_some(),
        }
    }

    /// デコード結果をクリップボードへコピー
    pub fn copy_output(&mut self) -> Result<()> {
        let output = self.page.decoded_output();
        self.page.copy_to_clipboard(&output).inspect_err(|err| {
            warn!("failed to copy decoded output: {}", err);
        })
    }
}
