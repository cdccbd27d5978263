//! テスト用のメモリ上ページと送信手段

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::page::Page;
use crate::submission::{
    RawResponse, ReadyState, StateCallback, SubmitRequest, Transport, TransportFactory,
};
use crate::types::{Element, FileInput, Mode, Panel};

/// テスト用ファイルハンドル（ファイル名のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryFile(pub String);

/// ダイアログ表示中に実行する処理（イベントループが回り続けるブラウザの再現）
pub type DialogHook = Box<dyn FnOnce()>;

#[derive(Default)]
pub struct MemoryPage {
    classes: HashMap<Element, String>,
    files: HashMap<FileInput, MemoryFile>,
    pub text: String,
    pub text_key: String,
    pub text_label: String,
    pub decoded_output: String,
    pub scrolls: usize,
    pub alerts: Vec<String>,
    pub prompts: Vec<String>,
    pub prompt_reply: Option<String>,
    pub clipboard: Option<String>,
    pub clipboard_denied: bool,
    pub on_prompt: Option<DialogHook>,
    pub on_alert: Option<DialogHook>,
}

impl MemoryPage {
    /// 全パネルとモードボタンを持つページ
    pub fn new() -> Self {
        let mut classes = HashMap::new();
        for panel in Panel::ALL {
            classes.insert(Element::Panel(panel), "panel".to_string());
        }
        for mode in [Mode::Encode, Mode::Decode] {
            classes.insert(Element::ModeButton(mode), "btn".to_string());
        }
        Self {
            classes,
            ..Default::default()
        }
    }

    pub fn without(mut self, panel: Panel) -> Self {
        self.classes.remove(&Element::Panel(panel));
        self
    }

    pub fn class_of(&self, element: Element) -> Option<String> {
        self.classes.get(&element).cloned()
    }

    pub fn select_file(&mut self, input: FileInput, name: &str) {
        self.files.insert(input, MemoryFile(name.to_string()));
    }

    /// 表示中パネルの一覧（`Panel::ALL` の順）
    pub fn shown_panels(&self) -> Vec<Panel> {
        use crate::page::PageExt;
        Panel::ALL
            .into_iter()
            .filter(|panel| self.is_shown(*panel))
            .collect()
    }
}

impl Page for MemoryPage {
    type File = MemoryFile;

    fn class_name(&self, element: Element) -> Option<String> {
        self.classes.get(&element).cloned()
    }

    fn set_class_name(&mut self, element: Element, value: &str) {
        self.classes.insert(element, value.to_string());
    }

    fn file(&self, input: FileInput) -> Option<MemoryFile> {
        self.files.get(&input).cloned()
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, value: &str) {
        self.text = value.to_string();
    }

    fn text_key(&self) -> String {
        self.text_key.clone()
    }

    fn set_text_key(&mut self, key: &str) {
        self.text_key = key.to_string();
    }

    fn set_text_label(&mut self, label: &str) {
        self.text_label = label.to_string();
    }

    fn decoded_output(&self) -> String {
        self.decoded_output.clone()
    }

    fn set_decoded_output(&mut self, value: &str) {
        self.decoded_output = value.to_string();
    }

    fn scroll_to_bottom(&mut self) {
        self.scrolls += 1;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
        if let Some(hook) = self.on_alert.take() {
            hook();
        }
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        self.prompts.push(message.to_string());
        if let Some(hook) = self.on_prompt.take() {
            hook();
        }
        self.prompt_reply.clone()
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        if self.clipboard_denied {
            return Err(Error::Clipboard("permission denied".to_string()));
        }
        self.clipboard = Some(text.to_string());
        Ok(())
    }
}

/// 送信済みリクエストと、その完了通知
pub struct Sent {
    pub request: SubmitRequest<MemoryFile>,
    on_state: StateCallback,
}

impl Sent {
    pub fn loading(&mut self) {
        (self.on_state)(ReadyState::Loading);
    }

    pub fn complete(&mut self, status: u16, body: &str) {
        (self.on_state)(ReadyState::Done(RawResponse {
            status,
            body: body.to_string(),
        }));
    }
}

pub type Outbox = Rc<RefCell<Vec<Sent>>>;

/// 完了をテスト側から後で発火させる送信手段
pub struct ScriptedTransport {
    outbox: Outbox,
}

impl Transport<MemoryFile> for ScriptedTransport {
    fn send(
        self: Box<Self>,
        request: SubmitRequest<MemoryFile>,
        on_state: StateCallback,
    ) -> Result<()> {
        self.outbox.borrow_mut().push(Sent { request, on_state });
        Ok(())
    }
}

/// `send` 自体が失敗する送信手段
pub struct BrokenTransport;

impl Transport<MemoryFile> for BrokenTransport {
    fn send(self: Box<Self>, _: SubmitRequest<MemoryFile>, _: StateCallback) -> Result<()> {
        Err(Error::Transport("open failed".to_string()))
    }
}

pub enum FactoryBehavior {
    Scripted(Outbox),
    Broken,
    Unavailable,
}

pub struct TestFactory {
    pub name: &'static str,
    pub behavior: FactoryBehavior,
    pub attempts: Rc<RefCell<Vec<&'static str>>>,
}

impl TransportFactory<MemoryFile> for TestFactory {
    fn name(&self) -> &str {
        self.name
    }

    fn create(&self) -> Result<Box<dyn Transport<MemoryFile>>> {
        self.attempts.borrow_mut().push(self.name);
        match &self.behavior {
            FactoryBehavior::Scripted(outbox) => Ok(Box::new(ScriptedTransport {
                outbox: Rc::clone(outbox),
            })),
            FactoryBehavior::Broken => Ok(Box::new(BrokenTransport)),
            FactoryBehavior::Unavailable => {
                Err(Error::Transport(format!("{} is not defined", self.name)))
            }
        }
    }
}
