//! コンソール上のページ
//!
//! パネルの表示状態はブラウザと同じくclass属性の文字列で持つ。
//! ローディングパネルの表示中はスピナーを回し、デコード結果パネルが開いたら結果を出力する。

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clipboard::{ClipboardContext, ClipboardProvider};
use dialoguer::Input;
use imsteg_common::class_set::SHOW_TAG;
use imsteg_common::{ClassSet, Element, Error, FileInput, Mode, Page, Panel, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use crate::error::ImStegError;

pub struct ConsolePage {
    classes: HashMap<Element, String>,
    files: HashMap<FileInput, PathBuf>,
    text: String,
    text_key: String,
    text_label: String,
    decoded_output: String,
    /// 複製先（指定があればプロンプトを出さない）
    replicate_path: Option<String>,
    interactive: bool,
    spinner: Option<ProgressBar>,
    out: Box<dyn Write>,
}

impl ConsolePage {
    pub fn new() -> Self {
        Self::with_output(Box::new(std::io::stdout()))
    }

    /// 出力先を指定して作る（テスト用にバッファへ書ける）
    pub fn with_output(out: Box<dyn Write>) -> Self {
        let mut classes = HashMap::new();
        for panel in Panel::ALL {
            classes.insert(Element::Panel(panel), String::new());
        }
        for mode in [Mode::Encode, Mode::Decode] {
            classes.insert(Element::ModeButton(mode), String::new());
        }
        Self {
            classes,
            files: HashMap::new(),
            text: String::new(),
            text_key: Mode::default().text_key().to_string(),
            text_label: Mode::default().text_label().to_string(),
            decoded_output: String::new(),
            replicate_path: None,
            interactive: true,
            spinner: None,
            out,
        }
    }

    /// プロンプトを出さない（未指定の入力はキャンセル扱い）
    pub fn non_interactive(mut self) -> Self {
        self.interactive = false;
        self
    }

    pub fn with_replicate_path(mut self, path: Option<String>) -> Self {
        self.replicate_path = path;
        self
    }

    /// ファイル入力欄へファイルを設定する
    pub fn select_file(&mut self, input: FileInput, path: &Path) -> crate::error::Result<()> {
        if !path.is_file() {
            return Err(ImStegError::FileNotFound(path.display().to_string()));
        }
        self.files.insert(input, path.to_path_buf());
        Ok(())
    }

    pub fn text_label(&self) -> &str {
        &self.text_label
    }

    fn write_line(&mut self, line: &str) {
        // 端末への出力失敗は無視する
        let _ = writeln!(self.out, "{}", line);
    }

    fn start_spinner(&mut self) {
        if self.spinner.is_some() {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Processing...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// パネルの表示状態が変わったときの出力
    fn on_panel_changed(&mut self, panel: Panel, shown: bool) {
        debug!("{} {}", if shown { "show" } else { "hide" }, panel.id());
        match (panel, shown) {
            (Panel::Loading, true) => self.start_spinner(),
            (Panel::Loading, false) => self.stop_spinner(),
            (Panel::DecodedOutput, true) => {
                let output = self.decoded_output.clone();
                self.write_line(&output);
            }
            _ => {}
        }
    }
}

impl Default for ConsolePage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for ConsolePage {
    type File = PathBuf;

    fn class_name(&self, element: Element) -> Option<String> {
        self.classes.get(&element).cloned()
    }

    fn set_class_name(&mut self, element: Element, value: &str) {
        let was_shown = self
            .classes
            .get(&element)
            .map(|class_attr| ClassSet::parse(class_attr).has(SHOW_TAG))
            .unwrap_or(false);
        let shown = ClassSet::parse(value).has(SHOW_TAG);
        self.classes.insert(element, value.to_string());

        if let Element::Panel(panel) = element {
            if was_shown != shown {
                self.on_panel_changed(panel, shown);
            }
        }
    }

    fn file(&self, input: FileInput) -> Option<PathBuf> {
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

    fn scroll_to_bottom(&mut self) {}

    fn alert(&mut self, message: &str) {
        self.stop_spinner();
        self.write_line(message);
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        if let Some(path) = self.replicate_path.clone() {
            return Some(path);
        }
        if !self.interactive {
            return None;
        }
        Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .ok()
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        let mut context: ClipboardContext =
            ClipboardProvider::new().map_err(|e| Error::Clipboard(e.to_string()))?;
        context
            .set_contents(text.to_string())
            .map_err(|e| Error::Clipboard(e.to_string()))
    }
}
