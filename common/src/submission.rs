//! 送信ライフサイクル
//!
//! 1. ページからFormSnapshotを取得し、マルチパートのペイロードを組み立てる
//! 2. 送信手段を優先順に試して取得する（全滅なら何もせず失敗）
//! 3. 複製以外はモードボタンを無効化する
//! 4. `POST /submit` を発行し、ローディングを表示する
//! 5. 完了通知で結果をページへ反映し、モードボタンを戻す
//!
//! 複製（replicate）送信は二重送信を防がない。ボタンを無効化しないため、
//! 応答待ちの間にもう一度送信できる。

use futures::channel::oneshot;
use log::{debug, error, info, warn};
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::disclosure::{Controller, Shared};
use crate::error::{Error, Result};
use crate::page::{Page, PageExt};
use crate::types::{FileInput, Mode, Panel};

/// 送信先
pub const SUBMIT_PATH: &str = "/submit";
/// 成功とみなすHTTPステータス
pub const SUCCESS_STATUS: u16 = 200;
/// 複製先を尋ねるプロンプト
pub const REPLICATE_PROMPT: &str =
    "Please enter the complete path to where you'd like to replicate.";

/// マルチパートの値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<F> {
    Text(String),
    File(F),
}

impl<F> FieldValue<F> {
    fn file_or_empty(file: Option<F>) -> Self {
        match file {
            Some(file) => FieldValue::File(file),
            None => FieldValue::Text(String::new()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::File(_) => None,
        }
    }
}

/// 送信順を保ったマルチパートのフィールド列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload<F> {
    fields: Vec<(String, FieldValue<F>)>,
}

impl<F> Payload<F> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn push(&mut self, name: impl Into<String>, value: FieldValue<F>) {
        self.fields.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue<F>> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> &[(String, FieldValue<F>)] {
        &self.fields
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn into_fields(self) -> Vec<(String, FieldValue<F>)> {
        self.fields
    }
}

impl<F> Default for Payload<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// 送信時点の入力内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSnapshot<F> {
    /// 複製先パスのみ
    Replicate { path: String },
    Fields {
        mode: Mode,
        image: Option<F>,
        public_key: Option<F>,
        private_key: Option<F>,
        text_key: String,
        text: String,
    },
}

impl<F> FormSnapshot<F> {
    /// ページの現在値を取得する
    pub fn capture<P>(page: &P, mode: Mode) -> Self
    where
        P: Page<File = F> + ?Sized,
    {
        FormSnapshot::Fields {
            mode,
            image: page.file(FileInput::Image),
            public_key: page.file(FileInput::PublicKey),
            private_key: page.file(FileInput::PrivateKey),
            text_key: page.text_key(),
            text: page.text(),
        }
    }

    pub fn into_payload(self) -> Payload<F> {
        let mut payload = Payload::new();
        match self {
            FormSnapshot::Replicate { path } => {
                payload.push("replicatePath", FieldValue::Text(path));
            }
            FormSnapshot::Fields {
                mode,
                image,
                public_key,
                private_key,
                text_key,
                text,
            } => {
                payload.push("encode", FieldValue::Text(mode.is_encoding().to_string()));
                payload.push("image", FieldValue::file_or_empty(image));
                payload.push("pubkeyfile", FieldValue::file_or_empty(public_key));
                payload.push("prvkeyfile", FieldValue::file_or_empty(private_key));
                payload.push(text_key, FieldValue::Text(text));
            }
        }
        payload
    }
}

/// 送信リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest<F> {
    pub method: &'static str,
    pub path: &'static str,
    pub payload: Payload<F>,
}

impl<F> SubmitRequest<F> {
    pub fn post(payload: Payload<F>) -> Self {
        Self {
            method: "POST",
            path: SUBMIT_PATH,
            payload,
        }
    }
}

/// 応答（HTTPステータスと本文）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// 送信手段から届く状態通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadyState {
    /// 受信中（ログのみ）
    Loading,
    /// 完了（終端）
    Done(RawResponse),
}

pub type StateCallback = Box<dyn FnMut(ReadyState)>;

/// リクエストを送る手段
///
/// `send` は即座に戻り、完了は後から `on_state` へ通知すること。
pub trait Transport<F> {
    fn send(self: Box<Self>, request: SubmitRequest<F>, on_state: StateCallback) -> Result<()>;
}

/// 送信手段の生成器
pub trait TransportFactory<F> {
    fn name(&self) -> &str;
    fn create(&self) -> Result<Box<dyn Transport<F>>>;
}

/// 送信手段を優先順に試すフォールバック列
pub struct TransportChain<F> {
    factories: Vec<Box<dyn TransportFactory<F>>>,
}

impl<F> TransportChain<F> {
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    pub fn with(mut self, factory: impl TransportFactory<F> + 'static) -> Self {
        self.factories.push(Box::new(factory));
        self
    }

    /// 最初に生成できた送信手段を返す
    pub fn acquire(&self) -> Result<Box<dyn Transport<F>>> {
        let mut tried = Vec::new();
        for factory in &self.factories {
            match factory.create() {
                Ok(transport) => {
                    debug!("using {} transport", factory.name());
                    return Ok(transport);
                }
                Err(err) => {
                    debug!("{} transport unavailable: {}", factory.name(), err);
                    tried.push(factory.name().to_string());
                }
            }
        }
        Err(Error::TransportUnavailable(tried.join(", ")))
    }
}

impl<F> Default for TransportChain<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// 送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// エンコード成功（メッセージを通知済み）
    Acknowledged(String),
    /// デコード成功（結果欄へ表示済み）
    Decoded(String),
    /// デコードモードでの複製成功（表示なし）
    Replicated,
    /// 成功以外のステータス
    Rejected { status: u16, message: String },
    /// 本文を解釈できなかった
    Malformed(String),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            SubmitOutcome::Acknowledged(_) | SubmitOutcome::Decoded(_) | SubmitOutcome::Replicated
        )
    }
}

/// 応答待ちのリクエスト
///
/// 完了時に一度だけ結果が届く。キャンセルは未対応。
#[derive(Debug)]
pub struct PendingRequest {
    id: u64,
    replicating: bool,
    outcome: oneshot::Receiver<SubmitOutcome>,
}

impl PendingRequest {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_replicating(&self) -> bool {
        self.replicating
    }

    /// 完了を待つ。送信手段が完了を通知せずに破棄された場合は `None`
    pub async fn wait(self) -> Option<SubmitOutcome> {
        self.outcome.await.ok()
    }
}

#[derive(Deserialize)]
struct ResponseBody {
    message: String,
}

/// 応答本文から `message` を取り出す
pub fn parse_message(body: &str) -> Result<String> {
    let parsed: ResponseBody = serde_json::from_str(body)?;
    Ok(parsed.message)
}

/// コントローラの借用中に届いた完了通知
pub(crate) struct DeferredCompletion {
    id: u64,
    replicating: bool,
    response: RawResponse,
    sender: oneshot::Sender<SubmitOutcome>,
}

/// 完了通知の待ち行列
///
/// プロンプトやアラートの表示中もイベントを配送するブラウザでは、
/// コントローラの借用中に完了通知が届くことがある。その場合はここに積み、
/// 借用している側が解放前に `settle_completions` で処理する。
pub(crate) type CompletionQueue = Rc<RefCell<VecDeque<DeferredCompletion>>>;

/// 現在の入力内容を送信する
///
/// `replicating` のときは複製先をプロンプトで尋ね、そのパスだけを送る。
pub fn submit<P>(
    controller: &Shared<P>,
    transports: &TransportChain<P::File>,
    replicating: bool,
) -> Result<PendingRequest>
where
    P: Page + 'static,
{
    let (request, transport, id, completions) = {
        let mut this = controller.borrow_mut();

        let snapshot = if replicating {
            let path = this.page.prompt(REPLICATE_PROMPT).unwrap_or_default();
            // プロンプト表示中に完了した先行リクエストを反映する
            this.settle_completions();
            FormSnapshot::Replicate { path }
        } else {
            FormSnapshot::capture(&this.page, this.mode)
        };
        let request = SubmitRequest::post(snapshot.into_payload());

        let transport = transports.acquire().inspect_err(|err| {
            warn!("cannot submit: {}", err);
        })?;

        if !replicating {
            this.page.set_mode_buttons_enabled(false);
        }

        this.requests_sent += 1;
        let completions = Rc::clone(&this.completions);
        (request, transport, this.requests_sent, completions)
    };

    info!(
        "request #{} {} {} [{}]",
        id,
        request.method,
        request.path,
        request.payload.names().join(", ")
    );

    let (sender, outcome) = oneshot::channel();
    let on_state = completion_handler(Rc::clone(controller), completions, id, replicating, sender);

    if let Err(err) = transport.send(request, on_state) {
        error!("request #{} could not be sent: {}", id, err);
        if !replicating {
            controller.borrow_mut().page.set_mode_buttons_enabled(true);
        }
        return Err(err);
    }

    controller.borrow_mut().page.show(Panel::Loading);

    Ok(PendingRequest {
        id,
        replicating,
        outcome,
    })
}

fn completion_handler<P>(
    controller: Shared<P>,
    completions: CompletionQueue,
    id: u64,
    replicating: bool,
    sender: oneshot::Sender<SubmitOutcome>,
) -> StateCallback
where
    P: Page + 'static,
{
    let mut sender = Some(sender);
    Box::new(move |state| match state {
        ReadyState::Loading => debug!("request #{}: loading...", id),
        ReadyState::Done(response) => {
            let Some(sender) = sender.take() else {
                debug!("request #{}: ignoring repeated completion", id);
                return;
            };
            completions.borrow_mut().push_back(DeferredCompletion {
                id,
                replicating,
                response,
                sender,
            });
            match controller.try_borrow_mut() {
                Ok(mut this) => this.settle_completions(),
                Err(_) => debug!("request #{}: controller busy, completion deferred", id),
            }
        }
    })
}

impl<P: Page> Controller<P> {
    /// 待ち行列に積まれた完了通知を届いた順に反映する
    ///
    /// 反映中のアラートで新たに積まれた分もここで処理する。
    pub(crate) fn settle_completions(&mut self) {
        loop {
            let next = self.completions.borrow_mut().pop_front();
            let Some(done) = next else {
                break;
            };
            let outcome = self.finish_submission(done.id, done.replicating, done.response);
            // 待ち手がいなくても問題ない
            let _ = done.sender.send(outcome);
        }
    }

    /// 完了した応答をページへ反映する
    pub(crate) fn finish_submission(
        &mut self,
        id: u64,
        replicating: bool,
        response: RawResponse,
    ) -> SubmitOutcome {
        self.page.hide(Panel::Loading);

        let outcome = match parse_message(&response.body) {
            Ok(message) if response.status == SUCCESS_STATUS => {
                info!("request #{} done ({})", id, response.status);
                if self.mode.is_encoding() {
                    self.page.alert(&message);
                    SubmitOutcome::Acknowledged(message)
                } else if !replicating {
                    self.page.set_decoded_output(&message);
                    self.page.show(Panel::DecodedOutput);
                    self.page.scroll_to_bottom();
                    SubmitOutcome::Decoded(message)
                } else {
                    SubmitOutcome::Replicated
                }
            }
            Ok(message) => {
                warn!("request #{} failed ({}): {}", id, response.status, message);
                self.page.alert(&format!("Error: {}", message));
                SubmitOutcome::Rejected {
                    status: response.status,
                    message,
                }
            }
            Err(err) => {
                error!(
                    "request #{} returned an unreadable body ({}): {}",
                    id, response.status, err
                );
                self.page.alert(&format!("Error: {}", err));
                SubmitOutcome::Malformed(err.to_string())
            }
        };

        if !replicating {
            self.page.set_mode_buttons_enabled(true);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FactoryBehavior, MemoryFile, MemoryPage, Outbox, TestFactory};
    use crate::types::KeyKind;
    use futures::executor::block_on;
    use std::cell::RefCell;

    struct Harness {
        controller: Shared<MemoryPage>,
        chain: TransportChain<MemoryFile>,
        outbox: Outbox,
        attempts: Rc<RefCell<Vec<&'static str>>>,
    }

    fn harness() -> Harness {
        harness_with(vec![("XMLHttpRequest", true)])
    }

    /// (名前, 生成可否) の列から送信手段を組み立てる
    fn harness_with(factories: Vec<(&'static str, bool)>) -> Harness {
        let outbox: Outbox = Rc::new(RefCell::new(Vec::new()));
        let attempts = Rc::new(RefCell::new(Vec::new()));
        let mut chain = TransportChain::new();
        for (name, available) in factories {
            let behavior = if available {
                FactoryBehavior::Scripted(Rc::clone(&outbox))
            } else {
                FactoryBehavior::Unavailable
            };
            chain = chain.with(TestFactory {
                name,
                behavior,
                attempts: Rc::clone(&attempts),
            });
        }
        Harness {
            controller: Controller::new(MemoryPage::new()).into_shared(),
            chain,
            outbox,
            attempts,
        }
    }

    impl Harness {
        fn page(&self) -> std::cell::Ref<'_, MemoryPage> {
            std::cell::Ref::map(self.controller.borrow(), |c| c.page())
        }

        fn fill_encode(&self, text: &str) {
            let mut c = self.controller.borrow_mut();
            c.set_mode(Mode::Encode);
            c.page_mut().select_file(FileInput::PublicKey, "receiver.asc");
            c.on_key_selected(KeyKind::Public);
            c.page_mut().select_file(FileInput::Image, "cat.png");
            c.on_file_selected();
            c.page_mut().set_text(text);
            c.on_text_changed(text);
        }

        fn fill_decode(&self, passphrase: &str) {
            let mut c = self.controller.borrow_mut();
            c.set_mode(Mode::Decode);
            c.page_mut().select_file(FileInput::PublicKey, "sender.asc");
            c.on_key_selected(KeyKind::Public);
            c.page_mut().select_file(FileInput::PrivateKey, "me.asc");
            c.on_key_selected(KeyKind::Private);
            c.page_mut().select_file(FileInput::Image, "cat_encoded.png");
            c.on_file_selected();
            c.page_mut().set_text(passphrase);
            c.on_text_changed(passphrase);
        }

        fn complete(&self, index: usize, status: u16, body: &str) {
            // 完了ハンドラがコントローラを借用するので、outboxの借用は先に外す
            let mut sent = self.outbox.borrow_mut().remove(index);
            sent.loading();
            sent.complete(status, body);
        }
    }

    fn file(name: &str) -> FieldValue<MemoryFile> {
        FieldValue::File(MemoryFile(name.to_string()))
    }

    fn text(value: &str) -> FieldValue<MemoryFile> {
        FieldValue::Text(value.to_string())
    }

    #[test]
    fn test_encode_scenario_payload() {
        let h = harness();
        h.fill_encode("hello");
        assert!(h.page().is_shown(Panel::Action));

        submit(&h.controller, &h.chain, false).unwrap();

        let outbox = h.outbox.borrow();
        let request = &outbox[0].request;
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/submit");
        assert_eq!(
            request.payload.fields(),
            &[
                ("encode".to_string(), text("true")),
                ("image".to_string(), file("cat.png")),
                ("pubkeyfile".to_string(), file("receiver.asc")),
                ("prvkeyfile".to_string(), text("")),
                ("secretText".to_string(), text("hello")),
            ]
        );
    }

    #[test]
    fn test_decode_payload_uses_passphrase_key() {
        let h = harness();
        h.fill_decode("hunter2");

        submit(&h.controller, &h.chain, false).unwrap();

        let outbox = h.outbox.borrow();
        let payload = &outbox[0].request.payload;
        assert_eq!(payload.get("encode"), Some(&text("false")));
        assert_eq!(payload.get("prvkeyfile"), Some(&file("me.asc")));
        assert_eq!(payload.get("passphrase"), Some(&text("hunter2")));
        assert_eq!(payload.get("secretText"), None);
    }

    #[test]
    fn test_pending_state_while_in_flight() {
        let h = harness();
        h.fill_encode("hello");

        submit(&h.controller, &h.chain, false).unwrap();

        let page = h.page();
        assert!(page.is_shown(Panel::Loading));
        assert!(!page.is_mode_button_enabled(Mode::Encode));
        assert!(!page.is_mode_button_enabled(Mode::Decode));
        assert!(page.alerts.is_empty());
    }

    #[test]
    fn test_encode_success_alerts_message() {
        let h = harness();
        h.fill_encode("hello");
        let pending = submit(&h.controller, &h.chain, false).unwrap();

        h.complete(0, 200, r#"{"message": "File saved to: ./submissions/cat_encoded.png"}"#);

        let page = h.page();
        assert_eq!(page.alerts, vec!["File saved to: ./submissions/cat_encoded.png"]);
        assert!(!page.is_shown(Panel::Loading));
        assert!(!page.is_shown(Panel::DecodedOutput));
        assert!(page.is_mode_button_enabled(Mode::Encode));
        drop(page);

        assert_eq!(
            block_on(pending.wait()),
            Some(SubmitOutcome::Acknowledged(
                "File saved to: ./submissions/cat_encoded.png".to_string()
            ))
        );
    }

    #[test]
    fn test_decode_success_reveals_output() {
        let h = harness();
        h.fill_decode("hunter2");
        let pending = submit(&h.controller, &h.chain, false).unwrap();

        h.complete(0, 200, r#"{"status": 200, "message": "secret"}"#);

        let page = h.page();
        assert_eq!(page.decoded_output, "secret");
        assert!(page.is_shown(Panel::DecodedOutput));
        assert_eq!(page.scrolls, 1);
        assert!(page.alerts.is_empty());
        assert!(page.is_mode_button_enabled(Mode::Decode));
        drop(page);

        assert_eq!(
            block_on(pending.wait()),
            Some(SubmitOutcome::Decoded("secret".to_string()))
        );
    }

    #[test]
    fn test_error_status_surfaces_message() {
        let h = harness();
        h.fill_decode("wrong");
        let before: Vec<Panel> = h.page().shown_panels();
        let pending = submit(&h.controller, &h.chain, false).unwrap();

        h.complete(0, 500, r#"{"status": 500, "message": "bad key"}"#);

        let page = h.page();
        assert_eq!(page.alerts, vec!["Error: bad key"]);
        assert_eq!(page.shown_panels(), before);
        assert_eq!(page.decoded_output, "");
        assert!(page.is_mode_button_enabled(Mode::Encode));
        assert!(page.is_mode_button_enabled(Mode::Decode));
        drop(page);

        let outcome = block_on(pending.wait()).unwrap();
        assert!(!outcome.is_success());
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                status: 500,
                message: "bad key".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_body_is_reported() {
        let h = harness();
        h.fill_decode("hunter2");
        let pending = submit(&h.controller, &h.chain, false).unwrap();

        h.complete(0, 502, "<html>Bad Gateway</html>");

        let page = h.page();
        assert_eq!(page.alerts.len(), 1);
        assert!(page.alerts[0].starts_with("Error: "));
        assert!(!page.is_shown(Panel::Loading));
        assert!(page.is_mode_button_enabled(Mode::Decode));
        drop(page);

        assert!(matches!(
            block_on(pending.wait()),
            Some(SubmitOutcome::Malformed(_))
        ));
    }

    #[test]
    fn test_repeated_completion_is_ignored() {
        let h = harness();
        h.fill_encode("hello");
        submit(&h.controller, &h.chain, false).unwrap();

        let mut sent = h.outbox.borrow_mut().remove(0);
        sent.complete(200, r#"{"message": "ok"}"#);
        sent.complete(200, r#"{"message": "ok"}"#);

        assert_eq!(h.page().alerts, vec!["ok"]);
    }

    #[test]
    fn test_transport_fallback_order() {
        let h = harness_with(vec![
            ("XMLHttpRequest", false),
            ("Msxml2.XMLHTTP", true),
            ("Microsoft.XMLHTTP", true),
        ]);
        h.fill_encode("hello");

        submit(&h.controller, &h.chain, false).unwrap();

        assert_eq!(*h.attempts.borrow(), vec!["XMLHttpRequest", "Msxml2.XMLHTTP"]);
        assert_eq!(h.outbox.borrow().len(), 1);
    }

    #[test]
    fn test_no_transport_aborts_without_ui_change() {
        let h = harness_with(vec![
            ("XMLHttpRequest", false),
            ("Msxml2.XMLHTTP", false),
            ("Microsoft.XMLHTTP", false),
        ]);
        h.fill_encode("hello");
        let before = h.page().shown_panels();

        let result = submit(&h.controller, &h.chain, false);

        match result {
            Err(Error::TransportUnavailable(tried)) => {
                assert_eq!(tried, "XMLHttpRequest, Msxml2.XMLHTTP, Microsoft.XMLHTTP");
            }
            other => panic!("unexpected result: {:?}", other.map(|p| p.id())),
        }
        let page = h.page();
        assert_eq!(page.shown_panels(), before);
        assert!(page.is_mode_button_enabled(Mode::Encode));
        assert!(page.alerts.is_empty());
    }

    #[test]
    fn test_send_failure_restores_controls() {
        let attempts = Rc::new(RefCell::new(Vec::new()));
        let chain = TransportChain::new().with(TestFactory {
            name: "XMLHttpRequest",
            behavior: FactoryBehavior::Broken,
            attempts,
        });
        let controller = Controller::new(MemoryPage::new()).into_shared();
        controller.borrow_mut().set_mode(Mode::Encode);

        let result = submit(&controller, &chain, false);

        assert!(matches!(result, Err(Error::Transport(_))));
        let c = controller.borrow();
        assert!(c.page().is_mode_button_enabled(Mode::Encode));
        assert!(!c.page().is_shown(Panel::Loading));
    }

    #[test]
    fn test_replicate_sends_prompted_path_only() {
        let h = harness();
        h.fill_encode("ignored");
        h.controller.borrow_mut().page_mut().prompt_reply = Some("/tmp/copy".to_string());

        let pending = submit(&h.controller, &h.chain, true).unwrap();
        assert!(pending.is_replicating());

        {
            let page = h.page();
            assert_eq!(page.prompts, vec![REPLICATE_PROMPT]);
            // 複製中はボタンを無効化しない
            assert!(page.is_mode_button_enabled(Mode::Encode));
            assert!(page.is_shown(Panel::Loading));
        }
        let outbox = h.outbox.borrow();
        assert_eq!(
            outbox[0].request.payload.fields(),
            &[("replicatePath".to_string(), text("/tmp/copy"))]
        );
    }

    #[test]
    fn test_replicate_cancelled_prompt_sends_empty_path() {
        let h = harness();
        submit(&h.controller, &h.chain, true).unwrap();

        let outbox = h.outbox.borrow();
        assert_eq!(
            outbox[0].request.payload.get("replicatePath"),
            Some(&text(""))
        );
    }

    #[test]
    fn test_replicate_allows_overlapping_submissions() {
        let h = harness();
        h.controller.borrow_mut().set_mode(Mode::Decode);
        let first = submit(&h.controller, &h.chain, true).unwrap();
        let second = submit(&h.controller, &h.chain, true).unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(h.outbox.borrow().len(), 2);

        h.complete(1, 200, r#"{"message": "replicated"}"#);
        h.complete(0, 200, r#"{"message": "replicated"}"#);

        let page = h.page();
        assert!(page.alerts.is_empty());
        assert!(!page.is_shown(Panel::DecodedOutput));
        drop(page);
        assert_eq!(block_on(first.wait()), Some(SubmitOutcome::Replicated));
        assert_eq!(block_on(second.wait()), Some(SubmitOutcome::Replicated));
    }

    #[test]
    fn test_replicate_in_encode_mode_alerts() {
        let h = harness();
        submit(&h.controller, &h.chain, true).unwrap();
        h.complete(0, 200, r#"{"message": "copied"}"#);
        assert_eq!(h.page().alerts, vec!["copied"]);
    }

    /// プロンプト表示中に先行リクエストが完了しても、閉じた後に反映される
    #[test]
    fn test_completion_during_replicate_prompt_is_deferred() {
        let h = harness();
        h.fill_decode("pw");
        let first = submit(&h.controller, &h.chain, false).unwrap();

        let outbox = Rc::clone(&h.outbox);
        {
            let mut c = h.controller.borrow_mut();
            c.page_mut().prompt_reply = Some("/srv/copy.png".to_string());
            c.page_mut().on_prompt = Some(Box::new(move || {
                let mut sent = outbox.borrow_mut().remove(0);
                sent.complete(200, r#"{"message": "secret"}"#);
            }));
        }
        let second = submit(&h.controller, &h.chain, true).unwrap();

        assert_eq!(
            block_on(first.wait()),
            Some(SubmitOutcome::Decoded("secret".to_string()))
        );
        {
            let page = h.page();
            assert_eq!(page.decoded_output, "secret");
            assert!(page.is_shown(Panel::DecodedOutput));
            assert!(page.is_mode_button_enabled(Mode::Decode));
            // 複製はまだ応答待ち
            assert!(page.is_shown(Panel::Loading));
        }

        assert_eq!(
            h.outbox.borrow()[0].request.payload.get("replicatePath"),
            Some(&text("/srv/copy.png"))
        );
        h.complete(0, 200, r#"{"message": "copied"}"#);
        assert_eq!(block_on(second.wait()), Some(SubmitOutcome::Replicated));
        assert!(!h.page().is_shown(Panel::Loading));
    }

    /// アラート表示中に届いた完了は、そのアラートの後に順番に反映される
    #[test]
    fn test_completion_during_alert_is_settled_afterwards() {
        let h = harness();
        h.fill_encode("hello");
        let first = submit(&h.controller, &h.chain, false).unwrap();
        h.controller.borrow_mut().page_mut().prompt_reply = Some("/srv/copy.png".to_string());
        let second = submit(&h.controller, &h.chain, true).unwrap();

        let outbox = Rc::clone(&h.outbox);
        h.controller.borrow_mut().page_mut().on_alert = Some(Box::new(move || {
            let mut sent = outbox.borrow_mut().remove(0);
            sent.complete(200, r#"{"message": "copied"}"#);
        }));
        h.complete(0, 200, r#"{"message": "encoded"}"#);

        assert_eq!(h.page().alerts, vec!["encoded", "copied"]);
        assert!(h.outbox.borrow().is_empty());
        assert_eq!(
            block_on(first.wait()),
            Some(SubmitOutcome::Acknowledged("encoded".to_string()))
        );
        assert_eq!(
            block_on(second.wait()),
            Some(SubmitOutcome::Acknowledged("copied".to_string()))
        );
    }

    #[test]
    fn test_dropped_transport_resolves_to_none() {
        let h = harness();
        h.fill_encode("hello");
        let pending = submit(&h.controller, &h.chain, false).unwrap();
        h.outbox.borrow_mut().clear();
        assert_eq!(block_on(pending.wait()), None);
    }

    #[test]
    fn test_parse_message() {
        assert_eq!(parse_message(r#"{"message": "hi"}"#).unwrap(), "hi");
        assert!(matches!(
            parse_message(r#"{"status": 200}"#),
            Err(Error::MalformedResponse(_))
        ));
    }
}
