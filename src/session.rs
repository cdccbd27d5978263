//! 1回分の送信をコンソール上で再現する
//!
//! ブラウザでの操作（モード選択 → 鍵選択 → 画像選択 → テキスト入力 → 送信）を
//! 同じ順でコントローラへ流し、各段階でパネルが開くことを確認してから送信する。

use std::path::PathBuf;

use imsteg_common::{
    submit, Controller, FileInput, KeyKind, Mode, Page, PageExt, Panel, Shared, SubmitOutcome,
    TransportChain,
};
use log::{debug, info};

use crate::console::ConsolePage;
use crate::error::{ImStegError, Result};

#[derive(Debug, Clone)]
pub struct EncodeInput {
    pub image: PathBuf,
    pub public_key: PathBuf,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct DecodeInput {
    pub image: PathBuf,
    pub public_key: PathBuf,
    pub private_key: PathBuf,
    pub passphrase: String,
}

#[derive(Debug, Clone)]
pub enum Job {
    Encode(EncodeInput),
    Decode(DecodeInput),
    /// 直前の結果をサーバー側で複製する（パスはページのプロンプトで決まる）
    Replicate { mode: Mode },
}

impl Job {
    pub fn mode(&self) -> Mode {
        match self {
            Job::Encode(_) => Mode::Encode,
            Job::Decode(_) => Mode::Decode,
            Job::Replicate { mode } => *mode,
        }
    }
}

pub struct Session {
    controller: Shared<ConsolePage>,
    transports: TransportChain<PathBuf>,
}

impl Session {
    pub fn new(page: ConsolePage, transports: TransportChain<PathBuf>) -> Self {
        Self {
            controller: Controller::new(page).into_shared(),
            transports,
        }
    }

    pub fn controller(&self) -> &Shared<ConsolePage> {
        &self.controller
    }

    /// 入力を流し込んで送信し、完了まで待つ
    ///
    /// `tokio::task::LocalSet` の中で呼び出すこと。
    pub async fn run(&self, job: Job) -> Result<SubmitOutcome> {
        let replicating = matches!(job, Job::Replicate { .. });
        self.fill(&job)?;

        // 送信中はコントローラを借用しない
        let pending = submit(&self.controller, &self.transports, replicating)?;
        info!("waiting for request #{}", pending.id());

        pending
            .wait()
            .await
            .ok_or_else(|| {
                ImStegError::Submission(imsteg_common::Error::Transport(
                    "request was dropped before completion".to_string(),
                ))
            })
    }

    /// デコード結果をクリップボードへ
    pub fn copy_output(&self) -> Result<()> {
        self.controller.borrow_mut().copy_output()?;
        Ok(())
    }

    fn fill(&self, job: &Job) -> Result<()> {
        let mut controller = self.controller.borrow_mut();
        controller.set_mode(job.mode());

        let (image, text) = match job {
            Job::Replicate { .. } => return Ok(()),
            Job::Encode(input) => {
                controller
                    .page_mut()
                    .select_file(FileInput::PublicKey, &input.public_key)?;
                controller.on_key_selected(KeyKind::Public);
                (&input.image, &input.text)
            }
            Job::Decode(input) => {
                controller
                    .page_mut()
                    .select_file(FileInput::PublicKey, &input.public_key)?;
                controller.on_key_selected(KeyKind::Public);
                controller
                    .page_mut()
                    .select_file(FileInput::PrivateKey, &input.private_key)?;
                controller.on_key_selected(KeyKind::Private);
                (&input.image, &input.passphrase)
            }
        };

        if !controller.page().is_shown(Panel::SelectImage) {
            return Err(ImStegError::MissingInput(
                "key files were not accepted".to_string(),
            ));
        }

        controller.page_mut().select_file(FileInput::Image, image)?;
        controller.on_file_selected();

        controller.page_mut().set_text(text);
        controller.on_text_changed(text);
        if !controller.page().is_shown(Panel::Action) {
            let label = controller.page().text_label().to_string();
            return Err(ImStegError::MissingInput(label));
        }

        debug!("form ready: {:?}", controller.readiness());
        Ok(())
    }
}
