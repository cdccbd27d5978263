//! ImSteg Common Library
//!
//! ブラウザ(WASM)とCLIで共有されるコントローラ本体
//!
//! - `class_set`: class属性のタグ操作（表示/非表示・無効化の基本操作）
//! - `disclosure`: モードと入力状況に応じたパネル開示
//! - `gate`: 公開鍵/秘密鍵の選択ラッチ
//! - `submission`: 送信ペイロード生成とリクエストのライフサイクル

pub mod class_set;
pub mod disclosure;
pub mod error;
pub mod gate;
pub mod page;
pub mod submission;
pub mod types;

#[cfg(test)]
mod testing;

pub use class_set::ClassSet;
pub use disclosure::{Controller, Shared};
pub use error::{Error, Result};
pub use gate::KeyPairGate;
pub use page::{Page, PageExt};
pub use submission::{
    parse_message, submit, FieldValue, FormSnapshot, Payload, PendingRequest, RawResponse,
    ReadyState, StateCallback, SubmitOutcome, SubmitRequest, Transport, TransportChain,
    TransportFactory, REPLICATE_PROMPT, SUBMIT_PATH, SUCCESS_STATUS,
};
pub use types::{Element, FileInput, KeyKind, Mode, Panel, ReadinessFlags};
