//! コントローラが扱う型定義
//!
//! - Mode: エンコード/デコード
//! - Panel: 表示を個別に切り替えるUI領域
//! - Element: class属性を操作する対象（パネルとモードボタン）

use std::fmt;

/// 動作モード
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Encode,
    Decode,
}

impl Mode {
    pub fn is_encoding(self) -> bool {
        matches!(self, Mode::Encode)
    }

    pub fn other(self) -> Mode {
        match self {
            Mode::Encode => Mode::Decode,
            Mode::Decode => Mode::Encode,
        }
    }

    /// ページ上のボタン位置（0: エンコード, 1: デコード）
    pub fn button_index(self) -> usize {
        match self {
            Mode::Encode => 0,
            Mode::Decode => 1,
        }
    }

    /// テキスト入力欄のラベル
    pub fn text_label(self) -> &'static str {
        match self {
            Mode::Encode => "Enter the secret text.",
            Mode::Decode => "Enter your private key passphrase.",
        }
    }

    /// テキスト入力欄の送信フィールド名
    pub fn text_key(self) -> &'static str {
        match self {
            Mode::Encode => "secretText",
            Mode::Decode => "passphrase",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Encode => "encode",
            Mode::Decode => "decode",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 個別に表示/非表示を切り替えるUI領域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    SelectImage,
    SelectPrvKey,
    SelectKeys,
    EnterText,
    Action,
    Loading,
    DecodedOutput,
}

impl Panel {
    pub const ALL: [Panel; 7] = [
        Panel::SelectImage,
        Panel::SelectPrvKey,
        Panel::SelectKeys,
        Panel::EnterText,
        Panel::Action,
        Panel::Loading,
        Panel::DecodedOutput,
    ];

    /// モード切替時に隠すパネル
    pub const MODE_DEPENDENT: [Panel; 6] = [
        Panel::SelectImage,
        Panel::SelectPrvKey,
        Panel::EnterText,
        Panel::Action,
        Panel::Loading,
        Panel::DecodedOutput,
    ];

    /// DOM上のid
    pub fn id(self) -> &'static str {
        match self {
            Panel::SelectImage => "select-image",
            Panel::SelectPrvKey => "select-prvkey",
            Panel::SelectKeys => "select-keys",
            Panel::EnterText => "enter-text",
            Panel::Action => "action",
            Panel::Loading => "loading",
            Panel::DecodedOutput => "decoded-output",
        }
    }
}

/// class属性を操作する対象
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Panel(Panel),
    ModeButton(Mode),
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Panel(panel) => write!(f, "panel #{}", panel.id()),
            Element::ModeButton(mode) => write!(f, "{} button", mode),
        }
    }
}

/// 鍵の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Public,
    Private,
}

/// ファイル入力欄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileInput {
    Image,
    PublicKey,
    PrivateKey,
}

impl FileInput {
    /// DOM上のid
    pub fn id(self) -> &'static str {
        match self {
            FileInput::Image => "file",
            FileInput::PublicKey => "pubkey",
            FileInput::PrivateKey => "prvkey",
        }
    }
}

/// 入力状況（ページから都度導出し、保持しない）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadinessFlags {
    pub has_file: bool,
    pub has_text: bool,
    pub pub_key_selected: bool,
    pub priv_key_selected: bool,
}
