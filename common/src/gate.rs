//! 鍵選択ラッチ
//!
//! エンコードは公開鍵のみ、デコードは公開鍵と秘密鍵の両方が選ばれた時点で開く。
//! 開いたら両フラグを戻すので、次の選択でも同じ条件で再び開く。

use crate::types::{KeyKind, Mode};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyPairGate {
    public_selected: bool,
    private_selected: bool,
}

impl KeyPairGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 鍵の選択を記録し、開いたら `true` を返す
    pub fn notify(&mut self, kind: KeyKind, mode: Mode) -> bool {
        match kind {
            KeyKind::Public => self.public_selected = true,
            KeyKind::Private => self.private_selected = true,
        }

        let opens = (self.public_selected && self.private_selected)
            || (self.public_selected && mode.is_encoding());
        if opens {
            self.reset();
        }
        opens
    }

    pub fn reset(&mut self) {
        self.public_selected = false;
        self.private_selected = false;
    }

    pub fn public_selected(&self) -> bool {
        self.public_selected
    }

    pub fn private_selected(&self) -> bool {
        self.private_selected
    }
}
