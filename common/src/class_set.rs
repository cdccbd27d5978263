//! class属性のタグ操作
//!
//! パネルの表示（`show`）、モードボタンの強調（`highlight`）と無効化（`disabled`）は
//! すべてこのタグ操作で表現する。

use std::fmt;

use log::debug;

use crate::page::Page;
use crate::types::Element;

/// 表示中パネルのタグ
pub const SHOW_TAG: &str = "show";
/// 選択中モードボタンのタグ
pub const HIGHLIGHT_TAG: &str = "highlight";
/// 無効化されたコントロールのタグ
pub const DISABLED_TAG: &str = "disabled";

/// 空白区切りのclassリスト
///
/// 構築時は重複も空トークンもそのまま保持し、`add` のときだけ重複を避ける。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSet {
    tags: Vec<String>,
}

impl ClassSet {
    /// class属性文字列を単一の空白で分割する
    pub fn parse(class_attr: &str) -> Self {
        Self {
            tags: class_attr.split(' ').map(str::to_string).collect(),
        }
    }

    pub fn has(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// タグを末尾に追加（既にあれば何もしない）
    ///
    /// 追加した場合は `true` を返す
    pub fn add(&mut self, tag: &str) -> bool {
        if self.has(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// 最初に見つかったタグを削除（無ければ何もしない）
    pub fn remove(&mut self, tag: &str) -> bool {
        match self.tags.iter().position(|t| t == tag) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl fmt::Display for ClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tags.join(" "))
    }
}

/// 要素にタグが付いているか（要素が無ければ `false`）
pub fn has_tag<P: Page + ?Sized>(page: &P, element: Element, tag: &str) -> bool {
    page.class_name(element)
        .map(|class_attr| ClassSet::parse(&class_attr).has(tag))
        .unwrap_or(false)
}

/// 要素にタグを追加してclass属性を書き戻す
pub fn add_tag<P: Page + ?Sized>(page: &mut P, element: Element, tag: &str) {
    update_tags(page, element, |set| {
        set.add(tag);
    });
}

/// 要素からタグを削除してclass属性を書き戻す
pub fn remove_tag<P: Page + ?Sized>(page: &mut P, element: Element, tag: &str) {
    update_tags(page, element, |set| {
        set.remove(tag);
    });
}

fn update_tags<P, F>(page: &mut P, element: Element, apply: F)
where
    P: Page + ?Sized,
    F: FnOnce(&mut ClassSet),
{
    let Some(class_attr) = page.class_name(element) else {
        debug!("{} is not on the page, skipping", element);
        return;
    };
    let mut set = ClassSet::parse(&class_attr);
    apply(&mut set);
    page.set_class_name(element, &set.to_string());
}
