//! `PassContext`：一次 reconcile 过程中累积的“非 pill”文本。
//!
//! 约定：
//! - `search_texts`：保留为文本的 `search` 条件
//! - `invalid_inputs`：未通过校验的条件（原样写回搜索框，方便用户修改）
//! - `partial`：最后一个未写完的条件（例如 `dm:`），至多一个
use crate::model::Reconciled;

#[derive(Debug, Clone, Default)]
pub struct PassContext {
    pub search_texts: Vec<String>,
    pub invalid_inputs: Vec<String>,
    pub partial: Option<String>,
}

impl PassContext {
    pub fn has_invalid(&self) -> bool {
        !self.invalid_inputs.is_empty()
    }

    /// 搜索框尾部文本：search 文本、非法条件、partial 依次以 `separator` 连接。
    pub fn tail_text(&self, separator: &str) -> String {
        let mut parts: Vec<&str> = Vec::new();
        parts.extend(self.search_texts.iter().map(String::as_str));
        parts.extend(self.invalid_inputs.iter().map(String::as_str));
        if let Some(partial) = self.partial.as_deref().filter(|p| !p.is_empty()) {
            parts.push(partial);
        }
        parts.join(separator)
    }

    pub fn into_reconciled(self, separator: &str, shaken: bool) -> Reconciled {
        Reconciled {
            tail_text: self.tail_text(separator),
            invalid_inputs: self.invalid_inputs,
            partial: self.partial,
            shaken,
        }
    }
}
