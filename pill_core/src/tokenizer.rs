//! `tokenizer`：搜索串 <-> 结构化条件的纯接口。
//!
//! core 不实现语法本身；`pill_query::QueryTokenizer` 是默认实现。

use crate::model::Term;

/// 搜索语法：parse / unparse / describe。
///
/// 约定：
/// - `parse(unparse(terms)) == terms`（对可往返的条件成立）
/// - `describe` 必须接受 0 个、1 个或多个条件
pub trait Tokenizer: Send + Sync {
    fn parse(&self, text: &str) -> Vec<Term>;

    fn unparse(&self, terms: &[Term]) -> String;

    /// 渲染条件的 HTML 描述（用于 pill 的 tooltip）。
    fn describe(&self, terms: &[Term]) -> String;

    /// 单个条件的规范文本。
    fn unparse_one(&self, term: &Term) -> String {
        self.unparse(std::slice::from_ref(term))
    }
}
