//! `reconciler`：把一组条件同步到 pill 容器。
//!
//! 每次调用都先清空容器再从头填充（不做增量 diff）。单趟从左到右：
//! - 最后一个 operand 为空、文本以 `:` 结尾的条件 -> partial，留作文本
//! - 校验失败 -> 原样文本，整趟结束后 shake 一次
//! - `sender`/`dm`/`dm-including` -> 多用户 pill（用户来自校验时的解析结果）
//! - `search` -> 按 `SearchTermPolicy` 留作文本或变成普通 pill
//! - 其他 -> 普通 pill

use crate::{
    builder::{build_plain_pill, build_user_pill},
    config::{ReconcileConfig, SearchTermPolicy},
    container::PillContainer,
    context::PassContext,
    error::Result,
    model::{Pill, Reconciled, Term},
    resolver::{Decorations, Resolver},
    tokenizer::Tokenizer,
    validator::{SEARCH_OPERATOR, Validator, is_user_pill_operator},
};

/// 通知宿主 UI “有输入不合法”（例如让搜索框抖一下）。没有 payload。
pub trait ShakeSignal {
    fn shake(&mut self);
}

impl<F> ShakeSignal for F
where
    F: FnMut(),
{
    fn shake(&mut self) {
        self()
    }
}

pub struct Reconciler<'a, R: ?Sized, T: ?Sized> {
    pub resolver: &'a R,
    pub tokenizer: &'a T,
    pub config: &'a ReconcileConfig,
}

impl<'a, R, T> Reconciler<'a, R, T>
where
    R: Resolver + Decorations + ?Sized,
    T: Tokenizer + ?Sized,
{
    pub fn reconcile<K>(
        &self,
        terms: &[Term],
        container: &mut K,
        signal: &mut dyn ShakeSignal,
    ) -> Result<Reconciled>
    where
        K: PillContainer<Pill> + ?Sized,
    {
        container.clear();
        container.clear_text();
        let mut pass = PassContext::default();
        let validator = Validator::new(self.resolver);

        for (i, term) in terms.iter().enumerate() {
            let input: String = self.tokenizer.unparse_one(term);

            // 形如 `dm:` 的最后一个条件还没写完，留在搜索框里让用户继续输入
            if i + 1 == terms.len() && term.operand.is_empty() && input.ends_with(':') {
                tracing::trace!("partial term {input:?}");
                pass.partial = Some(input);
                continue;
            }

            if is_user_pill_operator(&term.operator) {
                match validator.resolve_users(&term.operand) {
                    Some(users) => {
                        let pill =
                            build_user_pill(self.resolver, &term.operator, &users, term.negated)?;
                        tracing::trace!("user pill {:?} ({} users)", pill.display_value, users.len());
                        container.append_validated(Pill::User(pill));
                    }
                    None => {
                        tracing::debug!("unresolvable users in {input:?}");
                        pass.invalid_inputs.push(input);
                    }
                }
                continue;
            }

            if !validator.is_valid(term) {
                tracing::debug!("invalid term {input:?}");
                pass.invalid_inputs.push(input);
                continue;
            }

            if term.operator == SEARCH_OPERATOR && self.config.search_terms == SearchTermPolicy::Text {
                pass.search_texts.push(input);
                continue;
            }

            tracing::trace!("plain pill {input:?}");
            container.append_validated(Pill::Search(build_plain_pill(self.tokenizer, &input)));
        }

        let tail: String = pass.tail_text(&self.config.tail_separator);
        container.set_text(&tail);

        let shaken: bool = pass.has_invalid() && self.config.signal_invalid;
        if shaken {
            signal.shake();
        }
        tracing::debug!(
            "reconciled {} terms into {} pills ({} invalid)",
            terms.len(),
            container.items().len(),
            pass.invalid_inputs.len()
        );
        Ok(pass.into_reconciled(&self.config.tail_separator, shaken))
    }
}
