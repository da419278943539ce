use crate::builder::create_item_from_search_string;
use crate::config::{ReconcileConfig, SearchTermPolicy};
use crate::container::PillContainer;
use crate::error::Result;
use crate::model::{Pill, Reconciled, Term};
use crate::reconciler::{Reconciler, ShakeSignal};
use crate::resolver::{Decorations, Resolver};
use crate::serializer::current_search_string;
use crate::tokenizer::Tokenizer;
use crate::validator::Validator;

/// 引擎：持有 tokenizer、实体数据和 reconcile 策略，把搜索串同步成 pill。
///
/// 流水线：
/// - tokenizer（parse） -> validator（校验/解析用户） -> builder（建 pill） -> reconciler（写容器） -> serializer（读回文本）
pub struct Engine<R, T> {
    /// 用户/频道/消息查询 + 用户装饰信息
    resolver: R,
    /// 搜索语法
    tokenizer: T,
    config: ReconcileConfig,
}

impl<R, T> Engine<R, T>
where
    R: Resolver + Decorations,
    T: Tokenizer,
{
    pub fn new(resolver: R, tokenizer: T) -> Self {
        Self {
            resolver,
            tokenizer,
            config: ReconcileConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReconcileConfig) -> Self {
        self.config = config;
        self
    }

    pub fn search_terms(mut self, policy: SearchTermPolicy) -> Self {
        self.config.search_terms = policy;
        self
    }

    pub fn signal_invalid(mut self, enabled: bool) -> Self {
        self.config.signal_invalid = enabled;
        self
    }

    /// 尾部文本分隔符；空串回退到默认值。
    pub fn tail_separator(mut self, separator: &str) -> Self {
        if separator.is_empty() {
            self.config.tail_separator = ReconcileConfig::default().tail_separator;
        } else {
            self.config.tail_separator = separator.to_string();
        }
        self
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    pub fn parse(&self, text: &str) -> Vec<Term> {
        self.tokenizer.parse(text)
    }

    pub fn is_valid(&self, term: &Term) -> bool {
        Validator::new(&self.resolver).is_valid(term)
    }

    /// 清空容器并按 `terms` 重建。
    pub fn reconcile<K>(
        &self,
        terms: &[Term],
        container: &mut K,
        signal: &mut dyn ShakeSignal,
    ) -> Result<Reconciled>
    where
        K: PillContainer<Pill> + ?Sized,
    {
        Reconciler {
            resolver: &self.resolver,
            tokenizer: &self.tokenizer,
            config: &self.config,
        }
        .reconcile(terms, container, signal)
    }

    /// 快捷接口：parse + reconcile。
    pub fn load<K>(
        &self,
        search_string: &str,
        container: &mut K,
        signal: &mut dyn ShakeSignal,
    ) -> Result<Reconciled>
    where
        K: PillContainer<Pill> + ?Sized,
    {
        let terms: Vec<Term> = self.parse(search_string);
        self.reconcile(&terms, container, signal)
    }

    pub fn create_item(&self, search_string: &str) -> Option<Pill> {
        create_item_from_search_string(&self.tokenizer, &self.resolver, search_string)
    }
}

impl<R, T> crate::processor::EngineFacade for Engine<R, T>
where
    R: Resolver + Decorations,
    T: Tokenizer,
{
    fn load(
        &self,
        search_string: &str,
        container: &mut dyn PillContainer<Pill>,
        signal: &mut dyn ShakeSignal,
    ) -> Result<Reconciled> {
        Engine::<R, T>::load(self, search_string, container, signal)
    }

    fn create_item(&self, search_string: &str) -> Option<Pill> {
        Engine::<R, T>::create_item(self, search_string)
    }

    fn current_search_string(&self, container: &dyn PillContainer<Pill>) -> String {
        current_search_string(container)
    }
}
