//! `pill_core`：搜索串 <-> pill 的纯逻辑层，不做任何 I/O。
//!
//! 设计目标：
//! - **外部协作者走 trait**：tokenizer、实体查询、pill 容器都由调用方注入
//! - **分层清晰**：tokenizer -> validator -> builder -> reconciler -> serializer
//! - **用户输入错误不外抛**：非法条件只体现为搜索框文本 + shake
pub mod builder;
pub mod config;
pub mod container;
pub mod context;
pub mod engine;
pub mod error;
pub mod event;
pub mod model;
pub mod processor;
pub mod reconciler;
pub mod resolver;
pub mod serializer;
pub mod session;
pub mod tokenizer;
pub mod validator;

pub use error::PillError;
