//! `config`：reconcile 行为的可选策略。
//!
//! 默认值即参考行为：`search` 条件保留为文本、非法条件触发 shake、尾部文本用两个空格连接。

use serde::Deserialize;

use crate::error::Result;

/// `search` 条件的处理方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchTermPolicy {
    /// 留在搜索框文本里
    #[default]
    Text,
    /// 变成普通 pill
    Pill,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    pub search_terms: SearchTermPolicy,
    /// 是否对非法条件触发 shake
    pub signal_invalid: bool,
    /// 尾部文本各片段之间的分隔符
    pub tail_separator: String,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            search_terms: SearchTermPolicy::Text,
            signal_invalid: true,
            tail_separator: "  ".to_string(),
        }
    }
}

impl ReconcileConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PillError;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(ReconcileConfig::from_toml_str("").unwrap(), ReconcileConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = ReconcileConfig::from_toml_str("search_terms = \"pill\"\n").unwrap();
        assert_eq!(config.search_terms, SearchTermPolicy::Pill);
        assert!(config.signal_invalid);
        assert_eq!(config.tail_separator, "  ");
    }

    #[test]
    fn unknown_policy_is_config_error() {
        let err = ReconcileConfig::from_toml_str("search_terms = \"sometimes\"").unwrap_err();
        assert!(matches!(err, PillError::Config(_)));
    }
}
