use serde::{Deserialize, Serialize};

/// 结构化搜索条件（一个 operator/operand/negated 三元组）。
///
/// 由 tokenizer 产生，产生后不再修改；同一查询中可以出现多个同名 operator。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub operator: String,
    pub operand: String,
    #[serde(default)]
    pub negated: bool,
}

impl Term {
    pub fn new(operator: impl Into<String>, operand: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            operand: operand.into(),
            negated: false,
        }
    }

    /// 取反版本（`-operator:operand`）。
    pub fn negated(mut self) -> Self {
        self.negated = true;
        self
    }
}

/// 用户（来自外部 directory 的只读数据）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: u64,
    pub email: String,
    pub full_name: String,
    /// 当前 viewer 无权访问的占位用户：真实状态未知
    #[serde(default)]
    pub is_inaccessible_user: bool,
}

/// 频道。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub stream_id: u64,
    pub name: String,
}

/// 用户状态 emoji（建 pill 时的快照）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEmoji {
    pub emoji_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_code: Option<String>,
}

/// 普通搜索 pill：一个（或一组不可分组的）条件的文本 + 描述。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainPill {
    pub display_value: String,
    /// tokenizer 渲染的 HTML 描述（tooltip 用）
    pub description_html: String,
}

/// 用户 pill 中的单个用户快照。
///
/// 注意：这是建 pill 那一刻的拷贝，之后用户改名/改状态都不会同步过来。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub display_value: String,
    pub user_id: u64,
    pub email: String,
    pub img_src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_emoji_info: Option<StatusEmoji>,
    pub should_add_guest_user_indicator: bool,
    pub deactivated: bool,
}

/// 多用户 pill：`sender`/`dm`/`dm-including` 的 operand（逗号分隔的 email 列表）折叠成一个 pill。
///
/// `users` 永不为空（由 `builder::build_user_pill` 保证）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPill {
    pub operator: String,
    pub display_value: String,
    pub negated: bool,
    pub users: Vec<UserRef>,
}

/// 搜索框里的 pill。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pill {
    #[serde(rename = "search")]
    Search(PlainPill),
    #[serde(rename = "search_user")]
    User(UserPill),
}

impl Pill {
    pub fn display_value(&self) -> &str {
        match self {
            Pill::Search(p) => &p.display_value,
            Pill::User(p) => &p.display_value,
        }
    }
}

/// 一次 reconcile 的结果摘要（容器本身已被就地更新）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciled {
    /// 写回搜索框的文本尾巴
    pub tail_text: String,
    /// 未通过校验的条件（原样文本）
    pub invalid_inputs: Vec<String>,
    /// 末尾未写完的条件（例如 `dm:`）
    pub partial: Option<String>,
    /// 本轮是否触发了 shake
    pub shaken: bool,
}

/// 给 UI 的只读快照。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub pills: Vec<Pill>,
    /// 搜索框里尚未变成 pill 的文本
    pub text: String,
    /// pill 部分的规范搜索串
    pub search_string: String,
}
