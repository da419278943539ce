//! `validator`：判断一个条件能否成为 pill。
//!
//! 只主动拒绝“认识且能检查”的 operator；未知 operator 一律放行。

use crate::{
    model::{Term, User},
    resolver::Resolver,
};

/// 可以折叠成多用户 pill 的 operator。
pub const USER_PILL_OPERATORS: [&str; 3] = ["dm", "dm-including", "sender"];

/// 自由文本搜索的 operator。
pub const SEARCH_OPERATOR: &str = "search";

const HAS_OPERANDS: [&str; 4] = ["image", "link", "attachment", "reaction"];

const IS_OPERANDS: [&str; 8] = [
    "dm",
    "private",
    "starred",
    "mentioned",
    "alerted",
    "unread",
    "resolved",
    "followed",
];

const IN_OPERANDS: [&str; 2] = ["home", "all"];

pub fn is_user_pill_operator(operator: &str) -> bool {
    USER_PILL_OPERATORS.contains(&operator)
}

/// 条件校验器（纯函数：只读 resolver，不做任何修改）。
pub struct Validator<'a, R: ?Sized> {
    pub resolver: &'a R,
}

impl<'a, R> Validator<'a, R>
where
    R: Resolver + ?Sized,
{
    pub fn new(resolver: &'a R) -> Self {
        Self { resolver }
    }

    pub fn is_valid(&self, term: &Term) -> bool {
        let operand: &str = term.operand.as_str();
        match term.operator.as_str() {
            "has" => HAS_OPERANDS.contains(&operand),
            "is" => IS_OPERANDS.contains(&operand),
            "in" => IN_OPERANDS.contains(&operand),
            // 非数字按“查无此消息”处理
            "id" => operand
                .parse::<u64>()
                .is_ok_and(|id| self.resolver.message_exists(id)),
            "channel" => self.resolver.channel_by_name(operand).is_some(),
            op if is_user_pill_operator(op) => self.resolve_users(operand).is_some(),
            _ => true,
        }
    }

    /// 解析逗号分隔的 email 列表；任意一个查不到则整体返回 `None`。
    ///
    /// 空 operand 会被切成 `[""]`，因此同样返回 `None`。
    pub fn resolve_users(&self, operand: &str) -> Option<Vec<User>> {
        operand
            .split(',')
            .map(|email| self.resolver.user_by_email(email))
            .collect()
    }
}
