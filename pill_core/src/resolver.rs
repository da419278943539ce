use crate::model::{Channel, StatusEmoji, User};

/// 实体查询抽象：core 不关心数据来自缓存/文件/内存。
///
/// 约定：
/// - 所有查询都是同步、只读、无副作用的本地查找
/// - 查不到返回 `None`/`false`，不是错误
pub trait Resolver: Send + Sync {
    /// 按 email 查用户（精确匹配）。
    fn user_by_email(&self, email: &str) -> Option<User>;

    /// 按名字查频道。
    fn channel_by_name(&self, name: &str) -> Option<Channel>;

    /// 本地是否已知该消息。
    fn message_exists(&self, message_id: u64) -> bool;
}

/// 用户 pill 的装饰信息（头像、状态 emoji、guest 标记、是否活跃）。
pub trait Decorations: Send + Sync {
    fn avatar_url(&self, user: &User) -> String;

    fn status_emoji(&self, user_id: u64) -> Option<StatusEmoji>;

    fn should_add_guest_user_indicator(&self, user_id: u64) -> bool;

    fn is_person_active(&self, user_id: u64) -> bool;
}
