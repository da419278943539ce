//! 集成测试共用的 fixture。
//!
//! 在测试文件里这样引入：
//! ```ignore
//! mod common;
//! ```

use pill_core::engine::Engine;
use pill_directory::TsvDirectory;
use pill_query::QueryTokenizer;

/// 测试目录：五个用户、两个频道、一条已知消息（42）。
///
/// - 3（othello）已停用
/// - 4（polonius）是 guest，带状态 emoji
/// - 5 是无权访问的占位用户，同时处于停用状态
#[allow(dead_code)]
pub fn directory() -> TsvDirectory {
    let mut dir = TsvDirectory::new()
        .with_user(1, "a@x.com", "Alice")
        .with_user(2, "b@x.com", "Bob")
        .with_user(3, "othello@zulip.com", "Othello")
        .with_user(4, "polonius@zulip.com", "Polonius")
        .with_user(5, "unknown@zulip.com", "Unknown user")
        .with_channel(10, "Denmark")
        .with_channel(11, "Verona")
        .with_message(42);
    dir.deactivate(3);
    dir.set_guest(4, true);
    dir.set_status(4, Some("palm_tree"));
    dir.deactivate(5);
    dir.set_inaccessible(5);
    dir
}

#[allow(dead_code)]
pub fn engine() -> Engine<TsvDirectory, QueryTokenizer> {
    Engine::new(directory(), QueryTokenizer::new())
}
