//! `builder`：把校验过的条件变成 pill。

use crate::{
    error::{PillError, Result},
    model::{Pill, PlainPill, User, UserPill, UserRef},
    resolver::{Decorations, Resolver},
    tokenizer::Tokenizer,
    validator::Validator,
};

/// 构建多用户 pill。
///
/// 前置条件：`users` 来自 `Validator::resolve_users`，即 operand 里每个 email 都已解析。
/// `users` 为空是调用方的逻辑错误，返回 `PillError::EmptyUserPill`。
pub fn build_user_pill<C>(
    decorations: &C,
    operator: &str,
    users: &[User],
    negated: bool,
) -> Result<UserPill>
where
    C: Decorations + ?Sized,
{
    if users.is_empty() {
        return Err(PillError::EmptyUserPill {
            operator: operator.to_string(),
        });
    }
    let sign: &str = if negated { "-" } else { "" };
    let emails: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
    let display_value: String = format!("{sign}{operator}:{}", emails.join(","));

    let users: Vec<UserRef> = users
        .iter()
        .map(|user| UserRef {
            display_value: user.full_name.clone(),
            user_id: user.user_id,
            email: user.email.clone(),
            img_src: decorations.avatar_url(user),
            status_emoji_info: decorations.status_emoji(user.user_id),
            should_add_guest_user_indicator: decorations
                .should_add_guest_user_indicator(user.user_id),
            // 无权访问的用户真实状态未知，不显示为已停用
            deactivated: !decorations.is_person_active(user.user_id) && !user.is_inaccessible_user,
        })
        .collect();

    Ok(UserPill {
        operator: operator.to_string(),
        display_value,
        negated,
        users,
    })
}

/// 由规范文本构建普通 pill（描述由 tokenizer 渲染）。
pub fn build_plain_pill<T>(tokenizer: &T, display_value: &str) -> PlainPill
where
    T: Tokenizer + ?Sized,
{
    let terms = tokenizer.parse(display_value);
    PlainPill {
        display_value: display_value.to_string(),
        description_html: tokenizer.describe(&terms),
    }
}

/// 搜索框“回车转 pill”：整段文本里的每个条件都合法才生成 pill。
///
/// 返回 `None` 时调用方应触发 shake。
pub fn create_item_from_search_string<T, R>(
    tokenizer: &T,
    resolver: &R,
    search_string: &str,
) -> Option<Pill>
where
    T: Tokenizer + ?Sized,
    R: Resolver + ?Sized,
{
    let terms = tokenizer.parse(search_string);
    let validator = Validator::new(resolver);
    if !terms.iter().all(|term| validator.is_valid(term)) {
        tracing::debug!("rejecting search string {search_string:?}: invalid term");
        return None;
    }
    Some(Pill::Search(PlainPill {
        display_value: search_string.to_string(),
        description_html: tokenizer.describe(&terms),
    }))
}

pub fn get_search_string_from_item(item: &Pill) -> String {
    item.display_value().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Channel, StatusEmoji, Term};

    /// 只认 `operator:operand`，其余按 search 处理。
    struct Words;

    impl Tokenizer for Words {
        fn parse(&self, text: &str) -> Vec<Term> {
            text.split_whitespace()
                .map(|w| match w.split_once(':') {
                    Some((op, operand)) => Term::new(op, operand),
                    None => Term::new("search", w),
                })
                .collect()
        }

        fn unparse(&self, terms: &[Term]) -> String {
            let parts: Vec<String> = terms
                .iter()
                .map(|t| format!("{}:{}", t.operator, t.operand))
                .collect();
            parts.join(" ")
        }

        fn describe(&self, terms: &[Term]) -> String {
            format!("{} terms", terms.len())
        }
    }

    struct NoMessages;

    impl Resolver for NoMessages {
        fn user_by_email(&self, _email: &str) -> Option<User> {
            None
        }

        fn channel_by_name(&self, _name: &str) -> Option<Channel> {
            None
        }

        fn message_exists(&self, _message_id: u64) -> bool {
            false
        }
    }

    struct Deco;

    impl Decorations for Deco {
        fn avatar_url(&self, user: &User) -> String {
            format!("/avatar/{}", user.user_id)
        }

        fn status_emoji(&self, user_id: u64) -> Option<StatusEmoji> {
            (user_id == 1).then(|| StatusEmoji {
                emoji_name: "palm_tree".to_string(),
                emoji_code: None,
            })
        }

        fn should_add_guest_user_indicator(&self, user_id: u64) -> bool {
            user_id == 2
        }

        fn is_person_active(&self, user_id: u64) -> bool {
            user_id == 1
        }
    }

    fn user(user_id: u64, email: &str, inaccessible: bool) -> User {
        User {
            user_id,
            email: email.to_string(),
            full_name: format!("User {user_id}"),
            is_inaccessible_user: inaccessible,
        }
    }

    #[test]
    fn display_value_joins_emails() {
        let users = vec![user(1, "a@x.com", false), user(2, "b@x.com", false)];
        let pill = build_user_pill(&Deco, "sender", &users, false).unwrap();
        assert_eq!(pill.display_value, "sender:a@x.com,b@x.com");
        assert_eq!(pill.users.len(), 2);

        let pill = build_user_pill(&Deco, "dm", &users[..1], true).unwrap();
        assert_eq!(pill.display_value, "-dm:a@x.com");
        assert!(pill.negated);
    }

    #[test]
    fn snapshots_decorations() {
        let users = vec![user(1, "a@x.com", false), user(2, "b@x.com", false)];
        let pill = build_user_pill(&Deco, "sender", &users, false).unwrap();
        let first = &pill.users[0];
        assert_eq!(first.img_src, "/avatar/1");
        assert_eq!(
            first.status_emoji_info.as_ref().map(|s| s.emoji_name.as_str()),
            Some("palm_tree")
        );
        assert!(!first.should_add_guest_user_indicator);
        assert!(!first.deactivated);

        let second = &pill.users[1];
        assert!(second.status_emoji_info.is_none());
        assert!(second.should_add_guest_user_indicator);
        assert!(second.deactivated);
    }

    #[test]
    fn inaccessible_user_is_never_deactivated() {
        let users = vec![user(3, "ghost@x.com", true)];
        let pill = build_user_pill(&Deco, "dm", &users, false).unwrap();
        assert!(!pill.users[0].deactivated);
    }

    #[test]
    fn empty_user_list_is_an_error() {
        let err = build_user_pill(&Deco, "sender", &[], false).unwrap_err();
        assert_eq!(
            err,
            PillError::EmptyUserPill {
                operator: "sender".to_string()
            }
        );
    }

    #[test]
    fn search_string_becomes_plain_pill_only_if_all_terms_valid() {
        let item = create_item_from_search_string(&Words, &NoMessages, "is:starred lunch").unwrap();
        assert_eq!(get_search_string_from_item(&item), "is:starred lunch");
        match item {
            Pill::Search(p) => assert_eq!(p.description_html, "2 terms"),
            other => panic!("expected a search pill, got {other:?}"),
        }

        assert!(create_item_from_search_string(&Words, &NoMessages, "is:starred id:42").is_none());
    }

    #[test]
    fn plain_pill_keeps_display_value() {
        let pill = build_plain_pill(&Words, "has:link");
        assert_eq!(pill.display_value, "has:link");
        assert_eq!(pill.description_html, "1 terms");
    }
}
