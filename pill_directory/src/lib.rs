use std::{
    collections::{BTreeMap, BTreeSet},
    fs, io,
    path::Path,
};

use pill_core::{
    model::{Channel, StatusEmoji, User},
    resolver::{Decorations, Resolver},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("File System error: {0}")]
    Io(#[from] io::Error),
    #[error("TSV 第 {line} 行格式错误：{reason}")]
    Parse { line: usize, reason: String },
}

#[derive(Debug, Clone)]
struct Person {
    user: User,
    active: bool,
    is_guest: bool,
    status: Option<StatusEmoji>,
    avatar_url: Option<String>,
}

/// 内存中的用户/频道/消息目录。
///
/// TSV 格式（简化版）：
///
/// - `user<TAB>id<TAB>email<TAB>full name[<TAB>flags]`
///   flags 逗号分隔：`inactive`、`guest`、`inaccessible`、`status=<emoji_name>`、`avatar=<url>`
/// - `channel<TAB>id<TAB>name`
/// - `message<TAB>id`
/// - 允许 `#` 开头注释行
///
/// email 和频道名都不区分大小写：索引键小写存储，查询时同样小写化。
/// 频道的 `name` 保留原样。重复的 user id 或 email 视为格式错误。
#[derive(Debug, Clone)]
pub struct TsvDirectory {
    people: BTreeMap<u64, Person>,
    by_email: BTreeMap<String, u64>,
    channels: BTreeMap<String, Channel>,
    messages: BTreeSet<u64>,
    show_guest_indicator: bool,
}

impl Default for TsvDirectory {
    fn default() -> Self {
        Self {
            people: BTreeMap::new(),
            by_email: BTreeMap::new(),
            channels: BTreeMap::new(),
            messages: BTreeSet::new(),
            show_guest_indicator: true,
        }
    }
}

impl TsvDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let s = fs::read_to_string(path)?;
        Self::from_tsv_str(&s)
    }

    pub fn from_tsv_str(s: &str) -> Result<Self, DirectoryError> {
        let mut dir = Self::new();
        for (idx, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parse_err = |reason: &str| DirectoryError::Parse {
                line: idx + 1,
                reason: reason.to_string(),
            };
            let cols: Vec<&str> = line.split('\t').map(str::trim).collect();
            match cols.as_slice() {
                ["user", id, email, name, rest @ ..] => {
                    let user_id = id.parse::<u64>().map_err(|_| parse_err("user id 不是数字"))?;
                    if email.is_empty() || name.is_empty() {
                        return Err(parse_err("缺少 email/full name"));
                    }
                    if dir.people.contains_key(&user_id) {
                        return Err(parse_err("重复的 user id"));
                    }
                    if dir.by_email.contains_key(&email.to_ascii_lowercase()) {
                        return Err(parse_err("重复的 email"));
                    }
                    let flags: &str = rest.first().copied().unwrap_or("");
                    dir.insert_person(parse_person(user_id, email, name, flags).map_err(|r| parse_err(r.as_str()))?);
                }
                ["channel", id, name] => {
                    let stream_id = id.parse::<u64>().map_err(|_| parse_err("channel id 不是数字"))?;
                    if name.is_empty() {
                        return Err(parse_err("缺少 channel name"));
                    }
                    dir = dir.with_channel(stream_id, name);
                }
                ["message", id] => {
                    let message_id = id.parse::<u64>().map_err(|_| parse_err("message id 不是数字"))?;
                    dir = dir.with_message(message_id);
                }
                _ => return Err(parse_err("未知的记录类型或列数不对")),
            }
        }
        tracing::debug!(
            "loaded directory: {} users, {} channels, {} messages",
            dir.people.len(),
            dir.channels.len(),
            dir.messages.len()
        );
        Ok(dir)
    }

    /// 是否给 guest 用户加标记（对应组织设置）。
    pub fn show_guest_indicator(mut self, enabled: bool) -> Self {
        self.show_guest_indicator = enabled;
        self
    }

    pub fn with_user(mut self, user_id: u64, email: &str, full_name: &str) -> Self {
        self.insert_person(Person {
            user: User {
                user_id,
                email: email.to_ascii_lowercase(),
                full_name: full_name.to_string(),
                is_inaccessible_user: false,
            },
            active: true,
            is_guest: false,
            status: None,
            avatar_url: None,
        });
        self
    }

    pub fn with_channel(mut self, stream_id: u64, name: &str) -> Self {
        self.channels.insert(
            name.to_lowercase(),
            Channel {
                stream_id,
                name: name.to_string(),
            },
        );
        self
    }

    pub fn with_message(mut self, message_id: u64) -> Self {
        self.messages.insert(message_id);
        self
    }

    /// 修改已存在的用户；不存在时什么都不做。
    pub fn deactivate(&mut self, user_id: u64) {
        if let Some(p) = self.people.get_mut(&user_id) {
            p.active = false;
        }
    }

    pub fn set_guest(&mut self, user_id: u64, is_guest: bool) {
        if let Some(p) = self.people.get_mut(&user_id) {
            p.is_guest = is_guest;
        }
    }

    pub fn set_inaccessible(&mut self, user_id: u64) {
        if let Some(p) = self.people.get_mut(&user_id) {
            p.user.is_inaccessible_user = true;
        }
    }

    pub fn set_status(&mut self, user_id: u64, emoji_name: Option<&str>) {
        if let Some(p) = self.people.get_mut(&user_id) {
            p.status = emoji_name.map(|name| StatusEmoji {
                emoji_name: name.to_string(),
                emoji_code: None,
            });
        }
    }

    pub fn rename(&mut self, user_id: u64, full_name: &str) {
        if let Some(p) = self.people.get_mut(&user_id) {
            p.user.full_name = full_name.to_string();
        }
    }

    /// 同 id 的旧记录整体替换，旧 email 不再指向该用户。
    fn insert_person(&mut self, person: Person) {
        if let Some(old) = self.people.get(&person.user.user_id) {
            self.by_email.remove(&old.user.email);
        }
        self.by_email
            .insert(person.user.email.clone(), person.user.user_id);
        self.people.insert(person.user.user_id, person);
    }
}

fn parse_person(user_id: u64, email: &str, name: &str, flags: &str) -> Result<Person, String> {
    let mut person = Person {
        user: User {
            user_id,
            email: email.to_ascii_lowercase(),
            full_name: name.to_string(),
            is_inaccessible_user: false,
        },
        active: true,
        is_guest: false,
        status: None,
        avatar_url: None,
    };
    for flag in flags.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        match flag.split_once('=') {
            None if flag == "inactive" => person.active = false,
            None if flag == "guest" => person.is_guest = true,
            None if flag == "inaccessible" => person.user.is_inaccessible_user = true,
            Some(("status", emoji)) if !emoji.is_empty() => {
                person.status = Some(StatusEmoji {
                    emoji_name: emoji.to_string(),
                    emoji_code: None,
                });
            }
            Some(("avatar", url)) if !url.is_empty() => person.avatar_url = Some(url.to_string()),
            _ => return Err(format!("未知的 flag `{flag}`")),
        }
    }
    Ok(person)
}

impl Resolver for TsvDirectory {
    fn user_by_email(&self, email: &str) -> Option<User> {
        let user_id = self.by_email.get(&email.trim().to_ascii_lowercase())?;
        self.people.get(user_id).map(|p| p.user.clone())
    }

    fn channel_by_name(&self, name: &str) -> Option<Channel> {
        self.channels.get(&name.to_lowercase()).cloned()
    }

    fn message_exists(&self, message_id: u64) -> bool {
        self.messages.contains(&message_id)
    }
}

impl Decorations for TsvDirectory {
    fn avatar_url(&self, user: &User) -> String {
        self.people
            .get(&user.user_id)
            .and_then(|p| p.avatar_url.clone())
            .unwrap_or_else(|| format!("/avatar/{}?s=50", user.user_id))
    }

    fn status_emoji(&self, user_id: u64) -> Option<StatusEmoji> {
        self.people.get(&user_id).and_then(|p| p.status.clone())
    }

    fn should_add_guest_user_indicator(&self, user_id: u64) -> bool {
        self.show_guest_indicator && self.people.get(&user_id).is_some_and(|p| p.is_guest)
    }

    fn is_person_active(&self, user_id: u64) -> bool {
        self.people.get(&user_id).is_some_and(|p| p.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
# people
user\t1\tiago@zulip.com\tIago\tstatus=palm_tree
user\t2\thamlet@zulip.com\tKing Hamlet\tguest,inactive
user\t3\tghost@zulip.com\tUnknown user\tinactive,inaccessible

channel\t10\tDenmark
message\t42
";

    #[test]
    fn loads_all_record_kinds() {
        let dir = TsvDirectory::from_tsv_str(SAMPLE).unwrap();
        assert_eq!(dir.user_by_email("IAGO@zulip.com").map(|u| u.user_id), Some(1));
        assert_eq!(dir.channel_by_name("Denmark").map(|c| c.stream_id), Some(10));
        assert_eq!(
            dir.channel_by_name("denmark").map(|c| c.name),
            Some("Denmark".to_string())
        );
        assert!(dir.message_exists(42));
        assert!(!dir.message_exists(43));
    }

    #[test]
    fn flags_drive_decorations() {
        let dir = TsvDirectory::from_tsv_str(SAMPLE).unwrap();
        assert_eq!(dir.status_emoji(1).map(|s| s.emoji_name), Some("palm_tree".to_string()));
        assert!(dir.should_add_guest_user_indicator(2));
        assert!(!dir.is_person_active(2));
        assert!(dir.user_by_email("ghost@zulip.com").unwrap().is_inaccessible_user);

        let dir = dir.show_guest_indicator(false);
        assert!(!dir.should_add_guest_user_indicator(2));
    }

    #[test]
    fn default_avatar_url() {
        let dir = TsvDirectory::new().with_user(7, "a@x.com", "A");
        let user = dir.user_by_email("a@x.com").unwrap();
        assert_eq!(dir.avatar_url(&user), "/avatar/7?s=50");
    }

    #[test]
    fn reports_line_of_bad_record() {
        let err = TsvDirectory::from_tsv_str("channel\t1\tDenmark\nuser\tx\ta@x.com\tA\n").unwrap_err();
        match err {
            DirectoryError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }

        let err = TsvDirectory::from_tsv_str("user\t1\ta@x.com\tA\tsleepy\n").unwrap_err();
        assert!(err.to_string().contains("sleepy"));
    }

    #[test]
    fn rejects_duplicate_user_records() {
        let err = TsvDirectory::from_tsv_str("user\t1\ta@x.com\tA\nuser\t1\tb@x.com\tB\n").unwrap_err();
        match err {
            DirectoryError::Parse { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("user id"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = TsvDirectory::from_tsv_str("user\t1\ta@x.com\tA\nuser\t2\tA@X.com\tB\n").unwrap_err();
        assert!(matches!(err, DirectoryError::Parse { line: 2, .. }));
    }

    #[test]
    fn replacing_user_drops_old_email() {
        let dir = TsvDirectory::new()
            .with_user(1, "a@x.com", "A")
            .with_user(1, "b@x.com", "B");
        assert!(dir.user_by_email("a@x.com").is_none());
        assert_eq!(dir.user_by_email("b@x.com").map(|u| u.full_name), Some("B".to_string()));
    }

    #[test]
    fn channel_lookup_ignores_case() {
        let dir = TsvDirectory::new().with_channel(11, "Verona");
        assert_eq!(dir.channel_by_name("VERONA").map(|c| c.stream_id), Some(11));
        assert_eq!(dir.channel_by_name("verona").map(|c| c.name), Some("Verona".to_string()));
        assert!(dir.channel_by_name("Venice").is_none());
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let dir = TsvDirectory::from_path(file.path()).unwrap();
        assert!(dir.user_by_email("hamlet@zulip.com").is_some());

        let missing = TsvDirectory::from_path(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(DirectoryError::Io(_))));
    }
}
