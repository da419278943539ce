//! `serializer`：从当前 pill 状态生成规范搜索串（查询执行、URL 同步用）。

use crate::{container::PillContainer, model::Pill};

/// 所有 pill 的 display value，按顺序以单个空格连接。
pub fn current_search_string<C>(container: &C) -> String
where
    C: PillContainer<Pill> + ?Sized,
{
    let search_strings: Vec<&str> = container.items().iter().map(Pill::display_value).collect();
    search_strings.join(" ")
}

/// pill 部分 + 搜索框里剩余的文本（提交搜索时用）。
pub fn full_search_string<C>(container: &C) -> String
where
    C: PillContainer<Pill> + ?Sized,
{
    let pills: String = current_search_string(container);
    let text: &str = container.text().trim();
    match (pills.is_empty(), text.is_empty()) {
        (_, true) => pills,
        (true, false) => text.to_string(),
        (false, false) => format!("{pills} {text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{container::PillList, model::PlainPill};

    fn plain(s: &str) -> Pill {
        Pill::Search(PlainPill {
            display_value: s.to_string(),
            description_html: String::new(),
        })
    }

    #[test]
    fn joins_with_single_space() {
        let mut list = PillList::new();
        assert_eq!(current_search_string(&list), "");
        list.append_validated(plain("is:starred"));
        list.append_validated(plain("channel:Denmark"));
        assert_eq!(current_search_string(&list), "is:starred channel:Denmark");
    }

    #[test]
    fn full_string_appends_trimmed_text() {
        let mut list = PillList::new();
        list.set_text("  lunch  ");
        assert_eq!(full_search_string(&list), "lunch");
        list.append_validated(plain("is:starred"));
        assert_eq!(full_search_string(&list), "is:starred lunch");
        list.clear_text();
        assert_eq!(full_search_string(&list), "is:starred");
    }
}
