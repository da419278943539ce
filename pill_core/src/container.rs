//! `container`：pill 输入框的窄接口。
//!
//! core 只通过这几个操作驱动外部控件（焦点、键盘、渲染都不归 core 管）。

/// pill 容器：有序 pill 列表 + 一段可编辑文本。
pub trait PillContainer<P> {
    /// 追加一个已经校验过的 pill。
    fn append_validated(&mut self, item: P);

    /// 清空所有 pill（不动文本）。
    fn clear(&mut self);

    /// 清空文本。
    fn clear_text(&mut self);

    fn set_text(&mut self, text: &str);

    fn text(&self) -> &str;

    fn items(&self) -> &[P];

    /// 删除最后一个 pill。
    fn pop(&mut self) -> Option<P>;

    /// 由文本创建 pill 并追加；`create_item` 返回 `None` 表示文本不合法，容器不变。
    fn append_value(&mut self, text: &str, create_item: &dyn Fn(&str) -> Option<P>) -> bool {
        match create_item(text) {
            Some(item) => {
                self.append_validated(item);
                true
            }
            None => false,
        }
    }
}

/// 内存实现（CLI/测试用）。
#[derive(Debug, Clone)]
pub struct PillList<P> {
    items: Vec<P>,
    text: String,
}

impl<P> Default for PillList<P> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            text: String::new(),
        }
    }
}

impl<P> PillList<P> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P> PillContainer<P> for PillList<P> {
    fn append_validated(&mut self, item: P) {
        self.items.push(item);
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn clear_text(&mut self) {
        self.text.clear();
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn items(&self) -> &[P] {
        &self.items
    }

    fn pop(&mut self) -> Option<P> {
        self.items.pop()
    }
}
