/// 搜索框输入事件（语义事件，不关心具体平台键值）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// 整体载入一个搜索串（粘贴、URL 同步、narrow 切换）：重建所有 pill
    Load(String),
    /// 替换搜索框里的文本（用户输入中；不做校验）
    Text(String),
    /// 回车：把搜索框文本转成 pill
    Enter,
    /// 文本为空时删除最后一个 pill，否则删除最后一个字符
    Backspace,
    /// 清空 pill 和文本
    Clear,
    /// 提交搜索
    Submit,
}

/// 引擎输出动作（对宿主 UI 的请求）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// 执行搜索（pill + 剩余文本拼成的完整搜索串）
    Search(String),
    /// 有输入不合法：让搜索框抖一下
    Shake,
}
