use thiserror::Error;

/// core 对外暴露的错误。
///
/// 用户输入错误（条件校验失败等）不会出现在这里：它们只体现为搜索框文本 + shake。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PillError {
    #[error("cannot build a `{operator}` pill without any users")]
    EmptyUserPill { operator: String },
    #[error("Invalid config: {0}")]
    Config(String),
}

impl From<toml::de::Error> for PillError {
    fn from(src: toml::de::Error) -> PillError {
        PillError::Config(format!("Toml deserialization error: {src}"))
    }
}

pub type Result<T> = std::result::Result<T, PillError>;
