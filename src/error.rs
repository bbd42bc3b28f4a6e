use thiserror::Error;

/// 规范化流程的错误类型
///
/// 核心变换（数字转换、分段、剥离、规范化）本身不会失败，
/// 只有边界上的解析、加载和拼接操作会返回此错误。
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("无法识别的文档结构: {0}")]
    UnrecognizedShape(String),
    #[error("重复的单元 ID: {0}")]
    DuplicateSectionId(u32),
    #[error("配置无效: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;
