use thiserror::Error;

/// I/O 边界与操作类错误
///
/// 行级校验错误不走这里，它们作为错误文案列表累积在记录上。
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("表格解析错误: {0}")]
    Csv(#[from] csv::Error),

    #[error("序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("导入失败: {0}")]
    Import(String),

    #[error("当前批次已生成申请编号，请先清空或重新导入")]
    AlreadyCommitted,

    #[error("未找到申请记录: {0}")]
    NotFound(String),

    #[error("当前状态不允许该操作: {0}")]
    InvalidStatus(String),

    #[error("请先上传附件！")]
    NoStagedFiles,
}

pub type Result<T> = std::result::Result<T, BatchError>;
