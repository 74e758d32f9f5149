use serde::{Deserialize, Serialize};

/// 批量上传时的暂存键，apply 分发后删除
pub const BATCH_STAGING_KEY: &str = "batch";

/// 附件大小上限 10MB
pub const MAX_ATTACHMENT_SIZE: u64 = 10 * 1024 * 1024;

/// 允许的附件媒体类型
pub const ALLOWED_MIME_TYPES: [&str; 8] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "image/jpeg",
    "image/jpg",
    "image/png",
];

/// 附件元信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentMeta {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub mime: String,
}

/// 待上传的文件描述 (校验输入)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUpload {
    pub name: String,
    pub size: u64,
    pub mime: String,
}

/// 单个文件的上传结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub name: String,
    pub accepted: bool,
    pub message: Option<String>,
}
