use axum::{
    body::Bytes,
    extract::{Json, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::excel;
use crate::models::{
    BatchStatistics, CustomerArchive, FileUpload, FilterCriteria, InvoiceApplyForm, InvoiceDetail,
    InvoiceRequestRow, SettlementItem, UploadOutcome, BATCH_STAGING_KEY,
};
use crate::service::{apply, processor, BatchCoordinator};

/// 共享状态：协调器是单逻辑执行体，互斥锁保证操作逐个完成
pub type SharedCoordinator = Arc<Mutex<BatchCoordinator>>;

/// 通用响应体
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

/// 导入响应体
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub message: String,
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub stats: Option<BatchStatistics>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub invoice_type: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub apply_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AttachmentRequest {
    pub owner: String,
    pub files: Vec<FileUpload>,
}

#[derive(Debug, Serialize)]
pub struct AttachmentResponse {
    pub success: bool,
    pub outcomes: Vec<UploadOutcome>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveAttachmentRequest {
    pub owner: String,
    pub file_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ApplyAttachmentsRequest {
    pub targets: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub id: Option<String>,
}

/// 单笔申请动作：保存草稿或直接提交
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyAction {
    Save,
    Submit,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub action: ApplyAction,
    pub form: InvoiceApplyForm,
    #[serde(default)]
    pub files: Vec<FileUpload>,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub success: bool,
    pub message: String,
    pub errors: Vec<String>,
    pub apply_id: Option<String>,
    pub uploads: Vec<UploadOutcome>,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 导入批量开票数据：解析 -> 逐行校验 -> 接收批次 -> 生成编号
pub async fn import_batch(State(state): State<SharedCoordinator>, body: Bytes) -> Response {
    let raw_rows = match excel::parse_workbook(&body) {
        Ok(rows) => rows,
        Err(e) => {
            // 输入格式错误一次性上报，不产生部分状态
            let response = ImportResponse {
                success: false,
                message: format!("Excel文件解析失败，请检查文件格式: {}", e),
                total: 0,
                valid: 0,
                invalid: 0,
                stats: None,
            };
            return (StatusCode::BAD_REQUEST, Json(response)).into_response();
        }
    };

    let rows = processor::process_rows(&raw_rows);
    let valid = rows.iter().filter(|r| r.is_valid).count();
    let invalid = rows.len() - valid;
    let total = rows.len();

    let mut coord = state.lock().await;
    coord.ingest(rows);
    match coord.commit() {
        Ok(stats) => {
            let response = ImportResponse {
                success: true,
                message: format!("导入完成: 共{}条，有效{}条，无效{}条", total, valid, invalid),
                total,
                valid,
                invalid,
                stats: Some(stats),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let response = ImportResponse {
                success: false,
                message: format!("Error: {}", e),
                total,
                valid,
                invalid,
                stats: None,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

/// 开票申请列表 (按状态/发票类型/搜索词筛选，仅有效记录)
pub async fn list_batch(
    State(state): State<SharedCoordinator>,
    Query(params): Query<ListParams>,
) -> Json<Vec<InvoiceRequestRow>> {
    let criteria = FilterCriteria::from_params(
        params.status.as_deref(),
        params.invoice_type.as_deref(),
        params.search.as_deref(),
    );
    let mut coord = state.lock().await;
    Json(coord.apply_filters(criteria))
}

/// 批次统计
pub async fn batch_stats(State(state): State<SharedCoordinator>) -> Json<BatchStatistics> {
    let coord = state.lock().await;
    Json(coord.statistics())
}

/// 提交单个申请；操作类失败返回 success=false，不视为服务错误
pub async fn submit_single(
    State(state): State<SharedCoordinator>,
    Json(req): Json<SubmitRequest>,
) -> Json<ActionResponse> {
    let mut coord = state.lock().await;
    match coord.submit(&req.apply_id) {
        Ok(()) => Json(ActionResponse {
            success: true,
            message: "提交成功！".to_string(),
        }),
        Err(e) => Json(ActionResponse {
            success: false,
            message: e.to_string(),
        }),
    }
}

/// 按导入序号查看错误详情
pub async fn error_detail(
    State(state): State<SharedCoordinator>,
    Path(index): Path<usize>,
) -> Response {
    let coord = state.lock().await;
    match coord.error_detail(index) {
        Some(row) => (StatusCode::OK, Json(row.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ActionResponse {
                success: false,
                message: format!("未找到第{}行的错误记录", index),
            }),
        )
            .into_response(),
    }
}

/// 按申请编号查看详情
pub async fn batch_detail(
    State(state): State<SharedCoordinator>,
    Path(apply_id): Path<String>,
) -> Response {
    let coord = state.lock().await;
    match coord.detail(&apply_id) {
        Some(row) => (StatusCode::OK, Json(row.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ActionResponse {
                success: false,
                message: format!("未找到申请记录: {}", apply_id),
            }),
        )
            .into_response(),
    }
}

/// 清空批次数据与附件
pub async fn clear_batch(State(state): State<SharedCoordinator>) -> Json<ActionResponse> {
    let mut coord = state.lock().await;
    coord.clear();
    Json(ActionResponse {
        success: true,
        message: "数据已清空".to_string(),
    })
}

fn csv_download(filename: &str, result: crate::error::Result<Vec<u8>>) -> Response {
    match result {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ActionResponse {
                success: false,
                message: format!("Error: {}", e),
            }),
        )
            .into_response(),
    }
}

/// 下载导入模板
pub async fn download_template() -> Response {
    csv_download("batch_invoice_template.csv", excel::write_template())
}

/// 导出批次结果
pub async fn export_results(State(state): State<SharedCoordinator>) -> Response {
    let coord = state.lock().await;
    csv_download("batch_invoice_results.csv", excel::write_results(coord.rows()))
}

/// 上传附件 (逐个文件校验，部分成功)
pub async fn add_attachments(
    State(state): State<SharedCoordinator>,
    Json(req): Json<AttachmentRequest>,
) -> Json<AttachmentResponse> {
    let mut coord = state.lock().await;
    let outcomes = coord.add_attachments(&req.owner, req.files);
    let success = outcomes.iter().any(|o| o.accepted);
    Json(AttachmentResponse { success, outcomes })
}

/// 移除单个附件
pub async fn remove_attachment(
    State(state): State<SharedCoordinator>,
    Json(req): Json<RemoveAttachmentRequest>,
) -> Json<ActionResponse> {
    let mut coord = state.lock().await;
    if coord.remove_attachment(&req.owner, &req.file_id) {
        Json(ActionResponse {
            success: true,
            message: "附件已移除".to_string(),
        })
    } else {
        Json(ActionResponse {
            success: false,
            message: "附件不存在".to_string(),
        })
    }
}

/// 把暂存附件分发到选中的申请
pub async fn apply_attachments(
    State(state): State<SharedCoordinator>,
    Json(req): Json<ApplyAttachmentsRequest>,
) -> Json<ActionResponse> {
    let mut coord = state.lock().await;
    match coord.apply_attachments_to(BATCH_STAGING_KEY, &req.targets) {
        Ok(_) => Json(ActionResponse {
            success: true,
            message: format!("附件已成功应用到 {} 个申请！", req.targets.len()),
        }),
        Err(e) => Json(ActionResponse {
            success: false,
            message: e.to_string(),
        }),
    }
}

/// 查询某申请下的附件列表
pub async fn list_attachments(
    State(state): State<SharedCoordinator>,
    Path(owner): Path<String>,
) -> Json<Vec<crate::models::AttachmentMeta>> {
    let coord = state.lock().await;
    Json(coord.attachments_of(&owner).to_vec())
}

/// 发票详情页数据：带 id 参数解析对应记录，否则返回默认记录
pub async fn invoice_detail(Query(query): Query<DetailQuery>) -> Json<InvoiceDetail> {
    match query.id {
        Some(id) if !id.is_empty() => Json(InvoiceDetail::resolve(&id)),
        _ => Json(InvoiceDetail::default_record()),
    }
}

/// 单笔开票申请：校验表单，提交时发号并登记附件，保存只做校验
pub async fn apply_invoice(
    State(state): State<SharedCoordinator>,
    Json(req): Json<ApplyRequest>,
) -> Json<ApplyResponse> {
    let errors = apply::validate_apply_form(&req.form);
    if !errors.is_empty() {
        return Json(ApplyResponse {
            success: false,
            message: errors[0].clone(),
            errors,
            apply_id: None,
            uploads: Vec::new(),
        });
    }

    match req.action {
        ApplyAction::Save => Json(ApplyResponse {
            success: true,
            message: "保存成功！".to_string(),
            errors: Vec::new(),
            apply_id: None,
            uploads: Vec::new(),
        }),
        ApplyAction::Submit => {
            let mut coord = state.lock().await;
            let apply_id = coord.allocate_apply_id();
            let uploads = coord.add_attachments(&apply_id, req.files);
            tracing::info!("单笔申请 {} 提交成功", apply_id);
            Json(ApplyResponse {
                success: true,
                message: "提交成功！".to_string(),
                errors: Vec::new(),
                apply_id: Some(apply_id),
                uploads,
            })
        }
    }
}

/// 按档案编号带出客户开票信息
pub async fn customer_archive(Path(archive_id): Path<String>) -> Response {
    match apply::lookup_customer_archive(&archive_id) {
        Some(archive) => (StatusCode::OK, Json::<CustomerArchive>(archive)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ActionResponse {
                success: false,
                message: format!("未找到客户开票档案: {}", archive_id),
            }),
        )
            .into_response(),
    }
}

/// 按结算单号带出结算单信息
pub async fn settlement_info(Path(order): Path<String>) -> Json<SettlementItem> {
    Json(apply::lookup_settlement(&order))
}
