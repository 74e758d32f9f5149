use chrono::Utc;
use indexmap::IndexMap;

use crate::error::{BatchError, Result};
use crate::models::{
    AttachmentMeta, BatchStatistics, FileUpload, FilterCriteria, InvoiceRequestRow, RowStatus,
    UploadOutcome,
};
use crate::service::attachments::AttachmentStore;

/// 申请编号生成器
///
/// 注入给协调器以便测试时替换为确定性实现。
pub trait ApplyIdGenerator: Send {
    fn next_id(&mut self) -> String;
}

/// 生产实现：毫秒时间戳 + 进程内单调序号，跨批次重复导入也不会撞号
#[derive(Debug, Default)]
pub struct TimestampIdGenerator {
    seq: u64,
}

impl ApplyIdGenerator for TimestampIdGenerator {
    fn next_id(&mut self) -> String {
        self.seq += 1;
        format!("BATCH_{}_{}", Utc::now().timestamp_millis(), self.seq)
    }
}

/// 批次协调器
///
/// 独占持有开票申请记录与附件存储，负责编号生成、状态流转、
/// 筛选与统计。单逻辑执行体，内部不做任何 I/O。
pub struct BatchCoordinator {
    rows: Vec<InvoiceRequestRow>,
    criteria: FilterCriteria,
    attachments: AttachmentStore,
    id_gen: Box<dyn ApplyIdGenerator>,
    committed: bool,
}

impl BatchCoordinator {
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(TimestampIdGenerator::default()))
    }

    pub fn with_id_generator(id_gen: Box<dyn ApplyIdGenerator>) -> Self {
        Self {
            rows: Vec::new(),
            criteria: FilterCriteria::default(),
            attachments: AttachmentStore::new(),
            id_gen,
            committed: false,
        }
    }

    /// 接收一批加工好的记录，替换现有集合；编号留到 commit 统一生成
    pub fn ingest(&mut self, rows: Vec<InvoiceRequestRow>) {
        self.rows = rows;
        self.criteria = FilterCriteria::default();
        self.committed = false;
    }

    /// 为整批记录生成申请编号并落定初始状态
    ///
    /// 有效记录置 pending，无效记录置 error (终态)。同一批次只允许
    /// commit 一次，重复调用直接报错而不是悄悄重新发号。
    pub fn commit(&mut self) -> Result<BatchStatistics> {
        if self.committed {
            return Err(BatchError::AlreadyCommitted);
        }

        for row in &mut self.rows {
            row.apply_id = Some(self.id_gen.next_id());
            row.status = Some(if row.is_valid {
                RowStatus::Pending
            } else {
                RowStatus::Error
            });
        }
        self.committed = true;
        self.criteria = FilterCriteria::default();

        let stats = self.statistics();
        let invalid = self.rows.len() - stats.total;
        tracing::info!(
            "批次处理完成: 共{}条，有效{}条，无效{}条",
            self.rows.len(),
            stats.total,
            invalid
        );
        Ok(stats)
    }

    /// 设置筛选条件并返回筛选结果
    ///
    /// 筛选永远只作用于校验通过的记录，各条件取 AND。
    pub fn apply_filters(&mut self, criteria: FilterCriteria) -> Vec<InvoiceRequestRow> {
        self.criteria = criteria;
        self.filtered_view()
    }

    /// 按当前条件计算筛选视图
    pub fn filtered_view(&self) -> Vec<InvoiceRequestRow> {
        let search = self.criteria.search_text.to_lowercase();
        self.rows
            .iter()
            .filter(|row| row.is_valid)
            .filter(|row| match self.criteria.status {
                Some(status) => row.status == Some(status),
                None => true,
            })
            .filter(|row| match &self.criteria.invoice_type {
                Some(t) => &row.invoice_type == t,
                None => true,
            })
            .filter(|row| {
                search.is_empty()
                    || row.customer_name.to_lowercase().contains(&search)
                    || row.po_number.to_lowercase().contains(&search)
            })
            .cloned()
            .collect()
    }

    /// 提交单个申请：pending -> submitted
    pub fn submit(&mut self, apply_id: &str) -> Result<()> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.apply_id.as_deref() == Some(apply_id))
            .ok_or_else(|| BatchError::NotFound(apply_id.to_string()))?;

        match row.status {
            Some(RowStatus::Pending) => {
                row.status = Some(RowStatus::Submitted);
                tracing::info!("申请 {} 提交成功", apply_id);
                Ok(())
            }
            Some(RowStatus::Submitted) => {
                Err(BatchError::InvalidStatus(format!("申请 {} 已提交", apply_id)))
            }
            Some(RowStatus::Error) | None => Err(BatchError::InvalidStatus(format!(
                "申请 {} 处于不可提交状态",
                apply_id
            ))),
        }
    }

    /// 只统计校验通过的记录
    pub fn statistics(&self) -> BatchStatistics {
        let valid: Vec<&InvoiceRequestRow> = self.rows.iter().filter(|r| r.is_valid).collect();
        BatchStatistics {
            total: valid.len(),
            submitted: valid
                .iter()
                .filter(|r| r.status == Some(RowStatus::Submitted))
                .count(),
            pending: valid
                .iter()
                .filter(|r| r.status == Some(RowStatus::Pending))
                .count(),
            error: valid
                .iter()
                .filter(|r| r.status == Some(RowStatus::Error))
                .count(),
        }
    }

    /// 按导入序号查无效记录 (错误详情入口，有效记录不在此路径)
    pub fn error_detail(&self, row_index: usize) -> Option<&InvoiceRequestRow> {
        self.rows
            .iter()
            .find(|r| r.index == row_index && !r.is_valid)
    }

    /// 按申请编号查有效记录
    pub fn detail(&self, apply_id: &str) -> Option<&InvoiceRequestRow> {
        self.rows
            .iter()
            .find(|r| r.apply_id.as_deref() == Some(apply_id) && r.is_valid)
    }

    /// 清空记录、筛选视图与全部附件
    pub fn clear(&mut self) {
        self.rows.clear();
        self.criteria = FilterCriteria::default();
        self.attachments.clear();
        self.committed = false;
        tracing::info!("数据已清空");
    }

    pub fn rows(&self) -> &[InvoiceRequestRow] {
        &self.rows
    }

    /// 单笔申请走同一个发号器，进程内不会与批次编号撞号
    pub fn allocate_apply_id(&mut self) -> String {
        self.id_gen.next_id()
    }

    // ---- 附件操作 ----

    pub fn add_attachments(&mut self, owner: &str, files: Vec<FileUpload>) -> Vec<UploadOutcome> {
        self.attachments.add(owner, files)
    }

    pub fn remove_attachment(&mut self, owner: &str, file_id: &str) -> bool {
        self.attachments.remove(owner, file_id)
    }

    pub fn apply_attachments_to(&mut self, source: &str, targets: &[String]) -> Result<usize> {
        self.attachments.apply_to_many(source, targets)
    }

    pub fn attachments_of(&self, owner: &str) -> &[AttachmentMeta] {
        self.attachments.list(owner)
    }

    pub fn attachment_map(&self) -> &IndexMap<String, Vec<AttachmentMeta>> {
        self.attachments.map()
    }

    /// 从快照重建：筛选视图与 commit 标记由记录内容推导
    pub fn restore(
        &mut self,
        rows: Vec<InvoiceRequestRow>,
        attachments: IndexMap<String, Vec<AttachmentMeta>>,
    ) {
        self.committed = rows.iter().any(|r| r.apply_id.is_some());
        self.rows = rows;
        self.criteria = FilterCriteria::default();
        self.attachments.restore(attachments);
    }
}

impl Default for BatchCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
