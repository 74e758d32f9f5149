use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 发票详情页记录 (演示数据，实际应由服务端提供)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDetail {
    pub apply_code: String,
    pub status: String,
    pub status_text: String,
    pub apply_time: String,
    pub applicant_name: String,
    pub department: String,
    pub phone: String,
    pub email: String,
    pub invoice_type: String,
    pub invoice_amount: BigDecimal,
    pub invoice_content: String,
    pub invoice_remark: String,
    pub project_name: String,
    pub project_code: String,
    pub project_manager: String,
    pub customer_name: String,
    pub tax_number: String,
    pub customer_address: String,
    pub bank_info: String,
    pub attachments: Vec<DetailAttachment>,
    pub approval_history: Vec<ApprovalRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailAttachment {
    pub name: String,
    pub size: String,
    pub kind: String,
    pub url: String,
}

/// 审批记录条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRecord {
    pub action: String,
    pub operator: String,
    pub time: String,
    pub remark: String,
    pub status: String,
}

/// 开票列表记录 (演示数据，对应列表页的查询结果)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceListItem {
    pub id: u64,
    pub invoice_code: String,
    pub apply_date: String,
    pub document_type: String,
    pub po_number: String,
    pub customer_name: String,
    pub invoice_name: String,
    pub applicant: String,
    pub apply_amount: BigDecimal,
    pub invoiced_amount: BigDecimal,
    pub remaining_amount: BigDecimal,
    pub received_amount: BigDecimal,
    pub status: String,
    pub link_status: String,
    pub current_handler: String,
    pub remark: String,
}

fn dec(text: &str) -> BigDecimal {
    BigDecimal::from_str(text).unwrap_or_default()
}

/// 开票列表演示数据
pub fn mock_invoice_list() -> Vec<InvoiceListItem> {
    vec![
        InvoiceListItem {
            id: 1,
            invoice_code: "IN-2500014".to_string(),
            apply_date: "2025-08-28".to_string(),
            document_type: "结算开票".to_string(),
            po_number: "无".to_string(),
            customer_name: "HORMEL".to_string(),
            invoice_name: "营销服务费".to_string(),
            applicant: "赵雷明".to_string(),
            apply_amount: dec("100.00"),
            invoiced_amount: dec("0.00"),
            remaining_amount: dec("0.00"),
            received_amount: dec("0.00"),
            status: "草稿".to_string(),
            link_status: "未关联".to_string(),
            current_handler: String::new(),
            remark: "广东省市场".to_string(),
        },
        InvoiceListItem {
            id: 2,
            invoice_code: "IN-2500012".to_string(),
            apply_date: "2025-08-26".to_string(),
            document_type: "结算开票".to_string(),
            po_number: "无".to_string(),
            customer_name: "维达".to_string(),
            invoice_name: "测试3444".to_string(),
            applicant: "赵雷明".to_string(),
            apply_amount: dec("100.00"),
            invoiced_amount: dec("100.00"),
            remaining_amount: dec("0.00"),
            received_amount: dec("0.00"),
            status: "审核中".to_string(),
            link_status: "已关联".to_string(),
            current_handler: "直点春".to_string(),
            remark: "云南白药集团".to_string(),
        },
        InvoiceListItem {
            id: 3,
            invoice_code: "IN-2500008".to_string(),
            apply_date: "2025-04-11".to_string(),
            document_type: "结算开票".to_string(),
            po_number: "无".to_string(),
            customer_name: "云南白药".to_string(),
            invoice_name: "健康产品销售".to_string(),
            applicant: "赵雷明".to_string(),
            apply_amount: dec("100600.00"),
            invoiced_amount: dec("0.00"),
            remaining_amount: dec("0.00"),
            received_amount: dec("0.00"),
            status: "草稿".to_string(),
            link_status: "未关联".to_string(),
            current_handler: String::new(),
            remark: "健康产品销售公司".to_string(),
        },
    ]
}

fn demo_attachments() -> Vec<DetailAttachment> {
    vec![
        DetailAttachment {
            name: "合同文件.pdf".to_string(),
            size: "2.5 MB".to_string(),
            kind: "pdf".to_string(),
            url: "/attachments/contract.pdf".to_string(),
        },
        DetailAttachment {
            name: "项目清单.xlsx".to_string(),
            size: "1.2 MB".to_string(),
            kind: "excel".to_string(),
            url: "/attachments/project-list.xlsx".to_string(),
        },
    ]
}

fn demo_history() -> Vec<ApprovalRecord> {
    vec![
        ApprovalRecord {
            action: "提交申请".to_string(),
            operator: "张三".to_string(),
            time: "2024-01-15 10:30".to_string(),
            remark: "提交开票申请，等待审核".to_string(),
            status: "submitted".to_string(),
        },
        ApprovalRecord {
            action: "待财务审核".to_string(),
            operator: "系统".to_string(),
            time: "当前状态".to_string(),
            remark: "申请已提交，等待财务部门审核".to_string(),
            status: "pending".to_string(),
        },
    ]
}

impl InvoiceDetail {
    /// 按列表 id 或发票编号解析详情；先查列表数据，查不到再按编号拼装
    pub fn resolve(id: &str) -> Self {
        mock_invoice_list()
            .into_iter()
            .find(|item| item.id.to_string() == id || item.invoice_code == id)
            .map(Self::from_list_item)
            .unwrap_or_else(|| Self::mock(id))
    }

    fn from_list_item(item: InvoiceListItem) -> Self {
        let status = match item.status.as_str() {
            "草稿" => "draft",
            "审核中" => "reviewing",
            _ => "pending",
        };
        Self {
            apply_code: item.invoice_code,
            status: status.to_string(),
            status_text: item.status,
            apply_time: item.apply_date,
            applicant_name: item.applicant,
            invoice_amount: item.apply_amount,
            invoice_content: item.invoice_name,
            invoice_remark: item.remark,
            customer_name: item.customer_name,
            ..Self::default_record()
        }
    }

    /// 按申请编号生成详情记录
    pub fn mock(apply_id: &str) -> Self {
        let mut detail = Self::default_record();
        detail.apply_code = format!("INV-2024-{:0>3}", apply_id);
        detail
    }

    /// 未携带编号参数时的兜底记录
    pub fn default_record() -> Self {
        Self {
            apply_code: "INV-2024-001".to_string(),
            status: "pending".to_string(),
            status_text: "待审核".to_string(),
            apply_time: "2024-01-15 10:30:00".to_string(),
            applicant_name: "张三".to_string(),
            department: "财务部".to_string(),
            phone: "13800138000".to_string(),
            email: "zhangsan@company.com".to_string(),
            invoice_type: "增值税专用发票".to_string(),
            invoice_amount: BigDecimal::from(100000),
            invoice_content: "技术服务费".to_string(),
            invoice_remark: "项目技术开发服务费用".to_string(),
            project_name: "企业管理系统开发项目".to_string(),
            project_code: "PRJ-2024-001".to_string(),
            project_manager: "李四".to_string(),
            customer_name: "北京科技有限公司".to_string(),
            tax_number: "91110000123456789X".to_string(),
            customer_address: "北京市朝阳区xxx路xxx号 010-12345678".to_string(),
            bank_info: "中国银行北京分行 1234567890123456789".to_string(),
            attachments: demo_attachments(),
            approval_history: demo_history(),
        }
    }
}
