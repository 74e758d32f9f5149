use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 单据类型取值域
pub const DOCUMENT_TYPES: [&str; 2] = ["结算开票", "预开票"];

/// 发票类型取值域
pub const INVOICE_TYPES: [&str; 3] = ["纸质专票", "电子普票", "电子专票"];

/// 交付格式取值域 (电子发票)
pub const DELIVERY_FORMATS: [&str; 2] = ["PDF", "OFD"];

pub const PAPER_SPECIAL: &str = "纸质专票";
pub const ELECTRONIC_GENERAL: &str = "电子普票";
pub const ELECTRONIC_SPECIAL: &str = "电子专票";

/// 开票申请状态
///
/// error 为终态 (导入校验失败的记录)；pending -> submitted 由用户提交触发，
/// 此外不存在其他状态迁移。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Pending,
    Submitted,
    Error,
}

impl RowStatus {
    /// 状态中文文案
    pub fn text(&self) -> &'static str {
        match self {
            RowStatus::Pending => "待提交",
            RowStatus::Submitted => "已提交",
            RowStatus::Error => "提交失败",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RowStatus::Pending),
            "submitted" => Some(RowStatus::Submitted),
            "error" => Some(RowStatus::Error),
            _ => None,
        }
    }
}

/// 一条导入的开票申请记录
///
/// 字段保留单元格原始文本 (类型域校验由 validator 负责，越界值也要能回显)，
/// 金额统一用 BigDecimal，无法解析时落为 0 再由校验报错。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRequestRow {
    /// 导入序号 (1 起始，同一批次内稳定)
    pub index: usize,
    pub document_type: String,
    pub invoice_type: String,
    pub invoice_company: String,
    pub po_number: String,
    pub amount: BigDecimal,
    pub invoice_content: String,
    pub remark_content: String,
    pub customer_name: String,
    /// 客户开票档案，格式：客户名称_纳税人识别号
    pub customer_profile: String,
    pub mailing_address: String,
    pub recipient: String,
    pub recipient_phone: String,
    pub email: String,
    pub delivery_format: String,
    pub related_settlements: String,
    pub related_projects: String,
    pub is_valid: bool,
    pub errors: Vec<String>,
    /// 申请编号，commit 时统一生成
    pub apply_id: Option<String>,
    pub status: Option<RowStatus>,
}

impl InvoiceRequestRow {
    pub fn is_paper(&self) -> bool {
        self.invoice_type == PAPER_SPECIAL
    }

    pub fn is_electronic(&self) -> bool {
        self.invoice_type == ELECTRONIC_GENERAL || self.invoice_type == ELECTRONIC_SPECIAL
    }
}
