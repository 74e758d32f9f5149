use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 交付方式取值域 (电子发票)
pub const DELIVERY_METHODS: [&str; 2] = ["邮箱交付", "上传客户供应发票平台"];

pub const EMAIL_DELIVERY: &str = "邮箱交付";

/// 单笔开票申请表单
///
/// 字段与批量导入记录有差异：金额保留表单原始文本，另有客户档案带出的
/// 开户信息、纸质发票盖章标记和交付方式。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceApplyForm {
    // 公司开票信息
    pub document_type: String,
    pub invoice_type: String,
    pub issuer: String,
    pub po_number: String,
    pub apply_amount_ex_tax: String,
    pub apply_amount: String,
    pub invoice_content: String,
    pub remark_content: String,

    // 客户开票信息
    pub customer: String,
    pub customer_archive: String,
    pub customer_name: String,
    pub tax_number: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_bank: String,
    pub bank_account: String,

    // 纸质发票邮寄信息
    pub mailing_address: String,
    pub recipient: String,
    pub recipient_phone: String,
    pub need_stamp: bool,

    // 电子发票发送信息
    pub delivery_method: String,
    pub receiving_email: String,
    pub delivery_format: String,

    // 其他信息
    pub other_remark: String,
    pub settlements: Vec<SettlementItem>,
}

/// 表单上关联的结算单条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementItem {
    pub order: String,
    pub name: String,
    pub project: String,
    pub project_name: String,
    pub amount: BigDecimal,
}

/// 客户开票档案 (选择档案后带出的开票信息)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerArchive {
    pub name: String,
    pub tax_number: String,
    pub phone: String,
    pub address: String,
    pub bank: String,
    pub bank_account: String,
}
