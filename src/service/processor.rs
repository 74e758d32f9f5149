use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::str::FromStr;

use crate::models::InvoiceRequestRow;
use crate::service::validator::{
    validate_conditional_fields, validate_optional_fields, validate_required_fields,
};

/// 一行原始数据：表头标签 -> 单元格文本
pub type RowMap = HashMap<String, String>;

/// 模板表头 (导入与导出共用)
pub const COLUMN_LABELS: [&str; 16] = [
    "单据类型",
    "发票类型",
    "开票方",
    "PO编号",
    "申请金额（含税）",
    "发票内容",
    "发票备注栏打印内容",
    "客户名称",
    "客户开票档案",
    "邮寄地址",
    "收件人",
    "收件人电话",
    "接收邮箱",
    "交付格式",
    "关联结算单",
    "关联项目",
];

fn cell(raw: &RowMap, label: &str) -> String {
    raw.get(label).cloned().unwrap_or_default()
}

/// 把一行原始数据加工成开票申请记录
///
/// 缺失单元格回退为空串/零，缺失本身交由校验环节报错。三轮校验依次执行，
/// 错误累积到同一个列表；申请编号与状态留待批次 commit 时统一赋予。
pub fn process_row(raw: &RowMap, index: usize) -> InvoiceRequestRow {
    let amount_text = cell(raw, "申请金额（含税）");
    let amount = BigDecimal::from_str(amount_text.trim()).unwrap_or_else(|_| BigDecimal::from(0));

    let mut row = InvoiceRequestRow {
        index,
        document_type: cell(raw, "单据类型"),
        invoice_type: cell(raw, "发票类型"),
        invoice_company: cell(raw, "开票方"),
        po_number: cell(raw, "PO编号"),
        amount,
        invoice_content: cell(raw, "发票内容"),
        remark_content: cell(raw, "发票备注栏打印内容"),
        customer_name: cell(raw, "客户名称"),
        customer_profile: cell(raw, "客户开票档案"),
        mailing_address: cell(raw, "邮寄地址"),
        recipient: cell(raw, "收件人"),
        recipient_phone: cell(raw, "收件人电话"),
        email: cell(raw, "接收邮箱"),
        delivery_format: cell(raw, "交付格式"),
        related_settlements: cell(raw, "关联结算单"),
        related_projects: cell(raw, "关联项目"),
        is_valid: true,
        errors: Vec::new(),
        apply_id: None,
        status: None,
    };

    validate_required_fields(&mut row);
    validate_conditional_fields(&mut row);
    validate_optional_fields(&mut row);

    row
}

/// 批量加工，序号从 1 开始
pub fn process_rows(raw_rows: &[RowMap]) -> Vec<InvoiceRequestRow> {
    raw_rows
        .iter()
        .enumerate()
        .map(|(i, raw)| process_row(raw, i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper_row_map() -> RowMap {
        let mut m = RowMap::new();
        m.insert("单据类型".into(), "结算开票".into());
        m.insert("发票类型".into(), "纸质专票".into());
        m.insert("开票方".into(), "上海某某科技有限公司".into());
        m.insert("PO编号".into(), "PO202401001".into());
        m.insert("申请金额（含税）".into(), "11300".into());
        m.insert("发票内容".into(), "技术服务费".into());
        m.insert("发票备注栏打印内容".into(), "项目开发服务".into());
        m.insert("客户名称".into(), "某某集团有限公司".into());
        m.insert("客户开票档案".into(), "某某集团有限公司_91310000123456789X".into());
        m.insert("邮寄地址".into(), "上海市浦东新区某某路123号".into());
        m.insert("收件人".into(), "张三".into());
        m.insert("收件人电话".into(), "13800138000".into());
        m
    }

    #[test]
    fn valid_row_has_no_errors() {
        let row = process_row(&paper_row_map(), 1);
        assert!(row.is_valid);
        assert!(row.errors.is_empty());
        assert_eq!(row.index, 1);
        assert!(row.apply_id.is_none());
        assert!(row.status.is_none());
    }

    #[test]
    fn is_valid_always_mirrors_error_list() {
        let mut raw = paper_row_map();
        raw.remove("客户开票档案");
        raw.insert("关联项目".into(), "PRJ-1:-3".into());
        let row = process_row(&raw, 2);
        assert_eq!(row.is_valid, row.errors.is_empty());
        assert!(!row.is_valid);
    }

    #[test]
    fn missing_cells_fall_back_to_empty() {
        let raw = RowMap::new();
        let row = process_row(&raw, 1);
        assert!(!row.is_valid);
        assert!(row.errors.contains(&"单据类型不能为空".to_string()));
        assert!(row.errors.contains(&"申请金额必须大于0".to_string()));
    }

    #[test]
    fn non_numeric_amount_becomes_zero_and_errors() {
        let mut raw = paper_row_map();
        raw.insert("申请金额（含税）".into(), "一万".into());
        let row = process_row(&raw, 1);
        assert!(row.errors.contains(&"申请金额必须大于0".to_string()));
    }

    #[test]
    fn process_rows_assigns_one_based_indexes() {
        let rows = process_rows(&[paper_row_map(), paper_row_map()]);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[1].index, 2);
    }
}
