use bigdecimal::{BigDecimal, Zero};

use crate::models::{
    InvoiceRequestRow, DELIVERY_FORMATS, DOCUMENT_TYPES, INVOICE_TYPES,
};
use crate::service::relation::validate_relations;

/// 校验必填字段
///
/// 固定字段顺序遍历：空值报「不能为空」，有取值域的字段越界时报「必须是：…」，
/// 遍历结束后追加金额为正校验。各项检查彼此独立，一次遍历可累积多条错误。
pub fn validate_required_fields(row: &mut InvoiceRequestRow) {
    // 金额以 0 表示缺失/无法解析，统一走空值分支
    let amount_text = if row.amount.is_zero() {
        String::new()
    } else {
        row.amount.to_string()
    };

    let document_types: &[&str] = &DOCUMENT_TYPES;
    let invoice_types: &[&str] = &INVOICE_TYPES;
    let checks: [(&str, &str, Option<&[&str]>); 9] = [
        (&row.document_type, "单据类型", Some(document_types)),
        (&row.invoice_type, "发票类型", Some(invoice_types)),
        (&row.invoice_company, "开票方", None),
        (&row.po_number, "PO编号", None),
        (&amount_text, "申请金额（含税）", None),
        (&row.invoice_content, "发票内容", None),
        (&row.remark_content, "发票备注栏打印内容", None),
        (&row.customer_name, "客户名称", None),
        (&row.customer_profile, "客户开票档案", None),
    ];

    let mut errors = Vec::new();
    for (value, name, domain) in checks {
        if value.trim().is_empty() {
            errors.push(format!("{}不能为空", name));
        } else if let Some(values) = domain {
            if !values.contains(&value) {
                errors.push(format!("{}必须是：{}", name, values.join("、")));
            }
        }
    }

    if row.amount <= BigDecimal::zero() {
        errors.push("申请金额必须大于0".to_string());
    }

    row.errors.extend(errors);
    row.is_valid = row.errors.is_empty();
}

/// 校验条件必填字段
///
/// 仅当发票类型命中对应取值时才校验；类型本身非法时纸质/电子字段一律不要求。
pub fn validate_conditional_fields(row: &mut InvoiceRequestRow) {
    let mut errors = Vec::new();

    if row.is_paper() {
        let paper_fields = [
            (&row.mailing_address, "邮寄地址"),
            (&row.recipient, "收件人"),
            (&row.recipient_phone, "收件人电话"),
        ];
        for (value, name) in paper_fields {
            if value.trim().is_empty() {
                errors.push(format!("纸质发票{}不能为空", name));
            }
        }
    }

    if row.is_electronic() {
        if row.email.trim().is_empty() {
            errors.push("电子发票接收邮箱不能为空".to_string());
        }
        if row.delivery_format.trim().is_empty() {
            errors.push("电子发票交付格式不能为空".to_string());
        } else if !DELIVERY_FORMATS.contains(&row.delivery_format.as_str()) {
            errors.push(format!("交付格式必须是：{}", DELIVERY_FORMATS.join("或")));
        }

        // 邮箱填了但格式不对，与空值是两种错误
        if !row.email.trim().is_empty() && !is_valid_email(&row.email) {
            errors.push("接收邮箱格式不正确".to_string());
        }
    }

    row.errors.extend(errors);
    row.is_valid = row.errors.is_empty();
}

/// 校验可选字段格式 (关联结算单 / 关联项目)
pub fn validate_optional_fields(row: &mut InvoiceRequestRow) {
    if !row.related_settlements.trim().is_empty() && !validate_relations(&row.related_settlements) {
        row.errors.push(
            "关联结算单格式错误，应为：编号:金额;编号:金额（如：BS-21000001:108.88;BS-21000002:999.99）"
                .to_string(),
        );
    }

    if !row.related_projects.trim().is_empty() && !validate_relations(&row.related_projects) {
        row.errors.push(
            "关联项目格式错误，应为：编号:金额;编号:金额（如：PRJ-2024001:8000.00;PRJ-2024002:3300.00）"
                .to_string(),
        );
    }

    row.is_valid = row.errors.is_empty();
}

/// local@domain.tld 形态检查，不含空白字符
pub(crate) fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
