use bigdecimal::BigDecimal;

use crate::models::apply::{CustomerArchive, InvoiceApplyForm, SettlementItem, EMAIL_DELIVERY};
use crate::models::{ELECTRONIC_GENERAL, ELECTRONIC_SPECIAL, PAPER_SPECIAL};

/// 校验单笔开票申请表单
///
/// 必填项逐个检查后再查条件必填项，错误全部累积返回。金额在表单侧只查
/// 填写与否 (输入控件已限定数字)，不做数值校验。
pub fn validate_apply_form(form: &InvoiceApplyForm) -> Vec<String> {
    let required = [
        (&form.document_type, "单据类型"),
        (&form.invoice_type, "发票类型"),
        (&form.issuer, "开票方"),
        (&form.po_number, "PO编号"),
        (&form.apply_amount, "申请金额"),
        (&form.invoice_content, "发票内容"),
        (&form.remark_content, "发票备注栏打印内容"),
        (&form.customer, "客户"),
        (&form.customer_archive, "客户开票档案"),
    ];

    let mut errors = Vec::new();
    for (value, name) in required {
        if value.trim().is_empty() {
            errors.push(format!("请填写{}", name));
        }
    }

    if form.invoice_type == PAPER_SPECIAL {
        if form.mailing_address.trim().is_empty() {
            errors.push("纸质发票类型需要填写邮寄地址".to_string());
        }
    } else if form.invoice_type == ELECTRONIC_GENERAL || form.invoice_type == ELECTRONIC_SPECIAL {
        if form.delivery_method.trim().is_empty() {
            errors.push("电子发票类型需要选择交付方式".to_string());
        }
        if form.delivery_method == EMAIL_DELIVERY && form.receiving_email.trim().is_empty() {
            errors.push("邮箱交付方式需要填写接收邮箱".to_string());
        }
        if form.delivery_format.trim().is_empty() {
            errors.push("电子发票需要选择交付格式".to_string());
        }
    }

    errors
}

/// 按档案编号带出客户开票信息 (演示数据，实际应由档案系统提供)
pub fn lookup_customer_archive(archive_id: &str) -> Option<CustomerArchive> {
    match archive_id {
        "archive1" => Some(CustomerArchive {
            name: "示例客户有限公司".to_string(),
            tax_number: "91310000123456789X".to_string(),
            phone: "021-12345678".to_string(),
            address: "上海市浦东新区示例路123号".to_string(),
            bank: "中国银行上海分行".to_string(),
            bank_account: "1234567890123456789".to_string(),
        }),
        _ => None,
    }
}

/// 按结算单号带出结算单信息，未知单号回退为占位文案
pub fn lookup_settlement(order: &str) -> SettlementItem {
    let (name, project, project_name) = match order {
        "ST001" => (
            "2024年1月技术服务结算",
            "PRJ001",
            "智能管理系统开发项目",
        ),
        _ => ("结算单名称", "项目编号", "项目名称"),
    };
    SettlementItem {
        order: order.to_string(),
        name: name.to_string(),
        project: project.to_string(),
        project_name: project_name.to_string(),
        amount: BigDecimal::from(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_paper_form() -> InvoiceApplyForm {
        InvoiceApplyForm {
            document_type: "结算开票".to_string(),
            invoice_type: "纸质专票".to_string(),
            issuer: "上海智士网络科技有限公司".to_string(),
            po_number: "PO202401001".to_string(),
            apply_amount: "11300".to_string(),
            invoice_content: "*信息技术服务*技术服务费".to_string(),
            remark_content: "项目开发服务".to_string(),
            customer: "某某集团有限公司".to_string(),
            customer_archive: "archive1".to_string(),
            mailing_address: "上海市浦东新区某某路123号".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_paper_form_passes() {
        assert!(validate_apply_form(&valid_paper_form()).is_empty());
    }

    #[test]
    fn missing_required_fields_accumulate() {
        let mut form = valid_paper_form();
        form.po_number = String::new();
        form.customer_archive = "  ".to_string();
        let errors = validate_apply_form(&form);
        assert!(errors.contains(&"请填写PO编号".to_string()));
        assert!(errors.contains(&"请填写客户开票档案".to_string()));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn paper_form_requires_mailing_address() {
        let mut form = valid_paper_form();
        form.mailing_address = String::new();
        let errors = validate_apply_form(&form);
        assert_eq!(errors, vec!["纸质发票类型需要填写邮寄地址".to_string()]);
    }

    #[test]
    fn electronic_form_requires_delivery_method_and_format() {
        let mut form = valid_paper_form();
        form.invoice_type = "电子普票".to_string();
        form.mailing_address = String::new();
        let errors = validate_apply_form(&form);
        assert!(errors.contains(&"电子发票类型需要选择交付方式".to_string()));
        assert!(errors.contains(&"电子发票需要选择交付格式".to_string()));
        // 纸质字段不再要求
        assert!(!errors.iter().any(|e| e.contains("邮寄地址")));
    }

    #[test]
    fn email_delivery_requires_receiving_email() {
        let mut form = valid_paper_form();
        form.invoice_type = "电子专票".to_string();
        form.delivery_method = "邮箱交付".to_string();
        form.delivery_format = "PDF".to_string();
        let errors = validate_apply_form(&form);
        assert_eq!(errors, vec!["邮箱交付方式需要填写接收邮箱".to_string()]);

        form.receiving_email = "lisi@example.com".to_string();
        assert!(validate_apply_form(&form).is_empty());
    }

    #[test]
    fn platform_delivery_does_not_require_email() {
        let mut form = valid_paper_form();
        form.invoice_type = "电子普票".to_string();
        form.delivery_method = "上传客户供应发票平台".to_string();
        form.delivery_format = "OFD".to_string();
        assert!(validate_apply_form(&form).is_empty());
    }

    #[test]
    fn archive_lookup_autofills_known_id() {
        let archive = lookup_customer_archive("archive1").unwrap();
        assert_eq!(archive.name, "示例客户有限公司");
        assert_eq!(archive.tax_number, "91310000123456789X");
        assert!(lookup_customer_archive("archive9").is_none());
    }

    #[test]
    fn settlement_lookup_falls_back_to_placeholder() {
        let known = lookup_settlement("ST001");
        assert_eq!(known.name, "2024年1月技术服务结算");
        let unknown = lookup_settlement("ST999");
        assert_eq!(unknown.order, "ST999");
        assert_eq!(unknown.name, "结算单名称");
    }
}
