use csv::WriterBuilder;

use crate::error::{BatchError, Result};
use crate::models::InvoiceRequestRow;
use crate::service::processor::COLUMN_LABELS;

/// 模板内嵌的填写说明，占满表头前的 25 行
const TEMPLATE_INSTRUCTIONS: [&str; 25] = [
    "批量开票模板说明",
    "",
    "必填字段：",
    "• 单据类型：结算开票 或 预开票",
    "• 发票类型：纸质专票、电子普票、电子专票",
    "• 开票方：开票公司名称",
    "• PO编号：采购订单号，无则填写\"无\"",
    "• 申请金额（含税）：数字格式",
    "• 发票内容：开票项目内容",
    "• 发票备注栏打印内容：发票备注信息",
    "• 客户名称：客户公司名称",
    "• 客户开票档案：客户名称_纳税人识别号",
    "",
    "条件必填字段：",
    "纸质发票必填：邮寄地址、收件人、收件人电话",
    "电子发票必填：接收邮箱、交付格式（PDF或OFD）",
    "",
    "可选字段：",
    "• 关联结算单：多笔结算单格式为 编号:金额;编号:金额",
    "• 关联项目：多个项目格式为 编号:金额;编号:金额",
    "",
    "注意事项：",
    "1. 请严格按照模板格式填写数据，金额字段使用数字格式",
    "2. 发票类型必须从指定选项中选择，关联字段多个条目用分号分隔",
    "数据从第26行开始：",
];

/// 模板示例数据：一条纸质专票、一条电子普票
const TEMPLATE_EXAMPLES: [[&str; 16]; 2] = [
    [
        "结算开票",
        "纸质专票",
        "上海某某科技有限公司",
        "PO202401001",
        "11300",
        "技术服务费",
        "项目开发服务",
        "某某集团有限公司",
        "某某集团有限公司_91310000123456789X",
        "上海市浦东新区张江高科技园区某某路123号",
        "张三",
        "13800138000",
        "zhangsan@example.com",
        "PDF",
        "BS-21000001:10800.00;BS-21000002:500.00",
        "PRJ-2024001:8000.00;PRJ-2024002:3300.00",
    ],
    [
        "预开票",
        "电子普票",
        "上海某某科技有限公司",
        "无",
        "5000",
        "软件开发费",
        "软件定制开发",
        "某某有限公司",
        "某某有限公司_91310000987654321A",
        "",
        "",
        "",
        "lisi@example.com",
        "OFD",
        "",
        "PRJ-2024003:5000.00",
    ],
];

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| BatchError::Import(e.to_string()))
}

/// 生成导入模板：说明区 + 第 26 行表头 + 两条示例数据
pub fn write_template() -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());

    for line in TEMPLATE_INSTRUCTIONS {
        writer.write_record([line])?;
    }
    writer.write_record(COLUMN_LABELS)?;
    for example in TEMPLATE_EXAMPLES {
        writer.write_record(example)?;
    }

    finish(writer)
}

/// 导出批次结果：完整列集 + 提交状态 + 验证状态 + 错误信息
pub fn write_results(rows: &[InvoiceRequestRow]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());

    let mut header = vec!["序号"];
    header.extend(COLUMN_LABELS);
    header.extend(["提交状态", "验证状态", "错误信息"]);
    writer.write_record(&header)?;

    for row in rows {
        let status_text = row.status.map(|s| s.text()).unwrap_or("未知");
        writer.write_record([
            row.index.to_string(),
            row.document_type.clone(),
            row.invoice_type.clone(),
            row.invoice_company.clone(),
            row.po_number.clone(),
            row.amount.to_string(),
            row.invoice_content.clone(),
            row.remark_content.clone(),
            row.customer_name.clone(),
            row.customer_profile.clone(),
            row.mailing_address.clone(),
            row.recipient.clone(),
            row.recipient_phone.clone(),
            row.email.clone(),
            row.delivery_format.clone(),
            row.related_settlements.clone(),
            row.related_projects.clone(),
            status_text.to_string(),
            if row.is_valid { "有效" } else { "无效" }.to_string(),
            row.errors.join("; "),
        ])?;
    }

    finish(writer)
}
