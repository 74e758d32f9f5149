use csv::ReaderBuilder;

use crate::error::{BatchError, Result};
use crate::service::processor::RowMap;

/// 表头所在物理行 (0 起始)，前 25 行为模板内嵌的填写说明
pub const HEADER_ROW: usize = 25;

/// 解析导入的表格数据
///
/// 跳过说明区，第 26 行作为表头，其后每行按表头标签映射为 RowMap；
/// 整行空白的记录丢弃。文件不可读或缺少表头时一次性报错，不产生部分状态。
pub fn parse_workbook(bytes: &[u8]) -> Result<Vec<RowMap>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?);
    }

    let header = records
        .get(HEADER_ROW)
        .ok_or_else(|| BatchError::Import("未找到表头行，数据应从第26行开始".to_string()))?;
    let labels: Vec<String> = header.iter().map(|c| c.trim().to_string()).collect();
    if labels.iter().all(String::is_empty) {
        return Err(BatchError::Import("表头行为空，请使用标准模板".to_string()));
    }

    let mut rows = Vec::new();
    for record in records.iter().skip(HEADER_ROW + 1) {
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let mut row = RowMap::new();
        for (label, cell) in labels.iter().zip(record.iter()) {
            if !label.is_empty() {
                row.insert(label.clone(), cell.trim().to_string());
            }
        }
        rows.push(row);
    }

    tracing::info!("导入解析完成: {} 条数据", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::export::write_template;

    #[test]
    fn template_round_trips_through_import() {
        let bytes = write_template().unwrap();
        let rows = parse_workbook(&bytes).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["单据类型"], "结算开票");
        assert_eq!(rows[0]["发票类型"], "纸质专票");
        assert_eq!(rows[1]["交付格式"], "OFD");
    }

    #[test]
    fn instruction_rows_are_skipped() {
        let bytes = write_template().unwrap();
        let rows = parse_workbook(&bytes).unwrap();
        // 说明文字不会混进数据
        assert!(rows
            .iter()
            .all(|r| r.values().all(|v| !v.contains("批量开票模板说明"))));
    }

    #[test]
    fn too_short_file_is_an_import_error() {
        let err = parse_workbook(b"a,b,c\n1,2,3\n").unwrap_err();
        assert!(matches!(err, BatchError::Import(_)));
    }

    #[test]
    fn blank_data_rows_are_dropped() {
        let mut text = String::new();
        for _ in 0..25 {
            text.push_str("说明\n");
        }
        text.push_str("单据类型,发票类型\n");
        text.push_str(",\n");
        text.push_str("结算开票,纸质专票\n");
        let rows = parse_workbook(text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["单据类型"], "结算开票");
    }
}
