use serde::{Deserialize, Serialize};

use super::RowStatus;

/// 列表筛选条件，各条件取 AND；None 表示不限 (前端的 "all")
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub status: Option<RowStatus>,
    pub invoice_type: Option<String>,
    pub search_text: String,
}

impl FilterCriteria {
    /// 从查询参数构建，"all"/空串视为不限
    pub fn from_params(status: Option<&str>, invoice_type: Option<&str>, search: Option<&str>) -> Self {
        let status = status.filter(|s| *s != "all").and_then(RowStatus::parse);
        let invoice_type = invoice_type
            .filter(|t| *t != "all" && !t.is_empty())
            .map(str::to_string);
        Self {
            status,
            invoice_type,
            search_text: search.unwrap_or_default().to_string(),
        }
    }
}

/// 批次统计 (只统计校验通过的记录)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStatistics {
    pub total: usize,
    pub submitted: usize,
    pub pending: usize,
    pub error: usize,
}
