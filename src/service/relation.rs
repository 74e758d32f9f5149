use bigdecimal::{BigDecimal, Zero};
use std::str::FromStr;

/// 解析关联单据文本，格式：编号:金额;编号:金额
///
/// 空白文本视为无关联，返回空列表；任意一段格式不合法则整个字段无效，
/// 返回 None (不做部分接受)。关联结算单和关联项目共用同一套语法。
pub fn parse_relation_pairs(text: &str) -> Option<Vec<(String, BigDecimal)>> {
    if text.trim().is_empty() {
        return Some(Vec::new());
    }

    let mut pairs = Vec::new();
    for item in text.split(';') {
        let item = item.trim();
        if item.is_empty() {
            continue; // 跳过空段
        }

        let mut parts = item.split(':');
        let (code, amount) = match (parts.next(), parts.next(), parts.next()) {
            (Some(code), Some(amount), None) => (code.trim(), amount.trim()),
            _ => return None,
        };

        if code.is_empty() {
            return None;
        }

        let value = BigDecimal::from_str(amount).ok()?;
        if value <= BigDecimal::zero() {
            return None;
        }

        pairs.push((code.to_string(), value));
    }

    Some(pairs)
}

/// 仅做格式校验
pub fn validate_relations(text: &str) -> bool {
    parse_relation_pairs(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_valid() {
        assert!(validate_relations(""));
        assert!(validate_relations("   "));
        assert_eq!(parse_relation_pairs("").unwrap().len(), 0);
    }

    #[test]
    fn two_valid_pairs() {
        let pairs = parse_relation_pairs("BS-1:100.00;BS-2:50").unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, "BS-1");
        assert_eq!(pairs[1].0, "BS-2");
        assert_eq!(pairs[1].1, BigDecimal::from(50));
    }

    #[test]
    fn missing_amount_invalidates_whole_field() {
        assert!(!validate_relations("BS-1:100;BS-2"));
    }

    #[test]
    fn non_positive_amount_is_invalid() {
        assert!(!validate_relations("BS-1:-5"));
        assert!(!validate_relations("BS-1:0"));
    }

    #[test]
    fn blank_code_is_invalid() {
        assert!(!validate_relations(":100"));
        assert!(!validate_relations("  :100"));
    }

    #[test]
    fn extra_colon_is_invalid() {
        assert!(!validate_relations("BS-1:100:200"));
    }

    #[test]
    fn empty_segments_are_skipped() {
        let pairs = parse_relation_pairs("BS-1:100;;BS-2:50;").unwrap();
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn non_numeric_amount_is_invalid() {
        assert!(!validate_relations("BS-1:abc"));
    }
}
