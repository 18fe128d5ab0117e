// ==========================================
// 주문 데이터 정제 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 金额与数量转换
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

// 金额中允许出现并需剔除的字符
const AMOUNT_NOISE: &[char] = &[',', '₩', '원', '$', ' ', '\u{a0}'];

/// 单元格金额绝对值上限（千万亿）
///
/// 渠道金额相加后仍在 i64 范围内,会计行的整数换算不会溢出
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn parse_amount(&self, field: &str, value: &str) -> ImportResult<Decimal> {
        let stripped: String = value
            .trim()
            .chars()
            .filter(|c| !AMOUNT_NOISE.contains(c))
            .collect();

        if stripped.is_empty() {
            return Ok(Decimal::ZERO);
        }

        Decimal::from_str(&stripped)
            .or_else(|_| Decimal::from_scientific(&stripped))
            .map(|d| d.normalize())
            .map_err(|_| ImportError::TypeConversionError {
                field: field.to_string(),
                value: value.to_string(),
                message: format!("无法解析为金额: {}", value),
            })
            .and_then(|amount| {
                if amount.abs() > Decimal::from(MAX_AMOUNT) {
                    Err(ImportError::TypeConversionError {
                        field: field.to_string(),
                        value: value.to_string(),
                        message: format!("金额超出范围: {}", value),
                    })
                } else {
                    Ok(amount)
                }
            })
    }

    fn parse_quantity(&self, field: &str, value: &str) -> ImportResult<i64> {
        let amount = self.parse_amount(field, value)?;
        amount
            .trunc()
            .to_i64()
            .ok_or_else(|| ImportError::TypeConversionError {
                field: field.to_string(),
                value: value.to_string(),
                message: format!("数量超出范围: {}", value),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_basic() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_text("  김철수  "), "김철수");
    }

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some("  ".to_string())), None);
        assert_eq!(cleaner.normalize_null(Some("".to_string())), None);
        assert_eq!(
            cleaner.normalize_null(Some("  value  ".to_string())),
            Some("value".to_string())
        );
        assert_eq!(cleaner.normalize_null(None), None);
    }

    #[test]
    fn test_parse_amount_strips_separators() {
        let cleaner = DataCleaner;
        assert_eq!(
            cleaner.parse_amount("금액", "12,500").unwrap(),
            Decimal::from(12500)
        );
        assert_eq!(
            cleaner.parse_amount("금액", "₩ 1,000원").unwrap(),
            Decimal::from(1000)
        );
        assert_eq!(
            cleaner.parse_amount("금액", "10000.0").unwrap(),
            Decimal::from(10000)
        );
        assert_eq!(
            cleaner.parse_amount("금액", "-3,000").unwrap(),
            Decimal::from(-3000)
        );
    }

    #[test]
    fn test_parse_amount_empty_is_zero() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_amount("금액", "").unwrap(), Decimal::ZERO);
        assert_eq!(cleaner.parse_amount("금액", "  ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_invalid() {
        let cleaner = DataCleaner;
        let result = cleaner.parse_amount("금액", "무료");
        assert!(matches!(
            result,
            Err(ImportError::TypeConversionError { ref field, .. }) if field == "금액"
        ));
    }

    #[test]
    fn test_parse_amount_out_of_range() {
        let cleaner = DataCleaner;
        assert!(cleaner.parse_amount("금액", "99999999999999999999").is_err());
        assert!(cleaner.parse_amount("금액", "-1,000,000,000,000,001").is_err());
        assert_eq!(
            cleaner.parse_amount("금액", "1,000,000,000,000,000").unwrap(),
            Decimal::from(MAX_AMOUNT)
        );
    }

    #[test]
    fn test_parse_quantity() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_quantity("주문수량", "2").unwrap(), 2);
        assert_eq!(cleaner.parse_quantity("주문수량", "2.0").unwrap(), 2);
        assert_eq!(cleaner.parse_quantity("주문수량", "3.7").unwrap(), 3);
        assert_eq!(cleaner.parse_quantity("주문수량", "").unwrap(), 0);
        assert!(cleaner.parse_quantity("주문수량", "two").is_err());
    }
}
