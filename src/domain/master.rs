// ==========================================
// 주문 데이터 정제 - 商品主数据
// ==========================================
// 职责: SKU → 课税区分 / 入数（箱规）查询表
// 红线: 只读；重复 SKU 以首次出现为准
// ==========================================

use crate::domain::types::TaxStatus;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 商品主数据条目
///
/// tax_status / pack_multiplier 为 None 表示主数据中该字段为空或无法识别
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMasterEntry {
    pub sku_code: String,
    pub tax_status: Option<TaxStatus>,
    pub pack_multiplier: Option<i64>,
}

/// 商品主数据查询表
#[derive(Debug, Clone, Default)]
pub struct ProductMaster {
    entries: HashMap<String, ProductMasterEntry>,
}

impl ProductMaster {
    /// 空主数据（所有商品均视为未登记）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 从条目列表构建（重复 SKU 保留首次出现）
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ProductMasterEntry>,
    {
        let mut map = HashMap::new();
        for entry in entries {
            if entry.sku_code.is_empty() {
                continue;
            }
            map.entry(entry.sku_code.clone()).or_insert(entry);
        }
        Self { entries: map }
    }

    pub fn get(&self, sku_code: &str) -> Option<&ProductMasterEntry> {
        self.entries.get(sku_code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, status: TaxStatus, multiplier: i64) -> ProductMasterEntry {
        ProductMasterEntry {
            sku_code: code.to_string(),
            tax_status: Some(status),
            pack_multiplier: Some(multiplier),
        }
    }

    #[test]
    fn test_duplicates_keep_first() {
        let master = ProductMaster::from_entries(vec![
            entry("A001", TaxStatus::Taxed, 6),
            entry("A001", TaxStatus::Exempt, 12),
            entry("B002", TaxStatus::Exempt, 1),
        ]);

        assert_eq!(master.len(), 2);
        let a = master.get("A001").unwrap();
        assert_eq!(a.tax_status, Some(TaxStatus::Taxed));
        assert_eq!(a.pack_multiplier, Some(6));
    }

    #[test]
    fn test_blank_sku_ignored() {
        let master = ProductMaster::from_entries(vec![entry("", TaxStatus::Taxed, 1)]);
        assert!(master.is_empty());
        assert!(master.get("").is_none());
    }
}
