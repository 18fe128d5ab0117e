// ==========================================
// 주문 데이터 정제 - 原始表
// ==========================================
// 职责: 文件解析结果的统一表示（表头 + 行）
// ==========================================

use std::collections::HashMap;

/// 原始表
///
/// - headers: 去除首尾空白后的表头（保持原列顺序）
/// - rows: 每行为 表头 → 单元格文本,行顺序即文件顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// 由表头与按列排列的行构建（测试与内存调用方使用）
    ///
    /// 多出表头的单元格被忽略,缺少的单元格视为空
    pub fn from_rows(name: &str, headers: &[&str], rows: &[Vec<&str>]) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
        let mut table = Self::new(name, headers);
        for cells in rows {
            let values: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
            table.push_row(&values);
        }
        table
    }

    /// 追加一行；完全空白的行跳过
    ///
    /// # 返回
    /// - true: 已追加
    /// - false: 空白行被跳过
    pub fn push_row(&mut self, cells: &[String]) -> bool {
        let mut row_map = HashMap::new();
        for (col_idx, header) in self.headers.iter().enumerate() {
            let value = cells
                .get(col_idx)
                .map(|v| v.trim().to_string())
                .unwrap_or_default();
            row_map.insert(header.clone(), value);
        }

        if row_map.values().all(|v| v.is_empty()) {
            return false;
        }

        self.rows.push(row_map);
        true
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_skips_blank_rows() {
        let table = RawTable::from_rows(
            "ledger",
            &["수령자명", "주문수량"],
            &[vec!["김철수", "1"], vec!["", " "], vec!["이영희", "2"]],
        );

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].get("수령자명"), Some(&"이영희".to_string()));
    }

    #[test]
    fn test_short_rows_padded_with_empty() {
        let table = RawTable::from_rows("ledger", &["a", "b"], &[vec!["1"]]);
        assert_eq!(table.rows[0].get("b"), Some(&String::new()));
        assert!(table.has_column("a"));
        assert!(!table.has_column("c"));
    }
}
