// ==========================================
// 주문 데이터 정제 - 会计上传行
// ==========================================
// 职责: 会计系统（이카운트）上传格式
// 红线: 列顺序固定,接收方依赖列位置
// ==========================================

use serde::{Deserialize, Serialize};

/// 会计上传固定列（27 列,顺序不可变）
pub const ACCOUNTING_COLUMNS: [&str; 27] = [
    "일자",
    "순번",
    "거래처코드",
    "거래처명",
    "담당자",
    "출하창고",
    "거래유형",
    "통화",
    "환율",
    "적요_전표",
    "미수금",
    "총합계",
    "연결전표",
    "품목코드",
    "품목명",
    "규격",
    "박스",
    "수량",
    "단가",
    "외화금액",
    "공급가액",
    "부가세",
    "적요_품목",
    "생산전표생성",
    "시리얼/로트",
    "관리항목",
    "쇼핑몰고객명",
];

/// 会计上传行
///
/// 未列出的透传列在输出时为空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingRow {
    pub date: String,
    pub client_name: String,
    pub warehouse: String,
    pub transaction_type: u8,
    pub voucher_memo: String,
    pub item_code: String,
    pub box_count: Option<i64>,
    pub quantity: i64,
    pub supply_amount: i64,
    pub vat_amount: i64,
    pub customer_name: String,
    pub sequence_index: usize,
}

impl AccountingRow {
    /// 按 ACCOUNTING_COLUMNS 顺序展开为单元格
    pub fn to_cells(&self) -> Vec<String> {
        ACCOUNTING_COLUMNS
            .iter()
            .map(|column| match *column {
                "일자" => self.date.clone(),
                "거래처명" => self.client_name.clone(),
                "출하창고" => self.warehouse.clone(),
                "거래유형" => self.transaction_type.to_string(),
                "적요_전표" => self.voucher_memo.clone(),
                "품목코드" => self.item_code.clone(),
                "박스" => self.box_count.map(|b| b.to_string()).unwrap_or_default(),
                "수량" => self.quantity.to_string(),
                "공급가액" => self.supply_amount.to_string(),
                "부가세" => self.vat_amount.to_string(),
                "쇼핑몰고객명" => self.customer_name.clone(),
                _ => String::new(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cells_layout() {
        let row = AccountingRow {
            date: "20261019".to_string(),
            client_name: "스토어팜".to_string(),
            warehouse: "고래미".to_string(),
            transaction_type: 11,
            voucher_memo: "오전/온라인".to_string(),
            item_code: "A001".to_string(),
            box_count: None,
            quantity: 3,
            supply_amount: 9091,
            vat_amount: 909,
            customer_name: "김철수".to_string(),
            sequence_index: 0,
        };

        let cells = row.to_cells();
        assert_eq!(cells.len(), ACCOUNTING_COLUMNS.len());
        assert_eq!(cells[0], "20261019");
        assert_eq!(cells[1], "");
        assert_eq!(cells[3], "스토어팜");
        assert_eq!(cells[6], "11");
        assert_eq!(cells[16], "");
        assert_eq!(cells[17], "3");
        assert_eq!(cells[20], "9091");
        assert_eq!(cells[21], "909");
        assert_eq!(cells[26], "김철수");
    }
}
