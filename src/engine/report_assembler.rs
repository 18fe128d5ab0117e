// ==========================================
// 주문 데이터 정제 - 结果汇总
// ==========================================
// 职责: 四张输出表 + 警告列表 → RefineReport
// ==========================================

use crate::domain::{
    AccountingRow, LedgerRow, OrderLine, PackingRow, QuantitySummaryRow, Warning,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 一次处理的完整结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefineReport {
    /// 修正后台账（原台账顺序）
    pub ledger: Vec<LedgerRow>,
    /// 商品数量汇总（按商品名升序）
    pub quantity_summary: Vec<QuantitySummaryRow>,
    pub packing_list: Vec<PackingRow>,
    pub accounting: Vec<AccountingRow>,
    pub warnings: Vec<Warning>,
}

pub struct ReportAssembler;

impl ReportAssembler {
    pub fn assemble(
        lines: &[OrderLine],
        packing_list: Vec<PackingRow>,
        accounting: Vec<AccountingRow>,
        warnings: Vec<Warning>,
    ) -> RefineReport {
        let mut ordered: Vec<&OrderLine> = lines.iter().collect();
        ordered.sort_by_key(|line| line.sequence_index);

        RefineReport {
            ledger: ordered.into_iter().map(LedgerRow::from).collect(),
            quantity_summary: Self::quantity_summary(lines),
            packing_list,
            accounting,
            warnings,
        }
    }

    /// 按商品名汇总订单数量
    pub fn quantity_summary(lines: &[OrderLine]) -> Vec<QuantitySummaryRow> {
        let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
        for line in lines {
            *totals.entry(line.item_name.as_str()).or_insert(0) += line.quantity;
        }
        totals
            .into_iter()
            .map(|(item_name, total_quantity)| QuantitySummaryRow {
                item_name: item_name.to_string(),
                total_quantity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Channel;
    use rust_decimal::Decimal;

    fn line(seq: usize, name: &str, qty: i64) -> OrderLine {
        OrderLine {
            item_code: "A001".to_string(),
            item_name: name.to_string(),
            quantity: qty,
            paid_amount: Decimal::from(1000),
            channel: Channel::Coupang,
            recipient_name: "김철수".to_string(),
            sequence_index: seq,
        }
    }

    #[test]
    fn test_quantity_summary_grouped_and_sorted() {
        let lines = vec![line(0, "창란젓", 2), line(1, "명란젓", 1), line(2, "창란젓", 3)];
        let summary = ReportAssembler::quantity_summary(&lines);

        assert_eq!(
            summary,
            vec![
                QuantitySummaryRow {
                    item_name: "명란젓".to_string(),
                    total_quantity: 1
                },
                QuantitySummaryRow {
                    item_name: "창란젓".to_string(),
                    total_quantity: 5
                },
            ]
        );
    }

    #[test]
    fn test_ledger_keeps_sequence_order() {
        let lines = vec![line(1, "창란젓", 1), line(0, "명란젓", 1)];
        let report = ReportAssembler::assemble(&lines, Vec::new(), Vec::new(), Vec::new());

        assert_eq!(report.ledger.len(), 2);
        assert_eq!(report.ledger[0].item_name, "명란젓");
    }
}
