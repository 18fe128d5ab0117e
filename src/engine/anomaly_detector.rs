// ==========================================
// 주문 데이터 정제 - 同名异常检测
// ==========================================
// 职责: 同一收件人的订单行在台账中不连续 → 疑似同名不同人
// 判定: 行数 > 1 且 (最大序号 − 最小序号 + 1) ≠ 行数
// 红线: 只产生警告,不修改任何订单行
// ==========================================

use crate::domain::{OrderLine, Warning, WarningKind};
use std::collections::BTreeMap;
use tracing::debug;

pub struct AnomalyDetector;

impl AnomalyDetector {
    /// 检测不连续的收件人
    ///
    /// # 返回
    /// 每个可疑收件人一条警告,按收件人名排序
    pub fn detect(lines: &[OrderLine], locale: &str) -> Vec<Warning> {
        let mut positions: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for line in lines {
            positions
                .entry(line.recipient_name.as_str())
                .or_default()
                .push(line.sequence_index);
        }

        let warnings: Vec<Warning> = positions
            .into_iter()
            .filter(|(_, indices)| !is_contiguous(indices))
            .map(|(recipient, _)| {
                Warning::localized(
                    WarningKind::DuplicateNameSuspected,
                    recipient,
                    locale,
                    &[("recipient", recipient)],
                )
            })
            .collect();

        debug!(suspected = warnings.len(), "同名异常检测完成");
        warnings
    }
}

fn is_contiguous(indices: &[usize]) -> bool {
    if indices.len() <= 1 {
        return true;
    }
    let min = indices.iter().min().copied().unwrap_or_default();
    let max = indices.iter().max().copied().unwrap_or_default();
    max - min + 1 == indices.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Channel;
    use rust_decimal::Decimal;

    fn ledger(recipients: &[&str]) -> Vec<OrderLine> {
        recipients
            .iter()
            .enumerate()
            .map(|(seq, name)| OrderLine {
                item_code: format!("A{:03}", seq),
                item_name: "명란젓".to_string(),
                quantity: 1,
                paid_amount: Decimal::from(10000),
                channel: Channel::Coupang,
                recipient_name: name.to_string(),
                sequence_index: seq,
            })
            .collect()
    }

    #[test]
    fn test_interleaved_recipient_flagged_once() {
        let lines = ledger(&["김철수", "이영희", "김철수", "박민수", "김철수"]);
        let warnings = AnomalyDetector::detect(&lines, "ko");

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::DuplicateNameSuspected);
        assert_eq!(warnings[0].subject, "김철수");
        assert!(warnings[0].message.contains("동명이인"));
    }

    #[test]
    fn test_contiguous_runs_not_flagged() {
        let lines = ledger(&["김철수", "김철수", "이영희", "박민수", "박민수"]);
        assert!(AnomalyDetector::detect(&lines, "ko").is_empty());
    }

    #[test]
    fn test_multiple_suspects_sorted_by_name() {
        let lines = ledger(&["이영희", "김철수", "이영희", "김철수"]);
        let warnings = AnomalyDetector::detect(&lines, "en");

        let subjects: Vec<&str> = warnings.iter().map(|w| w.subject.as_str()).collect();
        assert_eq!(subjects, vec!["김철수", "이영희"]);
    }

    #[test]
    fn test_empty_ledger() {
        assert!(AnomalyDetector::detect(&[], "ko").is_empty());
    }
}
