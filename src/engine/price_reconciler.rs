// ==========================================
// 주문 데이터 정제 - 金额修正引擎
// ==========================================
// 职责: 用各渠道权威金额覆盖台账实付金额
// 规则:
//   1. 每条规则构建去重查询表（首次出现为准）
//   2. 台账行按渠道选择适用规则,以原始行生成匹配键
//   3. 按注册顺序依次覆盖；适用但无匹配 → unmatched_price 警告
//   4. 渠道订单总额核对 → channel_total_mismatch 警告（不改值）
// 红线: 行数不变,只修改 paid_amount
// ==========================================

use crate::domain::{OrderLine, Warning, WarningKind};
use crate::engine::correction_rules::{build_lookup, ChannelCorrectionRule, PriceKey};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, info};

/// 修正结果
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub lines: Vec<OrderLine>,
    pub warnings: Vec<Warning>,
    /// 成功修正的行数
    pub corrected: usize,
}

pub struct PriceReconciler<'a> {
    rules: Vec<Box<dyn ChannelCorrectionRule + 'a>>,
    tolerance: Decimal,
    locale: String,
}

impl<'a> PriceReconciler<'a> {
    /// # 参数
    /// - tolerance: 渠道订单总额核对容差
    /// - locale: 警告消息语言
    pub fn new(tolerance: Decimal, locale: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            tolerance,
            locale: locale.into(),
        }
    }

    /// 注册渠道规则（注册顺序即覆盖顺序）
    pub fn register(mut self, rule: Box<dyn ChannelCorrectionRule + 'a>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn reconcile(&self, mut lines: Vec<OrderLine>) -> ReconcileOutcome {
        let lookups: Vec<HashMap<PriceKey, Decimal>> = self
            .rules
            .iter()
            .map(|rule| {
                let records = rule.price_records();
                let total = records.len();
                let lookup = build_lookup(records);
                debug!(
                    channel = %rule.channel(),
                    records = total,
                    unique_keys = lookup.len(),
                    "渠道金额查询表已构建"
                );
                lookup
            })
            .collect();

        let mut warnings = Vec::new();
        let mut corrected = 0usize;

        for line in lines.iter_mut() {
            let mut applicable = false;
            let mut resolved: Option<Decimal> = None;

            for (rule, lookup) in self.rules.iter().zip(&lookups) {
                if rule.channel() != line.channel {
                    continue;
                }
                applicable = true;
                if let Some(amount) = lookup.get(&rule.ledger_key(line)) {
                    resolved = Some(*amount);
                }
            }

            match resolved {
                Some(amount) => {
                    line.paid_amount = amount;
                    corrected += 1;
                }
                None if applicable => {
                    warnings.push(Warning::localized(
                        WarningKind::UnmatchedPrice,
                        line.recipient_name.clone(),
                        &self.locale,
                        &[
                            ("channel", line.channel.label()),
                            ("recipient", line.recipient_name.as_str()),
                            ("item_name", line.item_name.as_str()),
                        ],
                    ));
                }
                None => {}
            }
        }

        let unmatched = warnings.len();

        for rule in &self.rules {
            for discrepancy in rule.total_discrepancies(self.tolerance) {
                let grand_total = discrepancy.grand_total.to_string();
                let computed = discrepancy.computed_total.to_string();
                let difference = discrepancy.difference.to_string();
                warnings.push(Warning::localized(
                    WarningKind::ChannelTotalMismatch,
                    discrepancy.recipient_name.clone(),
                    &self.locale,
                    &[
                        ("recipient", discrepancy.recipient_name.as_str()),
                        ("grand_total", grand_total.as_str()),
                        ("computed", computed.as_str()),
                        ("difference", difference.as_str()),
                    ],
                ));
            }
        }

        info!(
            lines = lines.len(),
            corrected,
            unmatched,
            total_mismatch = warnings.len() - unmatched,
            "金额修正完成"
        );

        ReconcileOutcome {
            lines,
            warnings,
            corrected,
        }
    }
}
