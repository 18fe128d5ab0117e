// ==========================================
// 주문 데이터 정제 - 会计上传行生成
// ==========================================
// 职责: 修正后台账 → 会计系统上传行
// 流程:
//   1. 主数据左连接（未登记 → unregistered_item 警告 + 默认值）
//   2. 数量换算: 箱装 (×入数) → 三件装 (×3)
//   3. 税额拆分: 供货价 + 增值税 = 含税总额
//   4. 客户名映射 + 固定字段
//   5. 排序: 客户优先级 → 交易类型 → sequence_index
// ==========================================

use crate::config::RefineConfig;
use crate::domain::{
    AccountingRow, OrderLine, ProductMaster, TaxStatus, Warning, WarningKind,
};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

/// 会计日期格式（일자）
pub const ACCOUNTING_DATE_FORMAT: &str = "%Y%m%d";

/// 换算后的数量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedQuantity {
    pub quantity: i64,
    /// 仅箱装商品有值（= 订单数量）
    pub box_count: Option<i64>,
}

/// 税额拆分结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxSplit {
    pub supply_amount: i64,
    pub vat_amount: i64,
}

pub struct AccountingRowBuilder<'a> {
    config: &'a RefineConfig,
    run_date: NaiveDate,
}

impl<'a> AccountingRowBuilder<'a> {
    pub fn new(config: &'a RefineConfig, run_date: NaiveDate) -> Self {
        Self { config, run_date }
    }

    /// 生成会计上传行
    ///
    /// # 返回
    /// (已排序的会计行, unregistered_item 警告)
    pub fn build(
        &self,
        lines: &[OrderLine],
        master: &ProductMaster,
    ) -> (Vec<AccountingRow>, Vec<Warning>) {
        let date = self.run_date.format(ACCOUNTING_DATE_FORMAT).to_string();
        let mut warnings = Vec::new();
        let mut rows = Vec::with_capacity(lines.len());

        for line in lines {
            let entry = master.get(&line.item_code);

            if entry.is_none() && !line.item_code.is_empty() {
                warn!(item_code = %line.item_code, "商品未在主数据中登记");
                warnings.push(Warning::localized(
                    WarningKind::UnregisteredItem,
                    line.item_code.clone(),
                    &self.config.locale,
                    &[
                        ("item_code", line.item_code.as_str()),
                        ("item_name", line.item_name.as_str()),
                    ],
                ));
            }

            let tax_status = entry
                .and_then(|e| e.tax_status)
                .unwrap_or(self.config.unregistered_tax_status);
            let multiplier = entry.and_then(|e| e.pack_multiplier);

            let derived = self.derive_quantity(&line.item_name, line.quantity, multiplier);
            let split = self.split_tax(line.paid_amount, tax_status);

            rows.push(AccountingRow {
                date: date.clone(),
                client_name: self
                    .config
                    .client_name_for(line.channel.label())
                    .to_string(),
                warehouse: self.config.warehouse.clone(),
                transaction_type: tax_status.transaction_type(),
                voucher_memo: self.config.voucher_memo.clone(),
                item_code: line.item_code.clone(),
                box_count: derived.box_count,
                quantity: derived.quantity,
                supply_amount: split.supply_amount,
                vat_amount: split.vat_amount,
                customer_name: line.recipient_name.clone(),
                sequence_index: line.sequence_index,
            });
        }

        rows.sort_by_key(|row| {
            (
                self.config.client_rank(&row.client_name),
                row.transaction_type,
                row.sequence_index,
            )
        });

        debug!(
            rows = rows.len(),
            unregistered = warnings.len(),
            "会计上传行生成完成"
        );
        (rows, warnings)
    }

    /// 数量换算（先箱装,后三件装）
    ///
    /// 入数缺失或 ≤ 0 时按 1 计
    pub fn derive_quantity(
        &self,
        item_name: &str,
        quantity: i64,
        pack_multiplier: Option<i64>,
    ) -> DerivedQuantity {
        let mut derived = DerivedQuantity {
            quantity,
            box_count: None,
        };

        if item_name.contains(self.config.box_marker.as_str()) {
            let multiplier = pack_multiplier.filter(|m| *m > 0).unwrap_or(1);
            derived.quantity = quantity.saturating_mul(multiplier);
            derived.box_count = Some(quantity);
        }

        if self
            .config
            .three_pack_markers
            .iter()
            .any(|marker| item_name.contains(marker.as_str()))
        {
            derived.quantity = derived.quantity.saturating_mul(self.config.three_pack_factor);
        }

        derived
    }

    /// 税额拆分（银行家舍入）
    ///
    /// gross = round(paid)；课税: supply = round(gross / 1.1), vat = gross − supply；免税: vat = 0
    ///
    /// 输入金额经 DataCleaner 限幅,修正后的金额总在 i64 范围内
    pub fn split_tax(&self, paid_amount: Decimal, tax_status: TaxStatus) -> TaxSplit {
        let gross = round_half_even(paid_amount);

        let supply = match tax_status {
            TaxStatus::Exempt => gross,
            TaxStatus::Taxed => gross
                .checked_div(self.config.vat_divisor)
                .map(round_half_even)
                .unwrap_or(gross),
        };
        let vat = gross - supply;

        TaxSplit {
            supply_amount: supply.to_i64().unwrap_or_default(),
            vat_amount: vat.to_i64().unwrap_or_default(),
        }
    }
}

fn round_half_even(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Channel, ProductMasterEntry};

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn line(seq: usize, channel: Channel, code: &str, name: &str, qty: i64, paid: i64) -> OrderLine {
        OrderLine {
            item_code: code.to_string(),
            item_name: name.to_string(),
            quantity: qty,
            paid_amount: Decimal::from(paid),
            channel,
            recipient_name: format!("고객{}", seq),
            sequence_index: seq,
        }
    }

    fn master() -> ProductMaster {
        ProductMaster::from_entries(vec![
            ProductMasterEntry {
                sku_code: "X".to_string(),
                tax_status: Some(TaxStatus::Taxed),
                pack_multiplier: Some(6),
            },
            ProductMasterEntry {
                sku_code: "E".to_string(),
                tax_status: Some(TaxStatus::Exempt),
                pack_multiplier: None,
            },
        ])
    }

    #[test]
    fn test_box_item_multiplied_by_pack() {
        let config = RefineConfig::default();
        let builder = AccountingRowBuilder::new(&config, run_date());

        let derived = builder.derive_quantity("명란 BOX", 2, Some(6));
        assert_eq!(derived.quantity, 12);
        assert_eq!(derived.box_count, Some(2));
    }

    #[test]
    fn test_box_then_three_pack() {
        let config = RefineConfig::default();
        let builder = AccountingRowBuilder::new(&config, run_date());

        let derived = builder.derive_quantity("명란 BOX 3개입", 2, Some(6));
        assert_eq!(derived.quantity, 36);
        assert_eq!(derived.box_count, Some(2));

        let derived = builder.derive_quantity("창란젓 3개", 2, None);
        assert_eq!(derived.quantity, 6);
        assert_eq!(derived.box_count, None);
    }

    #[test]
    fn test_non_positive_multiplier_treated_as_one() {
        let config = RefineConfig::default();
        let builder = AccountingRowBuilder::new(&config, run_date());

        assert_eq!(builder.derive_quantity("BOX", 3, Some(0)).quantity, 3);
        assert_eq!(builder.derive_quantity("BOX", 3, None).quantity, 3);
    }

    #[test]
    fn test_split_tax_sums_to_gross() {
        let config = RefineConfig::default();
        let builder = AccountingRowBuilder::new(&config, run_date());

        for paid in [0i64, 1, 11, 999, 10000, 12345, 33000, 1_000_001] {
            let split = builder.split_tax(Decimal::from(paid), TaxStatus::Taxed);
            assert_eq!(split.supply_amount + split.vat_amount, paid);
        }

        let split = builder.split_tax(Decimal::from(11000), TaxStatus::Taxed);
        assert_eq!(split, TaxSplit { supply_amount: 10000, vat_amount: 1000 });

        let split = builder.split_tax(Decimal::from(8800), TaxStatus::Exempt);
        assert_eq!(split, TaxSplit { supply_amount: 8800, vat_amount: 0 });
    }

    #[test]
    fn test_split_tax_rounds_half_to_even() {
        let config = RefineConfig::default();
        let builder = AccountingRowBuilder::new(&config, run_date());

        // 10000.5 → 10000
        let split = builder.split_tax(Decimal::new(100005, 1), TaxStatus::Exempt);
        assert_eq!(split.supply_amount, 10000);
        // 10001.5 → 10002
        let split = builder.split_tax(Decimal::new(100015, 1), TaxStatus::Exempt);
        assert_eq!(split.supply_amount, 10002);
    }

    #[test]
    fn test_unregistered_item_warned_once_with_defaults() {
        let config = RefineConfig::default();
        let builder = AccountingRowBuilder::new(&config, run_date());

        let lines = vec![
            line(0, Channel::Coupang, "Z999", "미등록 상품", 1, 11000),
            line(1, Channel::Coupang, "", "코드 없음", 1, 11000),
        ];
        let (rows, warnings) = builder.build(&lines, &master());

        assert_eq!(rows.len(), 2);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::UnregisteredItem);
        assert_eq!(warnings[0].subject, "Z999");
        assert!(rows.iter().all(|r| r.transaction_type == 11));
    }

    #[test]
    fn test_rows_sorted_by_client_type_sequence() {
        let config = RefineConfig::default();
        let builder = AccountingRowBuilder::new(&config, run_date());

        let lines = vec![
            line(0, Channel::Coupang, "X", "명란", 1, 1000),
            line(1, Channel::Other("11번가".to_string()), "X", "명란", 1, 1000),
            line(2, Channel::Smartstore, "E", "생선", 1, 1000),
            line(3, Channel::Smartstore, "X", "명란", 1, 1000),
            line(4, Channel::Godomall, "X", "명란", 1, 1000),
        ];
        let (rows, _) = builder.build(&lines, &master());

        let order: Vec<usize> = rows.iter().map(|r| r.sequence_index).collect();
        assert_eq!(order, vec![4, 3, 2, 0, 1]);
        assert_eq!(rows[0].client_name, "고래미자사몰_현금영수증(고도몰)");
        assert_eq!(rows[2].transaction_type, 12);
        assert_eq!(rows[4].client_name, "11번가");
        assert_eq!(rows[0].date, "20261019");
        assert_eq!(rows[0].warehouse, "고래미");
    }
}
