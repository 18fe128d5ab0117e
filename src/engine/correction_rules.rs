// ==========================================
// 주문 데이터 정제 - 渠道金额修正规则
// ==========================================
// 职责: 每个需修正的渠道一个规则实现
//   - 构建本渠道的 (匹配键 → 正确金额) 记录
//   - 为台账行生成同构匹配键
//   - 可选: 渠道订单总额核对
// 扩展: 新增渠道 = 新增一个 ChannelCorrectionRule 实现
// ==========================================

use crate::domain::{Channel, GodomallExportRow, OrderLine, SmartstoreExportRow};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

// ==========================================
// 匹配键
// ==========================================
// 台账没有跨渠道稳定订单号,以 收件人 + 数量 + 金额/商品编码 作为模糊连接键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PriceKey {
    /// (商品编码, 数量, 收件人)
    ItemQuantityRecipient {
        item_code: String,
        quantity: i64,
        recipient_name: String,
    },
    /// (收件人, 数量, 参考金额)
    RecipientQuantityAmount {
        recipient_name: String,
        quantity: i64,
        reference_amount: Decimal,
    },
}

impl PriceKey {
    pub fn item_quantity_recipient(item_code: &str, quantity: i64, recipient_name: &str) -> Self {
        PriceKey::ItemQuantityRecipient {
            item_code: item_code.to_string(),
            quantity,
            recipient_name: recipient_name.to_string(),
        }
    }

    /// 金额做 normalize,10000 与 10000.0 视为同一键
    pub fn recipient_quantity_amount(
        recipient_name: &str,
        quantity: i64,
        reference_amount: Decimal,
    ) -> Self {
        PriceKey::RecipientQuantityAmount {
            recipient_name: recipient_name.to_string(),
            quantity,
            reference_amount: reference_amount.normalize(),
        }
    }
}

/// 渠道金额记录（仅在修正期间存在）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPriceRecord {
    pub match_key: PriceKey,
    pub corrected_amount: Decimal,
}

/// 渠道订单总额偏差
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalDiscrepancy {
    pub recipient_name: String,
    pub grand_total: Decimal,
    pub computed_total: Decimal,
    /// computed_total − grand_total
    pub difference: Decimal,
}

// ==========================================
// ChannelCorrectionRule Trait
// ==========================================
pub trait ChannelCorrectionRule: Send + Sync {
    /// 本规则负责的渠道
    fn channel(&self) -> Channel;

    /// 本渠道导出的金额记录（按导出行顺序,未去重）
    fn price_records(&self) -> Vec<ChannelPriceRecord>;

    /// 台账行的匹配键
    fn ledger_key(&self, line: &OrderLine) -> PriceKey;

    /// 渠道订单总额核对（默认不核对）
    fn total_discrepancies(&self, _tolerance: Decimal) -> Vec<TotalDiscrepancy> {
        Vec::new()
    }
}

/// 构建查询表（同键首次出现为准,避免扇出连接）
pub fn build_lookup(records: Vec<ChannelPriceRecord>) -> HashMap<PriceKey, Decimal> {
    let mut lookup = HashMap::with_capacity(records.len());
    for record in records {
        lookup
            .entry(record.match_key)
            .or_insert(record.corrected_amount);
    }
    lookup
}

// ==========================================
// 渠道 A: 스마트스토어
// ==========================================
// 导出中的 실결제금액 即正确金额
pub struct SmartstoreRule<'a> {
    rows: &'a [SmartstoreExportRow],
}

impl<'a> SmartstoreRule<'a> {
    pub fn new(rows: &'a [SmartstoreExportRow]) -> Self {
        Self { rows }
    }
}

impl ChannelCorrectionRule for SmartstoreRule<'_> {
    fn channel(&self) -> Channel {
        Channel::Smartstore
    }

    fn price_records(&self) -> Vec<ChannelPriceRecord> {
        self.rows
            .iter()
            .map(|row| ChannelPriceRecord {
                match_key: PriceKey::item_quantity_recipient(
                    &row.item_code,
                    row.quantity,
                    &row.recipient_name,
                ),
                corrected_amount: row.paid_amount,
            })
            .collect()
    }

    fn ledger_key(&self, line: &OrderLine) -> PriceKey {
        PriceKey::item_quantity_recipient(&line.item_code, line.quantity, &line.recipient_name)
    }
}

// ==========================================
// 渠道 B: 고도몰5
// ==========================================
// 实付金额需计算；同一 (收件人, 订单总额) 的拆分行只在首行计运费
// 台账金额 = 本渠道 상품별 품목금액,以此作为参考金额匹配
pub struct GodomallRule<'a> {
    rows: &'a [GodomallExportRow],
}

impl<'a> GodomallRule<'a> {
    pub fn new(rows: &'a [GodomallExportRow]) -> Self {
        Self { rows }
    }

    /// 逐行计算实付金额（按导出行顺序）
    pub fn computed_amounts(&self) -> Vec<Decimal> {
        let mut shipping_charged: HashSet<(&str, Decimal)> = HashSet::new();
        self.rows
            .iter()
            .map(|row| {
                let group = (row.recipient_name.as_str(), row.grand_total.normalize());
                let carries_shipping = shipping_charged.insert(group);
                row.computed_amount(carries_shipping)
            })
            .collect()
    }
}

impl ChannelCorrectionRule for GodomallRule<'_> {
    fn channel(&self) -> Channel {
        Channel::Godomall
    }

    fn price_records(&self) -> Vec<ChannelPriceRecord> {
        self.rows
            .iter()
            .zip(self.computed_amounts())
            .map(|(row, corrected_amount)| ChannelPriceRecord {
                match_key: PriceKey::recipient_quantity_amount(
                    &row.recipient_name,
                    row.quantity,
                    row.item_subtotal,
                ),
                corrected_amount,
            })
            .collect()
    }

    fn ledger_key(&self, line: &OrderLine) -> PriceKey {
        PriceKey::recipient_quantity_amount(&line.recipient_name, line.quantity, line.paid_amount)
    }

    fn total_discrepancies(&self, tolerance: Decimal) -> Vec<TotalDiscrepancy> {
        // 按首次出现顺序汇总各订单组
        let mut order: Vec<(String, Decimal)> = Vec::new();
        let mut sums: HashMap<(String, Decimal), Decimal> = HashMap::new();

        for (row, amount) in self.rows.iter().zip(self.computed_amounts()) {
            let group = (row.recipient_name.clone(), row.grand_total.normalize());
            match sums.get_mut(&group) {
                Some(sum) => *sum += amount,
                None => {
                    order.push(group.clone());
                    sums.insert(group, amount);
                }
            }
        }

        order
            .into_iter()
            .filter_map(|group| {
                let computed_total = sums.get(&group).copied().unwrap_or_default();
                let (recipient_name, grand_total) = group;
                let difference = computed_total - grand_total;
                (difference.abs() > tolerance).then(|| TotalDiscrepancy {
                    recipient_name,
                    grand_total,
                    computed_total,
                    difference,
                })
            })
            .collect()
    }
}
