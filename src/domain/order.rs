// ==========================================
// 주문 데이터 정제 - 订单领域实体
// ==========================================
// 职责: 台账订单行 / 渠道导出行 / 输出表行
// 红线: sequence_index 贯穿全流程,是唯一的稳定排序键
// ==========================================

use crate::domain::types::Channel;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// OrderLine - 台账订单行
// ==========================================
// 由 RecordNormalizer 从基准台账创建
// 仅 PriceReconciler 可修改 paid_amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_code: String,
    pub item_name: String,
    pub quantity: i64,
    pub paid_amount: Decimal,
    pub channel: Channel,
    pub recipient_name: String,
    pub sequence_index: usize,
}

// ==========================================
// 渠道导出行
// ==========================================

/// 渠道 A（스마트스토어）导出行：自带正确的实付金额
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartstoreExportRow {
    pub item_code: String,
    pub quantity: i64,
    pub recipient_name: String,
    pub paid_amount: Decimal,
}

/// 渠道 B（고도몰5）导出行：实付金额需要计算
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GodomallExportRow {
    pub recipient_name: String,
    pub quantity: i64,
    pub item_subtotal: Decimal,
    pub shipping_fee: Decimal,
    pub member_discount: Decimal,
    pub coupon_discount: Decimal,
    pub mileage_used: Decimal,
    pub grand_total: Decimal,
}

impl GodomallExportRow {
    /// 计算实付金额
    ///
    /// computed = item_subtotal + shipping − member_discount − coupon_discount − mileage_used
    ///
    /// `carries_shipping` 为 false 时运费按 0 计（同一订单拆行只计一次运费）
    pub fn computed_amount(&self, carries_shipping: bool) -> Decimal {
        let shipping = if carries_shipping {
            self.shipping_fee
        } else {
            Decimal::ZERO
        };
        self.item_subtotal + shipping
            - self.member_discount
            - self.coupon_discount
            - self.mileage_used
    }
}

// ==========================================
// 输出表行
// ==========================================

/// 修正后台账行（不含 sequence_index）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub item_code: String,
    pub item_name: String,
    pub quantity: i64,
    pub paid_amount: Decimal,
    pub channel: String,
    pub recipient_name: String,
}

impl From<&OrderLine> for LedgerRow {
    fn from(line: &OrderLine) -> Self {
        Self {
            item_code: line.item_code.clone(),
            item_name: line.item_name.clone(),
            quantity: line.quantity,
            paid_amount: line.paid_amount,
            channel: line.channel.label().to_string(),
            recipient_name: line.recipient_name.clone(),
        }
    }
}

/// 商品数量汇总行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantitySummaryRow {
    pub item_name: String,
    pub total_quantity: i64,
}

/// 包装分组（同一收件人的连续订单行）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackingBundle {
    pub bundle_id: usize,
    pub lines: Vec<OrderLine>,
}

/// 包装清单行
///
/// bundle_no 只在分组首行有值,后续行为空（渲染层据此合并单元格）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingRow {
    pub bundle_no: Option<usize>,
    pub item_name: String,
    pub quantity: i64,
    pub recipient_name: String,
    pub channel: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn godomall_row() -> GodomallExportRow {
        GodomallExportRow {
            recipient_name: "이영희".to_string(),
            quantity: 1,
            item_subtotal: Decimal::from(30000),
            shipping_fee: Decimal::from(3000),
            member_discount: Decimal::from(1000),
            coupon_discount: Decimal::from(2000),
            mileage_used: Decimal::from(500),
            grand_total: Decimal::from(29500),
        }
    }

    #[test]
    fn test_computed_amount_with_shipping() {
        assert_eq!(godomall_row().computed_amount(true), Decimal::from(29500));
    }

    #[test]
    fn test_computed_amount_without_shipping() {
        assert_eq!(godomall_row().computed_amount(false), Decimal::from(26500));
    }

    #[test]
    fn test_ledger_row_from_order_line() {
        let line = OrderLine {
            item_code: "A001".to_string(),
            item_name: "명란 BOX".to_string(),
            quantity: 2,
            paid_amount: Decimal::from(20000),
            channel: Channel::Coupang,
            recipient_name: "김철수".to_string(),
            sequence_index: 7,
        };
        let row = LedgerRow::from(&line);
        assert_eq!(row.channel, "쿠팡");
        assert_eq!(row.quantity, 2);
        assert_eq!(row.paid_amount, Decimal::from(20000));
    }
}
