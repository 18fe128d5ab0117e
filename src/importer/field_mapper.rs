// ==========================================
// 주문 데이터 정제 - 字段映射器实现
// ==========================================
// 职责: 按列名（含别名）定位源字段 + 必填列校验
// 红线: 只按列名寻址,不按列位置猜测
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::table::RawTable;
use std::collections::HashMap;

/// 列定义
///
/// - name: 标准列名（也是消息中显示的名称）
/// - aliases: 可接受的其他列名（按顺序尝试）
/// - required: 缺失时是否为结构性错误
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub required: bool,
}

impl ColumnSpec {
    const fn required(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            name,
            aliases,
            required: true,
        }
    }

    const fn optional(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            name,
            aliases,
            required: false,
        }
    }

    fn candidates(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

// ==========================================
// 各输入表的列定义
// ==========================================
pub mod columns {
    use super::ColumnSpec;

    // ===== 基准台账（이카운트 주문 목록） =====
    pub const LEDGER_ITEM_CODE: ColumnSpec = ColumnSpec::required("재고관리코드", &["품목코드"]);
    pub const LEDGER_ITEM_NAME: ColumnSpec = ColumnSpec::required("SKU상품명", &["상품명"]);
    pub const LEDGER_QUANTITY: ColumnSpec = ColumnSpec::required("주문수량", &["수량"]);
    pub const LEDGER_AMOUNT: ColumnSpec = ColumnSpec::required("금액", &["실결제금액"]);
    pub const LEDGER_CHANNEL: ColumnSpec = ColumnSpec::required("쇼핑몰", &[]);
    pub const LEDGER_RECIPIENT: ColumnSpec = ColumnSpec::required("수령자명", &["수취인 이름"]);

    pub const LEDGER: [ColumnSpec; 6] = [
        LEDGER_ITEM_CODE,
        LEDGER_ITEM_NAME,
        LEDGER_QUANTITY,
        LEDGER_AMOUNT,
        LEDGER_CHANNEL,
        LEDGER_RECIPIENT,
    ];

    // ===== 渠道 A（스마트스토어） =====
    pub const SMARTSTORE_ITEM_CODE: ColumnSpec = ColumnSpec::required("재고관리코드", &[]);
    pub const SMARTSTORE_QUANTITY: ColumnSpec = ColumnSpec::required("주문수량", &["수량"]);
    pub const SMARTSTORE_RECIPIENT: ColumnSpec = ColumnSpec::required("수령자명", &["수취인명"]);
    pub const SMARTSTORE_PAID_AMOUNT: ColumnSpec =
        ColumnSpec::required("실결제금액", &["최종 상품별 총 주문금액"]);

    pub const SMARTSTORE: [ColumnSpec; 4] = [
        SMARTSTORE_ITEM_CODE,
        SMARTSTORE_QUANTITY,
        SMARTSTORE_RECIPIENT,
        SMARTSTORE_PAID_AMOUNT,
    ];

    // ===== 渠道 B（고도몰5） =====
    pub const GODOMALL_RECIPIENT: ColumnSpec = ColumnSpec::required("수취인 이름", &["수령자명"]);
    pub const GODOMALL_QUANTITY: ColumnSpec = ColumnSpec::required("상품수량", &["주문수량"]);
    pub const GODOMALL_ITEM_SUBTOTAL: ColumnSpec = ColumnSpec::required("상품별 품목금액", &[]);
    pub const GODOMALL_SHIPPING_FEE: ColumnSpec = ColumnSpec::required("총 배송 금액", &["배송비"]);
    pub const GODOMALL_MEMBER_DISCOUNT: ColumnSpec =
        ColumnSpec::required("회 할인 금액", &["회원 할인 금액"]);
    pub const GODOMALL_COUPON_DISCOUNT: ColumnSpec = ColumnSpec::required("쿠폰 할인 금액", &[]);
    pub const GODOMALL_MILEAGE_USED: ColumnSpec = ColumnSpec::required("사용된 마일리지", &[]);
    pub const GODOMALL_GRAND_TOTAL: ColumnSpec =
        ColumnSpec::required("총 결제 금액", &["총결제금액", "결제금액"]);

    pub const GODOMALL: [ColumnSpec; 8] = [
        GODOMALL_RECIPIENT,
        GODOMALL_QUANTITY,
        GODOMALL_ITEM_SUBTOTAL,
        GODOMALL_SHIPPING_FEE,
        GODOMALL_MEMBER_DISCOUNT,
        GODOMALL_COUPON_DISCOUNT,
        GODOMALL_MILEAGE_USED,
        GODOMALL_GRAND_TOTAL,
    ];

    // ===== 商品主数据 =====
    pub const MASTER_SKU_CODE: ColumnSpec = ColumnSpec::required("SKU코드", &["품목코드"]);
    pub const MASTER_TAX_STATUS: ColumnSpec = ColumnSpec::required("과세여부", &[]);
    pub const MASTER_PACK_MULTIPLIER: ColumnSpec = ColumnSpec::optional("입수량", &[]);

    pub const MASTER: [ColumnSpec; 3] = [MASTER_SKU_CODE, MASTER_TAX_STATUS, MASTER_PACK_MULTIPLIER];
}

/// 列解析结果: 标准列名 → 表中实际列名
#[derive(Debug, Clone, Default)]
pub struct ResolvedColumns {
    actual: HashMap<&'static str, String>,
}

impl ResolvedColumns {
    pub fn contains(&self, spec: &ColumnSpec) -> bool {
        self.actual.contains_key(spec.name)
    }
}

pub struct FieldMapper;

impl FieldMapper {
    /// 校验并解析列
    ///
    /// # 返回
    /// - Ok(ResolvedColumns): 所有必填列均存在
    /// - Err(MissingColumn): 第一个缺失的必填列
    pub fn resolve(&self, table: &RawTable, specs: &[ColumnSpec]) -> ImportResult<ResolvedColumns> {
        let mut resolved = ResolvedColumns::default();

        for spec in specs {
            match spec.candidates().find(|c| table.has_column(c)) {
                Some(actual) => {
                    resolved.actual.insert(spec.name, actual.to_string());
                }
                None if spec.required => {
                    return Err(ImportError::MissingColumn {
                        table: table.name.clone(),
                        column: spec.name.to_string(),
                    });
                }
                None => {}
            }
        }

        Ok(resolved)
    }

    /// 取单元格文本（列不存在或单元格缺失时为空串）
    pub fn get<'a>(
        &self,
        row: &'a HashMap<String, String>,
        resolved: &ResolvedColumns,
        spec: &ColumnSpec,
    ) -> &'a str {
        resolved
            .actual
            .get(spec.name)
            .and_then(|actual| row.get(actual))
            .map(|v| v.trim())
            .unwrap_or("")
    }
}
