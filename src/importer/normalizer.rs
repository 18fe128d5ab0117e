// ==========================================
// 주문 데이터 정제 - 记录归一化器
// ==========================================
// 职责: 原始表 → 规范类型记录
// 流程: 列校验（全部表） → 字段映射 → 清洗/转换 → sequence_index 赋值
// 红线: 列校验先于任何行处理,缺列时整体失败
// ==========================================

use crate::domain::{
    Channel, GodomallExportRow, OrderLine, ProductMaster, ProductMasterEntry,
    SmartstoreExportRow, TaxStatus, Warning, WarningKind,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{columns, ColumnSpec, FieldMapper, ResolvedColumns};
use crate::importer::importer_trait::DataCleaner;
use crate::importer::table::RawTable;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, warn};

/// 一次处理的全部原始输入
#[derive(Debug, Clone, Default)]
pub struct RefineInputs {
    /// 渠道 A 导出
    pub smartstore: RawTable,
    /// 基准台账（行顺序决定 sequence_index）
    pub ledger: RawTable,
    /// 渠道 B 导出
    pub godomall: RawTable,
    /// 可选商品主数据表
    pub master: Option<RawTable>,
}

/// 归一化结果
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub ledger: Vec<OrderLine>,
    pub smartstore: Vec<SmartstoreExportRow>,
    pub godomall: Vec<GodomallExportRow>,
    pub master: Option<ProductMaster>,
    /// 数值转换降级产生的警告（numeric_coerced）
    pub warnings: Vec<Warning>,
}

// 单表映射上下文
struct RowContext<'a> {
    table: &'a RawTable,
    resolved: &'a ResolvedColumns,
    row: &'a HashMap<String, String>,
    row_number: usize,
}

pub struct RecordNormalizer {
    cleaner: Box<dyn DataCleaner>,
    mapper: FieldMapper,
    locale: String,
}

impl RecordNormalizer {
    pub fn new(cleaner: Box<dyn DataCleaner>, locale: impl Into<String>) -> Self {
        Self {
            cleaner,
            mapper: FieldMapper,
            locale: locale.into(),
        }
    }

    /// 归一化全部输入表
    ///
    /// # 返回
    /// - Ok(NormalizedBatch): 规范记录 + 转换警告
    /// - Err(MissingColumn): 任一必填列缺失（不产生部分结果）
    pub fn normalize(&self, inputs: &RefineInputs) -> ImportResult<NormalizedBatch> {
        // === 阶段 1: 列校验 ===
        let ledger_cols = self.mapper.resolve(&inputs.ledger, &columns::LEDGER)?;
        let smartstore_cols = self.mapper.resolve(&inputs.smartstore, &columns::SMARTSTORE)?;
        let godomall_cols = self.mapper.resolve(&inputs.godomall, &columns::GODOMALL)?;
        let master_cols = match &inputs.master {
            Some(table) => Some(self.mapper.resolve(table, &columns::MASTER)?),
            None => None,
        };

        // === 阶段 2: 行映射 ===
        let mut warnings = Vec::new();
        let ledger = self.map_ledger(&inputs.ledger, &ledger_cols, &mut warnings);
        let smartstore = self.map_smartstore(&inputs.smartstore, &smartstore_cols, &mut warnings);
        let godomall = self.map_godomall(&inputs.godomall, &godomall_cols, &mut warnings);
        let master = match (&inputs.master, &master_cols) {
            (Some(table), Some(cols)) => Some(self.map_master(table, cols, &mut warnings)),
            _ => None,
        };

        debug!(
            ledger = ledger.len(),
            smartstore = smartstore.len(),
            godomall = godomall.len(),
            master = master.as_ref().map(|m| m.len()).unwrap_or(0),
            coerced = warnings.len(),
            "记录归一化完成"
        );

        Ok(NormalizedBatch {
            ledger,
            smartstore,
            godomall,
            master,
            warnings,
        })
    }

    fn rows<'a>(
        &self,
        table: &'a RawTable,
        resolved: &'a ResolvedColumns,
    ) -> impl Iterator<Item = RowContext<'a>> {
        table.rows.iter().enumerate().map(move |(idx, row)| RowContext {
            table,
            resolved,
            row,
            row_number: idx + 1,
        })
    }

    fn map_ledger(
        &self,
        table: &RawTable,
        cols: &ResolvedColumns,
        warnings: &mut Vec<Warning>,
    ) -> Vec<OrderLine> {
        self.rows(table, cols)
            .enumerate()
            .map(|(sequence_index, ctx)| OrderLine {
                item_code: self.text(&ctx, &columns::LEDGER_ITEM_CODE),
                item_name: self.text(&ctx, &columns::LEDGER_ITEM_NAME),
                quantity: self.quantity(&ctx, &columns::LEDGER_QUANTITY, warnings),
                paid_amount: self.amount(&ctx, &columns::LEDGER_AMOUNT, warnings),
                channel: Channel::from_label(&self.text(&ctx, &columns::LEDGER_CHANNEL)),
                recipient_name: self.text(&ctx, &columns::LEDGER_RECIPIENT),
                sequence_index,
            })
            .collect()
    }

    fn map_smartstore(
        &self,
        table: &RawTable,
        cols: &ResolvedColumns,
        warnings: &mut Vec<Warning>,
    ) -> Vec<SmartstoreExportRow> {
        self.rows(table, cols)
            .map(|ctx| SmartstoreExportRow {
                item_code: self.text(&ctx, &columns::SMARTSTORE_ITEM_CODE),
                quantity: self.quantity(&ctx, &columns::SMARTSTORE_QUANTITY, warnings),
                recipient_name: self.text(&ctx, &columns::SMARTSTORE_RECIPIENT),
                paid_amount: self.amount(&ctx, &columns::SMARTSTORE_PAID_AMOUNT, warnings),
            })
            .collect()
    }

    fn map_godomall(
        &self,
        table: &RawTable,
        cols: &ResolvedColumns,
        warnings: &mut Vec<Warning>,
    ) -> Vec<GodomallExportRow> {
        self.rows(table, cols)
            .map(|ctx| GodomallExportRow {
                recipient_name: self.text(&ctx, &columns::GODOMALL_RECIPIENT),
                quantity: self.quantity(&ctx, &columns::GODOMALL_QUANTITY, warnings),
                item_subtotal: self.amount(&ctx, &columns::GODOMALL_ITEM_SUBTOTAL, warnings),
                shipping_fee: self.amount(&ctx, &columns::GODOMALL_SHIPPING_FEE, warnings),
                member_discount: self.amount(&ctx, &columns::GODOMALL_MEMBER_DISCOUNT, warnings),
                coupon_discount: self.amount(&ctx, &columns::GODOMALL_COUPON_DISCOUNT, warnings),
                mileage_used: self.amount(&ctx, &columns::GODOMALL_MILEAGE_USED, warnings),
                grand_total: self.amount(&ctx, &columns::GODOMALL_GRAND_TOTAL, warnings),
            })
            .collect()
    }

    fn map_master(
        &self,
        table: &RawTable,
        cols: &ResolvedColumns,
        warnings: &mut Vec<Warning>,
    ) -> ProductMaster {
        let entries: Vec<ProductMasterEntry> = self
            .rows(table, cols)
            .map(|ctx| {
                let raw_multiplier = self.text(&ctx, &columns::MASTER_PACK_MULTIPLIER);
                let pack_multiplier = self
                    .cleaner
                    .normalize_null(Some(raw_multiplier))
                    .map(|_| self.quantity(&ctx, &columns::MASTER_PACK_MULTIPLIER, warnings));

                ProductMasterEntry {
                    sku_code: self.text(&ctx, &columns::MASTER_SKU_CODE),
                    tax_status: TaxStatus::parse(&self.text(&ctx, &columns::MASTER_TAX_STATUS)),
                    pack_multiplier,
                }
            })
            .collect();

        ProductMaster::from_entries(entries)
    }

    // ==========================================
    // 字段提取
    // ==========================================

    fn text(&self, ctx: &RowContext<'_>, spec: &ColumnSpec) -> String {
        self.cleaner
            .clean_text(self.mapper.get(ctx.row, ctx.resolved, spec))
    }

    fn amount(&self, ctx: &RowContext<'_>, spec: &ColumnSpec, warnings: &mut Vec<Warning>) -> Decimal {
        let raw = self.mapper.get(ctx.row, ctx.resolved, spec);
        match self.cleaner.parse_amount(spec.name, raw) {
            Ok(value) => value,
            Err(err) => {
                self.record_coercion(ctx, spec, raw, &err, warnings);
                Decimal::ZERO
            }
        }
    }

    fn quantity(&self, ctx: &RowContext<'_>, spec: &ColumnSpec, warnings: &mut Vec<Warning>) -> i64 {
        let raw = self.mapper.get(ctx.row, ctx.resolved, spec);
        match self.cleaner.parse_quantity(spec.name, raw) {
            Ok(value) => value,
            Err(err) => {
                self.record_coercion(ctx, spec, raw, &err, warnings);
                0
            }
        }
    }

    fn record_coercion(
        &self,
        ctx: &RowContext<'_>,
        spec: &ColumnSpec,
        raw: &str,
        err: &ImportError,
        warnings: &mut Vec<Warning>,
    ) {
        warn!(
            table = %ctx.table.name,
            row = ctx.row_number,
            column = spec.name,
            error = %err,
            "数值转换失败,按 0 处理"
        );
        let row_number = ctx.row_number.to_string();
        warnings.push(Warning::localized(
            WarningKind::NumericCoerced,
            format!("{}:{}:{}", ctx.table.name, ctx.row_number, spec.name),
            &self.locale,
            &[
                ("table", ctx.table.name.as_str()),
                ("row", row_number.as_str()),
                ("column", spec.name),
                ("value", raw),
            ],
        ));
    }
}
