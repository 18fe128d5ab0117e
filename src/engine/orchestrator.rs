// ==========================================
// 주문 데이터 정제 - 引擎编排器
// ==========================================
// 用途: 协调各处理阶段的执行顺序
// 流程: 归一化 → 金额修正 → 同名检测 → 包装分组 → 会计行 → 汇总
// 红线: 纯函数管线；结构性错误整体失败,不产生部分结果
// ==========================================

use crate::config::RefineConfig;
use crate::domain::warning::count_of;
use crate::domain::{ProductMaster, WarningKind};
use crate::engine::{
    AccountingRowBuilder, AnomalyDetector, GodomallRule, PackingBundler, PriceReconciler,
    RefineReport, ReportAssembler, SmartstoreRule,
};
use crate::importer::{DataCleanerImpl, ImportResult, RecordNormalizer, RefineInputs};
use crate::perf::PerfGuard;
use chrono::NaiveDate;
use tracing::{info, instrument};

// ==========================================
// RefineOrchestrator - 引擎编排器
// ==========================================
pub struct RefineOrchestrator<'a> {
    config: &'a RefineConfig,
    run_date: NaiveDate,
}

impl<'a> RefineOrchestrator<'a> {
    /// # 参数
    /// - config: 处理配置
    /// - run_date: 会计上传日期（일자）
    pub fn new(config: &'a RefineConfig, run_date: NaiveDate) -> Self {
        Self { config, run_date }
    }

    /// 执行完整处理流程
    ///
    /// # 参数
    /// - inputs: 原始输入表
    /// - master: 外部提供的商品主数据（inputs.master 存在时优先使用后者）
    ///
    /// # 返回
    /// - Ok(RefineReport): 四张输出表 + 警告
    /// - Err: 结构性错误（缺列等）
    #[instrument(skip(self, inputs, master), fields(
        ledger_rows = inputs.ledger.len(),
        run_date = %self.run_date
    ))]
    pub fn run(
        &self,
        inputs: &RefineInputs,
        master: Option<&ProductMaster>,
    ) -> ImportResult<RefineReport> {
        let locale = self.config.locale.as_str();

        // === 步骤 1: 归一化 ===
        let batch = {
            let _perf = PerfGuard::new("refine.normalize");
            RecordNormalizer::new(Box::new(DataCleanerImpl), locale).normalize(inputs)?
        };

        let empty = ProductMaster::empty();
        let master = batch.master.as_ref().or(master).unwrap_or(&empty);

        // === 步骤 2: 金额修正 ===
        let reconciled = {
            let _perf = PerfGuard::new("refine.reconcile");
            PriceReconciler::new(self.config.total_tolerance, locale)
                .register(Box::new(GodomallRule::new(&batch.godomall)))
                .register(Box::new(SmartstoreRule::new(&batch.smartstore)))
                .reconcile(batch.ledger.clone())
        };
        let lines = reconciled.lines;

        // === 步骤 3: 同名检测 ===
        let duplicate_warnings = AnomalyDetector::detect(&lines, locale);

        // === 步骤 4: 包装分组 ===
        let packing_list = {
            let _perf = PerfGuard::new("refine.bundle");
            PackingBundler::packing_rows(&PackingBundler::bundle(&lines))
        };

        // === 步骤 5: 会计上传行 ===
        let (accounting, unregistered_warnings) = {
            let _perf = PerfGuard::new("refine.accounting");
            AccountingRowBuilder::new(self.config, self.run_date).build(&lines, master)
        };

        // === 步骤 6: 汇总 ===
        let mut warnings = batch.warnings;
        warnings.extend(reconciled.warnings);
        warnings.extend(duplicate_warnings);
        warnings.extend(unregistered_warnings);

        let report = ReportAssembler::assemble(&lines, packing_list, accounting, warnings);

        info!(
            ledger = report.ledger.len(),
            corrected = reconciled.corrected,
            bundles = report.packing_list.iter().filter(|r| r.bundle_no.is_some()).count(),
            accounting = report.accounting.len(),
            unregistered = count_of(&report.warnings, WarningKind::UnregisteredItem),
            warnings = report.warnings.len(),
            "订单数据处理完成"
        );

        Ok(report)
    }
}
