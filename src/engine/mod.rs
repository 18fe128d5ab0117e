// ==========================================
// 주문 데이터 정제 - 引擎层
// ==========================================
// 职责: 金额修正、异常检测、包装分组、会计行生成
// 红线: 引擎不做文件 I/O,不修改 sequence_index
// ==========================================

pub mod accounting_builder;
pub mod anomaly_detector;
pub mod correction_rules;
pub mod orchestrator;
pub mod packing_bundler;
pub mod price_reconciler;
pub mod report_assembler;

// 重导出核心引擎
pub use accounting_builder::{AccountingRowBuilder, DerivedQuantity, TaxSplit};
pub use anomaly_detector::AnomalyDetector;
pub use correction_rules::{
    ChannelCorrectionRule, ChannelPriceRecord, GodomallRule, PriceKey, SmartstoreRule,
    TotalDiscrepancy,
};
pub use orchestrator::RefineOrchestrator;
pub use packing_bundler::PackingBundler;
pub use price_reconciler::{PriceReconciler, ReconcileOutcome};
pub use report_assembler::{RefineReport, ReportAssembler};
