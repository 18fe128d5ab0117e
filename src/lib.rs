// ==========================================
// 주문 데이터 정제 - 核心库
// ==========================================
// 输入: 스마트스토어 / 이카운트 台账 / 고도몰5 导出 + 可选商品主数据
// 输出: 修正台账、商品数量汇总、包装清单、会计上传行、警告
// 系统定位: 批处理工具（单次调用处理一批文件）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "ko");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部数据
pub mod importer;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 处理配置 + 主数据缓存
pub mod config;

// API 层 - 处理入口
pub mod api;

// 导出层 - 结果文件
pub mod exporter;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 性能统计
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{Channel, TaxStatus, WarningKind};

// 领域实体
pub use domain::{
    AccountingRow, LedgerRow, OrderLine, PackingBundle, PackingRow, ProductMaster,
    ProductMasterEntry, QuantitySummaryRow, Warning,
};

// 引擎
pub use engine::{
    AccountingRowBuilder, AnomalyDetector, PackingBundler, PriceReconciler, RefineOrchestrator,
    RefineReport, ReportAssembler,
};

// API
pub use api::{ApiError, RefineApi, RefinePaths, RefineResponse};

// 配置
pub use config::{ConfigManager, RefineConfig};

// 导出
pub use exporter::CsvExporter;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "주문 데이터 정제";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
