// ==========================================
// 주문 데이터 정제 - 领域层
// ==========================================
// 职责: 实体与值类型,不含 I/O
// ==========================================

pub mod accounting;
pub mod master;
pub mod order;
pub mod types;
pub mod warning;

// 重导出核心类型
pub use accounting::{AccountingRow, ACCOUNTING_COLUMNS};
pub use master::{ProductMaster, ProductMasterEntry};
pub use order::{
    GodomallExportRow, LedgerRow, OrderLine, PackingBundle, PackingRow, QuantitySummaryRow,
    SmartstoreExportRow,
};
pub use types::{Channel, TaxStatus, WarningKind};
pub use warning::Warning;
