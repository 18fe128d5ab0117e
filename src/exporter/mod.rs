// ==========================================
// 주문 데이터 정제 - 导出层
// ==========================================
// 职责: 处理结果 → 输出文件
// ==========================================

pub mod csv_exporter;
pub mod error;

pub use csv_exporter::{file_names, CsvExporter};
pub use error::{ExportError, ExportResult};
