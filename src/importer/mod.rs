// ==========================================
// 주문 데이터 정제 - 导入层
// ==========================================
// 职责: 外部文件 → 规范记录
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod normalizer;
pub mod table;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{columns, ColumnSpec, FieldMapper};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use normalizer::{NormalizedBatch, RecordNormalizer, RefineInputs};
pub use table::RawTable;

// 重导出 Trait 接口
pub use importer_trait::{DataCleaner, FileParser};
