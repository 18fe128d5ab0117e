// ==========================================
// 주문 데이터 정제 - API层错误类型
// ==========================================
// 职责: 汇总导入错误,保留结构化字段供本地化失败消息使用
// ==========================================

use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
///
/// 任一错误都会使整次处理失败（不返回部分结果）
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("文件不存在: {0}")]
    NotFound(String),

    #[error("文件格式不支持: {0}")]
    UnsupportedFormat(String),

    #[error("必填列缺失 (表 {table}): {column}")]
    MissingColumn { table: String, column: String },

    #[error("表为空: {0}")]
    EmptyTable(String),

    /// 文件读取/解析失败,保留底层库的原始信息
    #[error("文件读取失败: {0}")]
    ReadFailed(String),

    #[error("数值无效 (字段 {field}): {value}")]
    InvalidValue { field: String, value: String },
}

impl ApiError {
    /// 本地化消息键与参数
    pub fn message_key(&self) -> (&'static str, Vec<(&'static str, &str)>) {
        match self {
            ApiError::NotFound(path) => ("api.file_not_found", vec![("path", path.as_str())]),
            ApiError::UnsupportedFormat(ext) => {
                ("api.unsupported_format", vec![("extension", ext.as_str())])
            }
            ApiError::MissingColumn { table, column } => (
                "api.missing_column",
                vec![("table", table.as_str()), ("column", column.as_str())],
            ),
            ApiError::EmptyTable(table) => ("api.empty_table", vec![("table", table.as_str())]),
            ApiError::ReadFailed(detail) => ("api.read_failed", vec![("detail", detail.as_str())]),
            ApiError::InvalidValue { field, value } => (
                "api.invalid_value",
                vec![("field", field.as_str()), ("value", value.as_str())],
            ),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(path) => ApiError::NotFound(path),
            ImportError::UnsupportedFormat(ext) => ApiError::UnsupportedFormat(ext),
            ImportError::MissingColumn { table, column } => {
                ApiError::MissingColumn { table, column }
            }
            ImportError::EmptyTable(table) => ApiError::EmptyTable(table),
            ImportError::FileReadError(detail)
            | ImportError::ExcelParseError(detail)
            | ImportError::CsvParseError(detail) => ApiError::ReadFailed(detail),
            ImportError::TypeConversionError { field, value, .. } => {
                ApiError::InvalidValue { field, value }
            }
        }
    }
}

/// API 结果类型
pub type ApiResult<T> = Result<T, ApiError>;
