// ==========================================
// 주문 데이터 정제 - 导入接口 Trait
// ==========================================
// 职责: 定义文件解析 / 数据清洗接口（不包含实现）
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::table::RawTable;
use rust_decimal::Decimal;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表
    ///
    /// # 参数
    /// - file_path: 文件路径
    /// - table_name: 表名（用于错误与警告消息）
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 行记录（已跳过空白行）
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_table(&self, file_path: &Path, table_name: &str) -> ImportResult<RawTable>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 字段清洗与数值转换接口
// 实现者: DataCleaner
pub trait DataCleaner: Send + Sync {
    /// 清洗文本字段（TRIM）
    fn clean_text(&self, value: &str) -> String;

    /// 标准化 NULL 值（空字符串/空白 → None）
    fn normalize_null(&self, value: Option<String>) -> Option<String>;

    /// 解析金额
    ///
    /// # 规则
    /// - 去除千分位、货币符号、空白
    /// - 空值 → 0
    /// - 绝对值超过 MAX_AMOUNT 视为无法解析
    ///
    /// # 返回
    /// - Ok(Decimal): 解析成功
    /// - Err(TypeConversionError): 非空且无法解析
    fn parse_amount(&self, field: &str, value: &str) -> ImportResult<Decimal>;

    /// 解析数量
    ///
    /// # 规则
    /// - 允许 "2.0" 形式的整数值,小数部分向零截断
    /// - 空值 → 0
    fn parse_quantity(&self, field: &str, value: &str) -> ImportResult<i64>;
}
