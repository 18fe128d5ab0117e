// ==========================================
// 주문 데이터 정제 - 文件解析器实现
// ==========================================
// 职责: 渠道导出文件 → RawTable
// 支持: Excel (.xlsx/.xls/.xlsm) / CSV (.csv)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use crate::importer::table::RawTable;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::debug;

const UTF8_BOM: char = '\u{feff}';

fn check_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn clean_header(raw: &str) -> String {
    raw.trim_start_matches(UTF8_BOM).trim().to_string()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, file_path: &Path, table_name: &str) -> ImportResult<RawTable> {
        let path = file_path;
        check_exists(path)?;

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader.headers()?.iter().map(clean_header).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::EmptyTable(table_name.to_string()));
        }

        let mut table = RawTable::new(table_name, headers);
        let mut skipped = 0usize;
        for result in reader.records() {
            let record = result?;
            let cells: Vec<String> = record.iter().map(|v| v.to_string()).collect();
            if !table.push_row(&cells) {
                skipped += 1;
            }
        }

        debug!(table = table_name, rows = table.len(), skipped, "CSV 解析完成");
        Ok(table)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 只读取第一个工作表,第一行为表头
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, file_path: &Path, table_name: &str) -> ImportResult<RawTable> {
        let path = file_path;
        check_exists(path)?;

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !matches!(ext.as_str(), "xlsx" | "xls" | "xlsm") {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(path)?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::EmptyTable(table_name.to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::EmptyTable(table_name.to_string()))?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| clean_header(&cell.to_string()))
            .collect();

        let mut table = RawTable::new(table_name, headers);
        let mut skipped = 0usize;
        for data_row in rows {
            let cells: Vec<String> = data_row.iter().map(|cell| cell.to_string()).collect();
            if !table.push_row(&cells) {
                skipped += 1;
            }
        }

        debug!(
            table = table_name,
            sheet = %sheet_name,
            rows = table.len(),
            skipped,
            "Excel 解析完成"
        );
        Ok(table)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P, table_name: &str) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_table(path, table_name),
            "xlsx" | "xls" | "xlsm" => ExcelParser.parse_to_raw_table(path, table_name),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
