// ==========================================
// 주문 데이터 정제 - 结果导出器
// ==========================================
// 职责: RefineReport → 输出目录下的 CSV / 文本 / JSON 文件
// 编码: UTF-8 + BOM（表格软件按 UTF-8 识别韩文）
// ==========================================

use crate::domain::ACCOUNTING_COLUMNS;
use crate::engine::RefineReport;
use crate::exporter::error::{ExportError, ExportResult};
use csv::Writer;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 输出文件名
pub mod file_names {
    pub const LEDGER: &str = "ledger.csv";
    pub const QUANTITY_SUMMARY: &str = "quantity_summary.csv";
    pub const PACKING_LIST: &str = "packing_list.csv";
    pub const ACCOUNTING_UPLOAD: &str = "accounting_upload.csv";
    pub const WARNINGS: &str = "warnings.txt";
    pub const REPORT_JSON: &str = "report.json";
}

// 修正后金额列名为 실결제금액,汇总数量列名为 개수
const LEDGER_HEADERS: [&str; 6] = [
    "재고관리코드",
    "SKU상품명",
    "주문수량",
    "실결제금액",
    "쇼핑몰",
    "수령자명",
];
const SUMMARY_HEADERS: [&str; 2] = ["SKU상품명", "개수"];
const PACKING_HEADERS: [&str; 5] = ["묶음번호", "SKU상품명", "주문수량", "수령자명", "쇼핑몰"];

pub struct CsvExporter {
    out_dir: PathBuf,
    write_json: bool,
}

impl CsvExporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            write_json: false,
        }
    }

    /// 同时写出 report.json
    pub fn with_json(mut self, enabled: bool) -> Self {
        self.write_json = enabled;
        self
    }

    /// 写出全部结果文件
    ///
    /// # 返回
    /// 已写出的文件路径（按写出顺序）
    pub fn export(&self, report: &RefineReport) -> ExportResult<Vec<PathBuf>> {
        fs::create_dir_all(&self.out_dir).map_err(|e| ExportError::OutputDirError {
            path: self.out_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let mut written = Vec::new();

        let path = self.out_dir.join(file_names::LEDGER);
        write_csv(&path, &LEDGER_HEADERS, report.ledger.iter().map(|row| {
            vec![
                row.item_code.clone(),
                row.item_name.clone(),
                row.quantity.to_string(),
                row.paid_amount.normalize().to_string(),
                row.channel.clone(),
                row.recipient_name.clone(),
            ]
        }))?;
        written.push(path);

        let path = self.out_dir.join(file_names::QUANTITY_SUMMARY);
        write_csv(&path, &SUMMARY_HEADERS, report.quantity_summary.iter().map(|row| {
            vec![row.item_name.clone(), row.total_quantity.to_string()]
        }))?;
        written.push(path);

        let path = self.out_dir.join(file_names::PACKING_LIST);
        write_csv(&path, &PACKING_HEADERS, report.packing_list.iter().map(|row| {
            vec![
                row.bundle_no.map(|n| n.to_string()).unwrap_or_default(),
                row.item_name.clone(),
                row.quantity.to_string(),
                row.recipient_name.clone(),
                row.channel.clone(),
            ]
        }))?;
        written.push(path);

        let path = self.out_dir.join(file_names::ACCOUNTING_UPLOAD);
        write_csv(
            &path,
            &ACCOUNTING_COLUMNS,
            report.accounting.iter().map(|row| row.to_cells()),
        )?;
        written.push(path);

        let path = self.out_dir.join(file_names::WARNINGS);
        let mut out = BufWriter::new(File::create(&path)?);
        for warning in &report.warnings {
            writeln!(out, "{}", warning)?;
        }
        out.flush()?;
        written.push(path);

        if self.write_json {
            let path = self.out_dir.join(file_names::REPORT_JSON);
            let out = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(out, report)?;
            written.push(path);
        }

        info!(
            out_dir = %self.out_dir.display(),
            files = written.len(),
            "结果文件已写出"
        );
        Ok(written)
    }
}

fn write_csv<I>(path: &Path, headers: &[&str], rows: I) -> ExportResult<()>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(UTF8_BOM)?;

    let mut writer = Writer::from_writer(file);
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
