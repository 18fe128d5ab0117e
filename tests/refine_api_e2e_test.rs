// ==========================================
// RefineApi 端到端测试
// ==========================================
// 测试目标: 文件输入 → 处理 → 导出文件
// ==========================================


use order_refine::api::{RefineApi, RefinePaths};
use order_refine::config::{ConfigManager, RefineConfig};
use order_refine::domain::WarningKind;
use order_refine::exporter::{file_names, CsvExporter};
use order_refine::logging;
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use test_helpers::*;

fn write_scenario(dir: &Path, with_master: bool) -> RefinePaths {
    RefinePaths {
        smartstore: write_csv(dir, "smartstore.csv", &SMARTSTORE_HEADERS, &SCENARIO_SMARTSTORE),
        ledger: write_csv(dir, "ledger.csv", &LEDGER_HEADERS, &SCENARIO_LEDGER),
        godomall: write_csv(dir, "godomall.csv", &GODOMALL_HEADERS, &SCENARIO_GODOMALL),
        master: with_master
            .then(|| write_csv(dir, "master.csv", &MASTER_HEADERS, &SCENARIO_MASTER)),
    }
}

#[test]
fn test_process_files_and_export() {
    logging::init_test();
    let dir = tempdir().unwrap();
    let paths = write_scenario(dir.path(), true);

    let api = RefineApi::new(RefineConfig::default(), run_date());
    let response = api.process_files(&paths);

    assert!(response.success, "{}", response.message);
    assert_eq!(response.message, "모든 파일 처리가 성공적으로 완료되었습니다.");
    assert_eq!(response.warnings.len(), 2);

    let report = response.report.unwrap();
    assert_eq!(report.ledger.len(), 6);

    let out = dir.path().join("out");
    let written = CsvExporter::new(&out).with_json(true).export(&report).unwrap();
    assert_eq!(written.len(), 6);

    let ledger = fs::read_to_string(out.join(file_names::LEDGER)).unwrap();
    assert!(ledger.lines().next().unwrap().ends_with("주문수량,실결제금액,쇼핑몰,수령자명"));
    let summary = fs::read_to_string(out.join(file_names::QUANTITY_SUMMARY)).unwrap();
    assert!(summary.lines().next().unwrap().ends_with("SKU상품명,개수"));

    let packing = fs::read_to_string(out.join(file_names::PACKING_LIST)).unwrap();
    let lines: Vec<&str> = packing.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines[4].starts_with("4,"));
    assert!(lines[5].starts_with(",낙지젓"));

    let accounting = fs::read_to_string(out.join(file_names::ACCOUNTING_UPLOAD)).unwrap();
    assert_eq!(accounting.lines().count(), 7);
    assert!(accounting.lines().nth(1).unwrap().starts_with("20261019,,,고래미자사몰_현금영수증(고도몰),,고래미,11,"));

    let warnings = fs::read_to_string(out.join(file_names::WARNINGS)).unwrap();
    assert_eq!(warnings.lines().count(), 2);
    assert!(warnings.contains("[동명이인 의심] **김철수**"));
    assert!(warnings.contains("[미등록 상품] **Z999**"));
}

#[test]
fn test_missing_required_column_fails_without_output() {
    let dir = tempdir().unwrap();
    let mut paths = write_scenario(dir.path(), false);
    paths.godomall = write_csv(
        dir.path(),
        "godomall_broken.csv",
        &GODOMALL_HEADERS[..7],
        &[&["이영희", "1", "15000", "3000", "0", "0", "0"]],
    );

    let api = RefineApi::new(RefineConfig::default(), run_date());
    let response = api.process_files(&paths);

    assert!(!response.success);
    assert!(response.report.is_none());
    assert!(response.warnings.is_empty());
    assert!(response.message.contains("총 결제 금액"));
}

#[test]
fn test_missing_master_file_is_structural_failure() {
    let dir = tempdir().unwrap();
    let mut paths = write_scenario(dir.path(), false);
    paths.master = Some(dir.path().join("no_such_master.xlsx"));

    let mut config = RefineConfig::default();
    config.locale = "en".to_string();
    let response = RefineApi::new(config, run_date()).process_files(&paths);

    assert!(!response.success);
    assert!(response.message.contains("no_such_master.xlsx"));
}

#[test]
fn test_master_from_config_file() {
    let dir = tempdir().unwrap();
    let paths = write_scenario(dir.path(), false);
    let mut master_rows: Vec<&[&str]> = SCENARIO_MASTER.to_vec();
    master_rows.push(&["E005", "과세", "여섯"]);
    let master = write_csv(dir.path(), "configured_master.csv", &MASTER_HEADERS, &master_rows);

    let config_path = dir.path().join("config.json");
    fs::write(
        &config_path,
        format!(
            r#"{{"warehouse": "본사", "locale": "en", "master_path": {}}}"#,
            serde_json::to_string(&master).unwrap()
        ),
    )
    .unwrap();

    let config = ConfigManager::load(Some(config_path.as_path())).unwrap();
    assert_eq!(config.warehouse, "본사");

    let response = RefineApi::new(config, run_date()).process_files(&paths);
    assert!(response.success, "{}", response.message);

    // 配置主数据的数值转换警告同样返回给调用方,并使用本次的语言
    let coerced: Vec<_> = response
        .warnings
        .iter()
        .filter(|w| w.kind == WarningKind::NumericCoerced)
        .collect();
    assert_eq!(coerced.len(), 1);
    assert!(coerced[0].message.contains("**master** row 5 / 입수량 = '여섯'"));

    let unregistered: Vec<_> = response
        .warnings
        .iter()
        .filter(|w| w.kind == WarningKind::UnregisteredItem)
        .collect();
    assert_eq!(unregistered.len(), 1);

    let report = response.report.unwrap();
    assert!(report.accounting.iter().all(|r| r.warehouse == "본사"));
}

#[test]
fn test_unsupported_extension_rejected() {
    let dir = tempdir().unwrap();
    let mut paths = write_scenario(dir.path(), false);
    let bogus = dir.path().join("ledger.txt");
    fs::write(&bogus, "not a table").unwrap();
    paths.ledger = bogus;

    let response = RefineApi::new(RefineConfig::default(), run_date()).process_files(&paths);
    assert!(!response.success);
    assert!(response.report.is_none());
    assert!(response.message.contains("지원하지 않는 파일 형식입니다: .txt"));
}
