// ==========================================
// 주문 데이터 정제 - 命令行入口
// ==========================================
// 用法:
//   order-refine --smartstore A.xlsx --ledger B.xlsx --godomall C.xlsx \
//       [--master M.xlsx] [--config cfg.json] [--out DIR] [--date YYYYMMDD] \
//       [--locale ko|en] [--json]
// 退出码: 0 = 成功, 1 = 处理失败, 2 = 参数/配置错误
// ==========================================

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::Parser;
use order_refine::api::{RefineApi, RefinePaths};
use order_refine::config::ConfigManager;
use order_refine::exporter::CsvExporter;
use order_refine::{i18n, logging};
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "order-refine")]
#[command(about = "채널 주문 대사 및 출고/회계 산출물 생성")]
#[command(version)]
struct Cli {
    /// 스마트스토어 주문 내역 (xlsx/xls/csv)
    #[arg(long)]
    smartstore: PathBuf,

    /// 이카운트 주문 목록 (기준 원장)
    #[arg(long)]
    ledger: PathBuf,

    /// 고도몰5 주문 내역
    #[arg(long)]
    godomall: PathBuf,

    /// 상품 마스터 (미지정 시 설정 파일의 master_path 사용)
    #[arg(long)]
    master: Option<PathBuf>,

    /// 설정 파일 (JSON)
    #[arg(long, env = "ORDER_REFINE_CONFIG")]
    config: Option<PathBuf>,

    /// 결과 출력 디렉터리
    #[arg(long, default_value = "out")]
    out: PathBuf,

    /// 회계 일자 (YYYYMMDD, 기본값: 오늘)
    #[arg(long)]
    date: Option<String>,

    /// 메시지 언어 (ko / en)
    #[arg(long, env = "ORDER_REFINE_LOCALE")]
    locale: Option<String>,

    /// report.json 함께 출력
    #[arg(long)]
    json: bool,

    /// 로그를 JSON 형식으로 출력
    #[arg(long)]
    log_json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    tracing::info!(version = order_refine::VERSION, "{}", order_refine::APP_NAME);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_FAILURE),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(EXIT_USAGE)
        }
    }
}

/// 返回 Ok(false) 表示处理失败（已输出失败消息）
fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = ConfigManager::load(cli.config.as_deref()).context("설정 파일 로드 실패")?;

    if let Some(locale) = cli.locale {
        if !i18n::is_supported(&locale) {
            bail!("지원하지 않는 언어: {}", locale);
        }
        config.locale = locale;
    }
    i18n::set_locale(&config.locale);
    tracing::debug!(locale = %i18n::current_locale(), "메시지 언어 설정");

    let run_date = match cli.date.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y%m%d")
            .with_context(|| format!("잘못된 날짜 형식: {} (YYYYMMDD)", raw))?,
        None => Local::now().date_naive(),
    };

    let api = RefineApi::new(config, run_date);
    let response = api.process_files(&RefinePaths {
        smartstore: cli.smartstore,
        ledger: cli.ledger,
        godomall: cli.godomall,
        master: cli.master,
    });

    let report = match response.report {
        Some(report) if response.success => report,
        _ => {
            eprintln!("{}", response.message);
            return Ok(false);
        }
    };

    let written = CsvExporter::new(&cli.out)
        .with_json(cli.json)
        .export(&report)
        .context("결과 파일 저장 실패")?;

    println!("{}", response.message);
    let count = written.len().to_string();
    println!("{}", i18n::t_with_args("cli.written", &[("count", count.as_str())]));
    for path in &written {
        println!("  {}", path.display());
    }
    for warning in &response.warnings {
        println!("{}", warning);
    }
    Ok(true)
}
