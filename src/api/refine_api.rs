// ==========================================
// 주문 데이터 정제 - 处理 API
// ==========================================
// 职责: 文件/表级入口,封装成功/失败响应
// 红线: 失败时整体失败 → report = None, 只有一条失败消息,无警告
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{master_cache, RefineConfig};
use crate::domain::{ProductMaster, Warning};
use crate::engine::{RefineOrchestrator, RefineReport};
use crate::i18n;
use crate::importer::{RefineInputs, UniversalFileParser};
use crate::perf::PerfGuard;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{error, info, info_span};
use uuid::Uuid;

/// 输入文件路径
#[derive(Debug, Clone, Default)]
pub struct RefinePaths {
    pub smartstore: PathBuf,
    pub ledger: PathBuf,
    pub godomall: PathBuf,
    /// 未指定时回退到配置中的主数据文件
    pub master: Option<PathBuf>,
}

/// 处理响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefineResponse {
    pub report: Option<RefineReport>,
    pub success: bool,
    pub message: String,
    pub warnings: Vec<Warning>,
}

pub struct RefineApi {
    config: RefineConfig,
    run_date: NaiveDate,
}

impl RefineApi {
    /// # 参数
    /// - config: 已校验的处理配置
    /// - run_date: 会计上传日期
    pub fn new(config: RefineConfig, run_date: NaiveDate) -> Self {
        Self { config, run_date }
    }

    pub fn config(&self) -> &RefineConfig {
        &self.config
    }

    /// 表级入口（不读文件）
    pub fn process_tables(
        &self,
        inputs: &RefineInputs,
        master: Option<&ProductMaster>,
    ) -> RefineResponse {
        let run_id = Uuid::new_v4();
        let span = info_span!("refine_run", run_id = %run_id);
        let _enter = span.enter();

        let result = RefineOrchestrator::new(&self.config, self.run_date)
            .run(inputs, master)
            .map_err(ApiError::from);
        self.respond(result)
    }

    /// 文件级入口: 解析输入文件 → 加载主数据 → 处理
    pub fn process_files(&self, paths: &RefinePaths) -> RefineResponse {
        let run_id = Uuid::new_v4();
        let span = info_span!("refine_run", run_id = %run_id);
        let _enter = span.enter();
        let _perf = PerfGuard::new("api.process_files");

        let result = self.load_and_run(paths);
        self.respond(result)
    }

    fn load_and_run(&self, paths: &RefinePaths) -> ApiResult<RefineReport> {
        let parser = UniversalFileParser;
        let inputs = RefineInputs {
            smartstore: parser.parse(&paths.smartstore, "smartstore")?,
            ledger: parser.parse(&paths.ledger, "ledger")?,
            godomall: parser.parse(&paths.godomall, "godomall")?,
            // 显式主数据优先；否则使用配置中的缓存主数据表
            master: match (&paths.master, &self.config.master_path) {
                (Some(path), _) => Some(parser.parse(path, "master")?),
                (None, Some(path)) => Some(master_cache::get_or_load(path)?.clone()),
                (None, None) => None,
            },
        };

        let report = RefineOrchestrator::new(&self.config, self.run_date).run(&inputs, None)?;
        Ok(report)
    }

    fn respond(&self, result: ApiResult<RefineReport>) -> RefineResponse {
        let locale = self.config.locale.as_str();
        match result {
            Ok(report) => {
                info!(warnings = report.warnings.len(), "处理成功");
                RefineResponse {
                    warnings: report.warnings.clone(),
                    report: Some(report),
                    success: true,
                    message: i18n::t_in(locale, "api.success", &[]),
                }
            }
            Err(err) => {
                error!(error = %err, "处理失败");
                let (key, args) = err.message_key();
                let detail = i18n::t_in(locale, key, &args);
                let message = match &err {
                    ApiError::NotFound(_) => detail,
                    _ => i18n::t_in(locale, "api.failure", &[("reason", detail.as_str())]),
                };
                RefineResponse {
                    report: None,
                    success: false,
                    message,
                    warnings: Vec::new(),
                }
            }
        }
    }
}
