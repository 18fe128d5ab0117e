// ==========================================
// 주문 데이터 정제 - 配置管理器
// ==========================================
// 职责: 配置加载、默认值、校验
// 存储: JSON 文件（可选）
// 查找顺序: 显式路径 → $ORDER_REFINE_CONFIG → <config_dir>/order-refine/config.json → 内置默认
// ==========================================

use crate::domain::TaxStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

// ==========================================
// 配置键 / 环境变量
// ==========================================
pub mod config_keys {
    /// 配置文件路径环境变量
    pub const CONFIG_PATH_ENV: &str = "ORDER_REFINE_CONFIG";
    /// 配置目录名（位于系统配置目录下）
    pub const CONFIG_DIR_NAME: &str = "order-refine";
    /// 配置文件名
    pub const CONFIG_FILE_NAME: &str = "config.json";
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值错误 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// RefineConfig - 处理配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineConfig {
    /// 消息语言（ko / en）
    pub locale: String,

    /// 会计上传: 出货仓库（출하창고）
    pub warehouse: String,

    /// 会计上传: 凭证摘要（적요_전표）
    pub voucher_memo: String,

    /// 渠道标签 → 会计客户名（거래처명）
    pub client_names: BTreeMap<String, String>,

    /// 会计上传排序: 客户名优先级（未列出者排在最后）
    pub client_sort_order: Vec<String>,

    /// 箱装商品标记（商品名包含时按入数换算）
    pub box_marker: String,

    /// 三件装标记（商品名包含任一时数量 ×three_pack_factor）
    pub three_pack_markers: Vec<String>,

    pub three_pack_factor: i64,

    /// 含税价 → 供货价除数（10% 增值税 = 1.1）
    pub vat_divisor: Decimal,

    /// 渠道 B 订单总额核对容差（货币单位）
    pub total_tolerance: Decimal,

    /// 主数据未登记商品的默认课税区分
    pub unregistered_tax_status: TaxStatus,

    /// 商品主数据文件（未通过参数指定时使用）
    pub master_path: Option<PathBuf>,
}

impl Default for RefineConfig {
    fn default() -> Self {
        let client_names = [
            ("쿠팡", "쿠팡 주식회사"),
            ("고도몰5", "고래미자사몰_현금영수증(고도몰)"),
            ("스마트스토어", "스토어팜"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            locale: "ko".to_string(),
            warehouse: "고래미".to_string(),
            voucher_memo: "오전/온라인".to_string(),
            client_names,
            client_sort_order: vec![
                "고래미자사몰_현금영수증(고도몰)".to_string(),
                "스토어팜".to_string(),
                "쿠팡 주식회사".to_string(),
            ],
            box_marker: "BOX".to_string(),
            three_pack_markers: vec!["3개입".to_string(), "3개".to_string()],
            three_pack_factor: 3,
            vat_divisor: Decimal::new(11, 1),
            total_tolerance: Decimal::ONE,
            unregistered_tax_status: TaxStatus::Taxed,
            master_path: None,
        }
    }
}

impl RefineConfig {
    /// 渠道标签对应的会计客户名（未配置时原样返回）
    pub fn client_name_for<'a>(&'a self, channel_label: &'a str) -> &'a str {
        self.client_names
            .get(channel_label)
            .map(String::as_str)
            .unwrap_or(channel_label)
    }

    /// 客户名排序优先级（未列出者返回列表长度,即排在最后）
    pub fn client_rank(&self, client_name: &str) -> usize {
        self.client_sort_order
            .iter()
            .position(|c| c == client_name)
            .unwrap_or(self.client_sort_order.len())
    }

    /// 配置校验
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.box_marker.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "box_marker".to_string(),
                message: "箱装标记不能为空".to_string(),
            });
        }
        if self.vat_divisor <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                key: "vat_divisor".to_string(),
                message: format!("必须大于 0: {}", self.vat_divisor),
            });
        }
        if self.total_tolerance < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                key: "total_tolerance".to_string(),
                message: format!("不能为负数: {}", self.total_tolerance),
            });
        }
        if self.three_pack_factor <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "three_pack_factor".to_string(),
                message: format!("必须大于 0: {}", self.three_pack_factor),
            });
        }
        if self.three_pack_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "three_pack_markers".to_string(),
                message: "标记不能为空字符串".to_string(),
            });
        }
        Ok(())
    }
}

// ==========================================
// ConfigManager - 配置加载
// ==========================================
pub struct ConfigManager;

impl ConfigManager {
    /// 加载配置
    ///
    /// # 参数
    /// - explicit_path: 命令行指定的配置文件（存在时必须可读）
    ///
    /// # 返回
    /// - Ok(RefineConfig): 已校验配置
    /// - Err: 文件读取/解析失败或配置值非法
    pub fn load(explicit_path: Option<&Path>) -> Result<RefineConfig, ConfigError> {
        let config = match Self::locate(explicit_path) {
            Some(path) => Self::load_from_file(&path)?,
            None => {
                debug!("未找到配置文件,使用内置默认配置");
                RefineConfig::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// 从指定 JSON 文件加载（缺省字段取默认值）
    pub fn load_from_file(path: &Path) -> Result<RefineConfig, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: RefineConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        info!(path = %path.display(), "配置文件已加载");
        Ok(config)
    }

    /// 默认配置文件路径（<config_dir>/order-refine/config.json）
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(config_keys::CONFIG_DIR_NAME)
                .join(config_keys::CONFIG_FILE_NAME)
        })
    }

    fn locate(explicit_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit_path {
            return Some(path.to_path_buf());
        }
        if let Ok(env_path) = std::env::var(config_keys::CONFIG_PATH_ENV) {
            if !env_path.trim().is_empty() {
                return Some(PathBuf::from(env_path));
            }
        }
        Self::default_config_path().filter(|p| p.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = RefineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.vat_divisor, Decimal::new(11, 1));
        assert_eq!(config.unregistered_tax_status, TaxStatus::Taxed);
    }

    #[test]
    fn test_client_name_mapping() {
        let config = RefineConfig::default();
        assert_eq!(config.client_name_for("스마트스토어"), "스토어팜");
        assert_eq!(config.client_name_for("쿠팡"), "쿠팡 주식회사");
        assert_eq!(config.client_name_for("11번가"), "11번가");
    }

    #[test]
    fn test_client_rank() {
        let config = RefineConfig::default();
        assert_eq!(config.client_rank("고래미자사몰_현금영수증(고도몰)"), 0);
        assert_eq!(config.client_rank("스토어팜"), 1);
        assert_eq!(config.client_rank("쿠팡 주식회사"), 2);
        assert_eq!(config.client_rank("11번가"), 3);
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"locale": "en", "warehouse": "본사창고", "total_tolerance": "5"}}"#
        )
        .unwrap();

        let config = ConfigManager::load(Some(file.path())).unwrap();
        assert_eq!(config.locale, "en");
        assert_eq!(config.warehouse, "본사창고");
        assert_eq!(config.total_tolerance, Decimal::from(5));
        assert_eq!(config.box_marker, "BOX");
    }

    #[test]
    fn test_load_rejects_invalid_value() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"box_marker": "  "}}"#).unwrap();

        let result = ConfigManager::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = ConfigManager::load(Some(Path::new("/nonexistent/order-refine.json")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_load_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let result = ConfigManager::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }
}
