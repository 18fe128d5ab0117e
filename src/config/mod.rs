// ==========================================
// 주문 데이터 정제 - 配置层
// ==========================================
// 职责: 处理配置加载 + 只读参考数据缓存
// ==========================================

pub mod config_manager;
pub mod master_cache;

// 重导出核心配置
pub use config_manager::{config_keys, ConfigError, ConfigManager, RefineConfig};
