// ==========================================
// 주문 데이터 정제 - API 层
// ==========================================
// 职责: 提供处理入口,供命令行与外部调用
// ==========================================

pub mod error;
pub mod refine_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use refine_api::{RefineApi, RefinePaths, RefineResponse};
