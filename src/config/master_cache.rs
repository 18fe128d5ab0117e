// ==========================================
// 주문 데이터 정제 - 商品主数据缓存
// ==========================================
// 职责: 配置指定的主数据文件进程内只加载一次
// 红线: 缓存只读；各次处理之间不共享其他可变状态
// ==========================================

use crate::importer::{columns, FieldMapper, ImportResult, RawTable, UniversalFileParser};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{info, warn};

struct CachedMaster {
    source: PathBuf,
    table: RawTable,
}

static MASTER_CACHE: OnceLock<CachedMaster> = OnceLock::new();

/// 获取（必要时加载）进程级主数据表
///
/// 首次调用时解析文件；之后的调用直接返回缓存,
/// 传入不同路径时仍返回首次加载的主数据并记录告警。
/// 缓存的是已校验列的原始表,每次处理按本次的语言重新归一化,
/// 数值转换警告随处理结果一并返回
pub fn get_or_load(path: &Path) -> ImportResult<&'static RawTable> {
    if let Some(cached) = MASTER_CACHE.get() {
        if cached.source != path {
            warn!(
                cached = %cached.source.display(),
                requested = %path.display(),
                "主数据已缓存,忽略新的路径"
            );
        }
        return Ok(&cached.table);
    }

    let table = load(path)?;
    let cached = MASTER_CACHE.get_or_init(|| CachedMaster {
        source: path.to_path_buf(),
        table,
    });
    Ok(&cached.table)
}

/// 直接加载主数据文件（不经过缓存）
///
/// 缺少必填列时返回错误,错误的文件不会进入缓存
pub fn load(path: &Path) -> ImportResult<RawTable> {
    let table = UniversalFileParser.parse(path, "master")?;
    FieldMapper.resolve(&table, &columns::MASTER)?;

    info!(
        path = %path.display(),
        rows = table.len(),
        "商品主数据已加载"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::ImportError;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_load_master_csv() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "SKU코드,과세여부,입수량").unwrap();
        writeln!(file, "A001,과세,6").unwrap();
        writeln!(file, "B002,면세,").unwrap();

        let table = load(file.path()).unwrap();
        assert_eq!(table.name, "master");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_load_rejects_missing_column() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "SKU코드,입수량").unwrap();
        writeln!(file, "A001,6").unwrap();

        let result = load(file.path());
        assert!(matches!(result, Err(ImportError::MissingColumn { ref column, .. }) if column == "과세여부"));
    }

    #[test]
    fn test_cache_returns_same_instance() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "SKU코드,과세여부,입수량").unwrap();
        writeln!(file, "C003,과세,1").unwrap();

        let first = get_or_load(file.path()).unwrap();
        let second = get_or_load(file.path()).unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
