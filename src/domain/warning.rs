// ==========================================
// 주문 데이터 정제 - 处理警告
// ==========================================
// 职责: 软失败报告（只累积,不阻断）
// ==========================================

use crate::domain::types::WarningKind;
use crate::i18n;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 处理警告
///
/// - kind: 警告类型
/// - subject: 警告对象（收件人 / 商品编码 / 列名等）
/// - message: 已本地化的可读消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub subject: String,
    pub message: String,
}

impl Warning {
    /// 按 locale 渲染消息并创建警告
    ///
    /// args 中的 `%{name}` 占位符会被替换
    pub fn localized(
        kind: WarningKind,
        subject: impl Into<String>,
        locale: &str,
        args: &[(&str, &str)],
    ) -> Self {
        Self {
            kind,
            subject: subject.into(),
            message: i18n::t_in(locale, kind.message_key(), args),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {}", self.message)
    }
}

/// 按类型统计警告数量
pub fn count_of(warnings: &[Warning], kind: WarningKind) -> usize {
    warnings.iter().filter(|w| w.kind == kind).count()
}
