// ==========================================
// 주문 데이터 정제 - 领域类型定义
// ==========================================
// 职责: 销售渠道 / 课税区分 / 警告类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 销售渠道 (Channel)
// ==========================================
// 台账中的 쇼핑몰 列原样解析,未知渠道保留原始标签
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Smartstore, // 渠道 A: 스마트스토어
    Godomall,   // 渠道 B: 고도몰5
    Coupang,    // 쿠팡
    Other(String),
}

impl Channel {
    /// 从台账渠道标签解析（不会失败）
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "스마트스토어" => Channel::Smartstore,
            "고도몰5" => Channel::Godomall,
            "쿠팡" => Channel::Coupang,
            other => Channel::Other(other.to_string()),
        }
    }

    /// 台账中使用的渠道标签
    pub fn label(&self) -> &str {
        match self {
            Channel::Smartstore => "스마트스토어",
            Channel::Godomall => "고도몰5",
            Channel::Coupang => "쿠팡",
            Channel::Other(label) => label,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ==========================================
// 课税区分 (Tax Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxStatus {
    Taxed,  // 과세
    Exempt, // 면세
}

impl TaxStatus {
    /// 解析主数据中的 과세여부 字段
    ///
    /// 无法识别的值返回 None（由调用方套用默认值）
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "과세" | "taxed" | "taxable" => Some(TaxStatus::Taxed),
            "면세" | "exempt" | "tax_free" => Some(TaxStatus::Exempt),
            _ => None,
        }
    }

    /// 会计系统交易类型代码（면세 = 12, 其他 = 11）
    pub fn transaction_type(&self) -> u8 {
        match self {
            TaxStatus::Taxed => 11,
            TaxStatus::Exempt => 12,
        }
    }
}

impl fmt::Display for TaxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxStatus::Taxed => write!(f, "과세"),
            TaxStatus::Exempt => write!(f, "면세"),
        }
    }
}

// ==========================================
// 警告类型 (Warning Kind)
// ==========================================
// 所有警告均为软失败,不阻断处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    NumericCoerced,
    UnmatchedPrice,
    ChannelTotalMismatch,
    DuplicateNameSuspected,
    UnregisteredItem,
}

impl WarningKind {
    /// i18n 消息键
    pub fn message_key(&self) -> &'static str {
        match self {
            WarningKind::NumericCoerced => "warning.numeric_coerced",
            WarningKind::UnmatchedPrice => "warning.unmatched_price",
            WarningKind::ChannelTotalMismatch => "warning.channel_total_mismatch",
            WarningKind::DuplicateNameSuspected => "warning.duplicate_name_suspected",
            WarningKind::UnregisteredItem => "warning.unregistered_item",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::NumericCoerced => write!(f, "numeric_coerced"),
            WarningKind::UnmatchedPrice => write!(f, "unmatched_price"),
            WarningKind::ChannelTotalMismatch => write!(f, "channel_total_mismatch"),
            WarningKind::DuplicateNameSuspected => write!(f, "duplicate_name_suspected"),
            WarningKind::UnregisteredItem => write!(f, "unregistered_item"),
        }
    }
}
