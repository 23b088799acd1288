//! 交易状态：引擎的唯一输出
//!
//! 不变量：errors 非空则交易绝不允许签名；warnings 永不阻断。
//! estimatedFees / totalSpent 在可计算时仍会给出供 UI 预览，
//! 但 errors 非空时调用方只能当作参考信息。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationWarning};
use crate::utils::amount_math::Amount;

/// 状态字段：错误/警告挂载的位置
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum StatusField {
    Recipient,
    Amount,
    Fees,
    Validators,
    Redelegation,
    Unbonding,
    ClaimReward,
}

/// 引擎对一笔草稿的完整判定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatus {
    /// 阻断性错误（每个字段最多一个，先检出者生效）
    pub errors: BTreeMap<StatusField, ValidationError>,
    /// 提示性警告
    pub warnings: BTreeMap<StatusField, ValidationWarning>,
    /// 费用估算（最小单位；无法估算时缺省）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_fees: Option<Amount>,
    /// 总支出（金额 + 费用；无法计算时缺省）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_spent: Option<Amount>,
}

impl TransactionStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 挂载错误；同一字段已有错误时保持首个（first-detected-wins）
    pub fn push_error(&mut self, field: StatusField, error: ValidationError) {
        self.errors.entry(field).or_insert(error);
    }

    /// 挂载警告；同一字段只保留首个
    pub fn push_warning(&mut self, field: StatusField, warning: ValidationWarning) {
        self.warnings.entry(field).or_insert(warning);
    }

    pub fn error_on(&self, field: StatusField) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    pub fn warning_on(&self, field: StatusField) -> Option<&ValidationWarning> {
        self.warnings.get(&field)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 签名闸门：没有任何错误才允许签名
    pub fn can_sign(&self) -> bool {
        self.errors.is_empty()
    }
}
