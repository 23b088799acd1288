//! 交易草稿领域模型
//!
//! 草稿由调用方构造，传入引擎后不可变；引擎只读草稿并返回全新的状态。

use serde::{Deserialize, Serialize};

use crate::utils::amount_math::Amount;

/// 链族：一套独立的地址格式、费用模型和交易模式
///
/// 闭合枚举：新增链族 = 新增一个规则模块 + 一个 match 分支，编译期穷尽检查。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// 账户型委托链（质押、委托、领奖励）
    Cosmos,
    /// 简单支付链（仅转账，带保留金）
    Ripple,
}

impl Family {
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Cosmos => "cosmos",
            Family::Ripple => "ripple",
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 交易模式（各链族支持的子集不同，互斥）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionMode {
    /// 普通转账
    Send,
    /// 委托
    Delegate,
    /// 解除委托
    Undelegate,
    /// 重委托（换验证人）
    Redelegate,
    /// 领取质押奖励
    ClaimReward,
    /// 领取并复投奖励
    ClaimRewardCompound,
}

/// 委托目标：验证人地址 + 金额
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationTarget {
    pub validator_address: String,
    pub amount: Amount,
}

/// 待校验的交易草稿
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub family: Family,
    pub mode: TransactionMode,
    /// 收款地址（质押类模式下可为空）
    pub recipient: String,
    /// 转账金额（最小单位）
    pub amount: Amount,
    /// 全额转出：金额由引擎按可排空余额解析
    pub use_all_amount: bool,
    /// 显式手续费（提供即覆盖 gas 计算）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees: Option<Amount>,
    /// Gas 上限（与网络 gas 单价相乘得到费用估算）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// 委托/解委托/重委托/领奖励的验证人目标列表
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<DelegationTarget>,
    /// 重委托的来源验证人
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_validator: Option<String>,
    /// 支付链的目的标签（Ripple destination tag）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
}

impl TransactionDraft {
    /// 构造一笔普通转账草稿
    pub fn send(family: Family, recipient: impl Into<String>, amount: Amount) -> Self {
        Self {
            family,
            mode: TransactionMode::Send,
            recipient: recipient.into(),
            amount,
            use_all_amount: false,
            fees: None,
            gas_limit: None,
            memo: None,
            validators: Vec::new(),
            source_validator: None,
            destination_tag: None,
        }
    }

    /// 构造一笔质押类草稿（委托/解委托/领奖励等）
    pub fn staking(family: Family, mode: TransactionMode, validators: Vec<DelegationTarget>) -> Self {
        Self {
            family,
            mode,
            recipient: String::new(),
            amount: Amount::ZERO,
            use_all_amount: false,
            fees: None,
            gas_limit: None,
            memo: None,
            validators,
            source_validator: None,
            destination_tag: None,
        }
    }
}
