//! 账户快照领域模型
//!
//! 快照是上次同步时的只读状态，可能落后于链上；引擎整个调用期间不修改它，
//! 也不会在调用结束后保留引用。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::amount_math::{Amount, AmountError};

/// 账户余额快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub address: String,
    /// 总余额（含锁定部分）
    pub balance: Amount,
    /// 可花费余额（未被委托/解绑锁定的部分）
    pub spendable_balance: Amount,
    /// 委托链的质押子状态；支付链为 None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<StakingResources>,
}

impl AccountSnapshot {
    pub fn new(address: impl Into<String>, balance: Amount, spendable_balance: Amount) -> Self {
        Self {
            address: address.into(),
            balance,
            spendable_balance,
            resources: None,
        }
    }

    pub fn with_resources(mut self, resources: StakingResources) -> Self {
        self.resources = Some(resources);
        self
    }

    /// 全额转出时真正可排空的余额：总余额减去程序性锁定的资源
    /// （解绑中 + 已委托）。没有质押子状态时锁定为零。
    pub fn drainable_balance(&self) -> Result<Amount, AmountError> {
        let locked = match &self.resources {
            Some(resources) => resources.locked_balance()?,
            None => Amount::ZERO,
        };
        Ok(self.balance.checked_sub(locked)?.max_zero())
    }
}

/// 委托链的质押资源子状态
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingResources {
    /// 已委托总额
    pub delegated_balance: Amount,
    /// 解绑中的总额
    pub unbonding_balance: Amount,
    /// 待领取奖励总额
    pub pending_rewards_balance: Amount,
    /// 活跃委托明细
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub delegations: Vec<Delegation>,
    /// 进行中的重委托
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub redelegations: Vec<Redelegation>,
    /// 进行中的解绑
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unbondings: Vec<Unbonding>,
}

impl StakingResources {
    /// 程序性锁定的总额：解绑中 + 已委托
    pub fn locked_balance(&self) -> Result<Amount, AmountError> {
        self.unbonding_balance.checked_add(self.delegated_balance)
    }

    /// 指定验证人上的委托明细
    pub fn delegation_to(&self, validator_address: &str) -> Option<&Delegation> {
        self.delegations
            .iter()
            .find(|d| d.validator_address == validator_address)
    }

    /// 是否存在一笔以 `validator_address` 为目标、尚未完成的重委托
    pub fn has_inflight_redelegation_to(&self, validator_address: &str, now: DateTime<Utc>) -> bool {
        self.redelegations
            .iter()
            .any(|r| r.validator_dst_address == validator_address && r.completion_date > now)
    }
}

/// 单个验证人上的委托
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delegation {
    pub validator_address: String,
    pub amount: Amount,
    /// 该委托上累计的待领取奖励
    pub pending_rewards: Amount,
}

/// 进行中的重委托（完成前锁定 src→dst 通道）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redelegation {
    pub validator_src_address: String,
    pub validator_dst_address: String,
    pub amount: Amount,
    pub completion_date: DateTime<Utc>,
}

/// 进行中的解绑
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unbonding {
    pub validator_address: String,
    pub amount: Amount,
    pub completion_date: DateTime<Utc>,
}
