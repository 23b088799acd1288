//! 校验错误目录
//!
//! 企业级实现：错误/警告都是不可变的值，引擎永远返回状态而不是抛异常。
//! 两级严重度：error 阻断签名，warning 仅提示、永不阻断。

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Family, TransactionMode};
use crate::error_map::BroadcastCode;
use crate::utils::amount_math::{Amount, AmountError};

/// 校验错误（出现即禁止签名）
///
/// 按字段归属挂载到 `TransactionStatus::errors`，同一字段首个命中的错误生效。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
pub enum ValidationError {
    /// 地址格式非法（含"把账户地址当验证人地址用"的情况）
    #[error("invalid address: {address}")]
    InvalidAddress { address: String },

    /// 收款方等于付款方（转账的收款人，或重委托的目标验证人）
    #[error("destination address is also the source address")]
    InvalidAddressBecauseDestinationIsAlsoSource,

    /// 可花费余额不足
    #[error("not enough balance")]
    NotEnoughBalance,

    /// 已委托余额不足（解委托/重委托的上限）
    #[error("not enough delegation balance")]
    NotEnoughDelegationBalance,

    /// 金额缺失或为零
    #[error("amount required")]
    AmountRequired,

    /// 手续费低于最小中继费
    #[error("fee is lower than the minimum relay fee, minimum: {minimum}")]
    LowerThanMinimumRelayFee { minimum: Amount },

    /// 设备端拒绝了交易
    #[error("transaction refused on device")]
    TransactionRefusedOnDevice,

    /// 单笔委托的验证人目标过多
    #[error("too many delegation validators, max: {max}")]
    TooManyValidators { max: usize },

    /// 同一验证人上还有未完成的重委托
    #[error("a redelegation to this validator is still in progress")]
    RedelegationInProgress,

    /// 请求的资源没有冻结余额
    #[error("no frozen balance for resource: {resource}")]
    NoFrozenBalance { resource: String },

    /// 奖励尚不可领取
    #[error("reward is not yet available")]
    RewardNotAvailable,

    /// 广播层拒绝（数字错误码子目录，见 error_map）
    #[error("broadcast rejected: {0}")]
    Broadcast(BroadcastCode),

    /// 未收录的广播错误码（fail closed：未知码一律按错误处理）
    #[error("unknown broadcast error code: {code}")]
    UnknownBroadcastError { code: String },
}

impl ValidationError {
    /// 稳定错误代码（snake_case，供客户端/测试按类匹配）
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidAddress { .. } => "invalid_address",
            ValidationError::InvalidAddressBecauseDestinationIsAlsoSource => {
                "destination_is_source"
            }
            ValidationError::NotEnoughBalance => "not_enough_balance",
            ValidationError::NotEnoughDelegationBalance => "not_enough_delegation_balance",
            ValidationError::AmountRequired => "amount_required",
            ValidationError::LowerThanMinimumRelayFee { .. } => "lower_than_minimum_relay_fee",
            ValidationError::TransactionRefusedOnDevice => "transaction_refused_on_device",
            ValidationError::TooManyValidators { .. } => "too_many_validators",
            ValidationError::RedelegationInProgress => "redelegation_in_progress",
            ValidationError::NoFrozenBalance { .. } => "no_frozen_balance",
            ValidationError::RewardNotAvailable => "reward_not_available",
            ValidationError::Broadcast(_) => "broadcast_error",
            ValidationError::UnknownBroadcastError { .. } => "unknown_broadcast_error",
        }
    }
}

/// 校验警告（仅提示，永不阻断签名）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
pub enum ValidationWarning {
    /// 手续费超过可领取的奖励（UX 保护，非协议规则）
    #[error("claim fees are higher than the claimable reward")]
    ClaimRewardFeesTooHigh,

    /// 即将委托全部可用余额
    #[error("delegating all available funds")]
    DelegateAllFunds,
}

impl ValidationWarning {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationWarning::ClaimRewardFeesTooHigh => "claim_reward_fees_too_high",
            ValidationWarning::DelegateAllFunds => "delegate_all_funds",
        }
    }
}

/// 引擎调用错误（调用方编程错误，区别于校验目录）
///
/// 输入形状不对（链族不匹配、链族不支持该模式、缺少质押资源）属于
/// fail fast 的场景，不会折叠进 `TransactionStatus`。
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("network info does not match transaction family: expected {expected}, got {got}")]
    NetworkFamilyMismatch { expected: Family, got: Family },

    #[error("transaction mode {mode:?} is not supported by the {family} family")]
    UnsupportedMode {
        family: Family,
        mode: TransactionMode,
    },

    #[error("account snapshot is missing staking resources required by the {family} family")]
    MissingStakingResources { family: Family },

    #[error(transparent)]
    Arithmetic(#[from] AmountError),
}
