//! IronGate - 企业级多链交易预检引擎
//!
//! 签名前置校验：引擎零网络、零签名、零密钥。
//! 输入草稿 + 账户快照 + 网络参数，输出可序列化的交易状态。

pub mod config;
pub mod domain;
pub mod error;
pub mod error_map;
pub mod service;
pub mod utils;

pub use config::EngineConfig;
pub use domain::{
    AccountSnapshot, CosmosNetworkInfo, Delegation, DelegationTarget, Family, NetworkInfo,
    Redelegation, RippleNetworkInfo, StakingResources, StatusField, TransactionDraft,
    TransactionMode, TransactionStatus, Unbonding,
};
pub use error::{EngineError, ValidationError, ValidationWarning};
pub use error_map::{interpret_broadcast_code, interpret_broadcast_key, BroadcastCode};
pub use service::StatusEngine;
pub use utils::{AddressValidator, Amount, AmountError};

/// 常用类型一站式导入
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::domain::{
        AccountSnapshot, CosmosNetworkInfo, DelegationTarget, Family, NetworkInfo,
        RippleNetworkInfo, StakingResources, StatusField, TransactionDraft, TransactionMode,
        TransactionStatus,
    };
    pub use crate::error::{EngineError, ValidationError, ValidationWarning};
    pub use crate::service::StatusEngine;
    pub use crate::utils::Amount;
}
