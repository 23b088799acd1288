//! Domain 模块
//!
//! 引擎的领域模型：草稿、账户快照、网络参数、输出状态

pub mod account;
pub mod network;
pub mod status;
pub mod transaction;

// Re-exports
// 重新导出常用类型
pub use account::{AccountSnapshot, Delegation, Redelegation, StakingResources, Unbonding};
pub use network::{CosmosNetworkInfo, NetworkInfo, RippleNetworkInfo};
pub use status::{StatusField, TransactionStatus};
pub use transaction::{DelegationTarget, Family, TransactionDraft, TransactionMode};
