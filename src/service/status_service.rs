//! 状态编排服务
//!
//! 引擎的唯一入口：按链族分发到对应规则模块，并套用跨族不变量。
//! 纯同步计算，相同输入必然产出相同状态。

use crate::config::EngineConfig;
use crate::domain::{
    AccountSnapshot, NetworkInfo, StatusField, TransactionDraft, TransactionStatus,
};
use crate::error::EngineError;
use crate::service::cosmos_validator::CosmosValidator;
use crate::service::ripple_validator::RippleValidator;

/// 交易状态引擎
pub struct StatusEngine {
    config: EngineConfig,
}

impl StatusEngine {
    /// 使用进程级共享配置构建引擎
    pub fn new() -> Self {
        Self {
            config: EngineConfig::global().clone(),
        }
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// 计算一笔草稿的签名前状态
    ///
    /// 用户可修复的问题进 status.errors/warnings；调用方编程错误
    /// （族不匹配、不支持的模式、缺质押子状态）直接 Err 快速失败。
    pub fn compute_status(
        &self,
        tx: &TransactionDraft,
        account: &AccountSnapshot,
        network: &NetworkInfo,
    ) -> Result<TransactionStatus, EngineError> {
        tracing::debug!(family = %tx.family, mode = ?tx.mode, "computing transaction status");

        let mut status = match (tx.family, network) {
            (crate::domain::Family::Cosmos, NetworkInfo::Cosmos(net)) => {
                CosmosValidator::validate(tx, account, net, &self.config)?
            }
            (crate::domain::Family::Ripple, NetworkInfo::Ripple(net)) => {
                RippleValidator::validate(tx, account, net)?
            }
            (expected, network) => {
                return Err(EngineError::NetworkFamilyMismatch {
                    expected,
                    got: network.family(),
                })
            }
        };

        // 跨族不变量：收款方或金额有错时 totalSpent 不可信，一律置空；
        // estimatedFees 保留供 UI 预览
        if status.error_on(StatusField::Recipient).is_some()
            || status.error_on(StatusField::Amount).is_some()
        {
            status.total_spent = None;
        }

        if status.has_errors() {
            tracing::debug!(errors = status.errors.len(), "transaction draft rejected");
        }

        Ok(status)
    }
}

impl Default for StatusEngine {
    fn default() -> Self {
        Self::new()
    }
}
