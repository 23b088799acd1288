//! 配置管理模块
//! 引擎可调参数，支持从环境变量加载

use anyhow::Result;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

static GLOBAL_CONFIG: Lazy<EngineConfig> = Lazy::new(EngineConfig::from_env);

/// 引擎配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 单笔委托允许的最大验证人目标数
    pub max_delegation_targets: usize,
    /// Cosmos gas 单价兜底值（网络未提供实时单价时使用）
    pub cosmos_gas_price: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_delegation_targets: 5,
            // 链上常见默认：0.025 最小单位/gas
            cosmos_gas_price: Decimal::new(25, 3),
        }
    }
}

impl EngineConfig {
    /// 从环境变量加载配置（缺省回落到默认值）
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_delegation_targets: std::env::var("MAX_DELEGATION_TARGETS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_delegation_targets),
            cosmos_gas_price: std::env::var("COSMOS_GAS_PRICE")
                .ok()
                .and_then(|s| Decimal::from_str_exact(&s).ok())
                .unwrap_or(defaults.cosmos_gas_price),
        }
    }

    /// 进程级共享配置（首次访问时从环境变量加载）
    pub fn global() -> &'static EngineConfig {
        &GLOBAL_CONFIG
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        if self.max_delegation_targets == 0 {
            anyhow::bail!("MAX_DELEGATION_TARGETS must be at least 1");
        }

        if self.cosmos_gas_price <= Decimal::ZERO {
            anyhow::bail!("COSMOS_GAS_PRICE must be positive");
        }

        Ok(())
    }
}
