//! 网络参数领域模型
//!
//! 每次校验调用都由调用方提供最新参数，引擎内部不缓存。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::domain::Family;
use crate::utils::amount_math::Amount;

/// 按链族划分的实时网络参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "family")]
pub enum NetworkInfo {
    #[serde(rename = "cosmos")]
    Cosmos(CosmosNetworkInfo),
    #[serde(rename = "ripple")]
    Ripple(RippleNetworkInfo),
}

impl NetworkInfo {
    pub fn family(&self) -> Family {
        match self {
            NetworkInfo::Cosmos(_) => Family::Cosmos,
            NetworkInfo::Ripple(_) => Family::Ripple,
        }
    }
}

/// Cosmos 链的费用参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosmosNetworkInfo {
    /// gas 单价（最小单位/gas，允许小数，如 0.025）
    pub gas_price: Decimal,
}

impl Default for CosmosNetworkInfo {
    /// 取不到实时单价时的兜底：配置的 COSMOS_GAS_PRICE
    fn default() -> Self {
        Self {
            gas_price: EngineConfig::global().cosmos_gas_price,
        }
    }
}

/// Ripple 链的费用/保留金参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RippleNetworkInfo {
    /// 当前服务器费用，同时是最小中继费
    pub server_fee: Amount,
    /// 账户基础保留金（始终锁定，不可花费）
    pub base_reserve: Amount,
}
