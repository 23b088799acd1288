//! Ripple 链族规则模块
//!
//! 支付链只支持 send 模式。特有规则：账户基础保留金永不可花费，
//! 显式费用低于服务器当前费率的草稿会被网络拒绝中继。

use crate::domain::{
    AccountSnapshot, Family, RippleNetworkInfo, StatusField, TransactionDraft, TransactionMode,
    TransactionStatus,
};
use crate::error::{EngineError, ValidationError};
use crate::utils::{AddressValidator, Amount};

/// Ripple 规则校验器（无状态）
pub struct RippleValidator;

impl RippleValidator {
    pub fn validate(
        tx: &TransactionDraft,
        account: &AccountSnapshot,
        network: &RippleNetworkInfo,
    ) -> Result<TransactionStatus, EngineError> {
        // 质押模式在支付链上属于调用方编程错误，立即失败
        if tx.mode != TransactionMode::Send {
            return Err(EngineError::UnsupportedMode {
                family: Family::Ripple,
                mode: tx.mode,
            });
        }

        let mut status = TransactionStatus::new();

        // 费用：显式正费用优先；低于最小中继费会被网络拒绝
        status.estimated_fees = match tx.fees {
            Some(fees) if fees.is_positive() => {
                if fees < network.server_fee {
                    status.push_error(
                        StatusField::Fees,
                        ValidationError::LowerThanMinimumRelayFee {
                            minimum: network.server_fee,
                        },
                    );
                }
                Some(fees)
            }
            _ => network.server_fee.is_positive().then_some(network.server_fee),
        };

        if !AddressValidator::validate_ripple_address(&tx.recipient) {
            status.push_error(
                StatusField::Recipient,
                ValidationError::InvalidAddress {
                    address: tx.recipient.clone(),
                },
            );
        } else if tx.recipient == account.address {
            status.push_error(
                StatusField::Recipient,
                ValidationError::InvalidAddressBecauseDestinationIsAlsoSource,
            );
        }

        // 保留金之外才可花费
        let spendable = account.balance.checked_sub(network.base_reserve)?.max_zero();

        if tx.use_all_amount {
            // 余额不超过保留金时没有可转出的金额
            if !spendable.is_positive() {
                status.push_error(StatusField::Amount, ValidationError::AmountRequired);
                return Ok(status);
            }
            status.total_spent = Some(spendable);
            return Ok(status);
        }

        if !tx.amount.is_positive() {
            status.push_error(StatusField::Amount, ValidationError::AmountRequired);
            return Ok(status);
        }

        let fees = status.estimated_fees.unwrap_or(Amount::ZERO);
        let total = tx.amount.checked_add(fees)?;
        if total > spendable {
            status.push_error(StatusField::Amount, ValidationError::NotEnoughBalance);
            return Ok(status);
        }

        if status.estimated_fees.is_some() {
            status.total_spent = Some(total);
        }
        Ok(status)
    }
}
