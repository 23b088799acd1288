//! Cosmos 链族规则模块
//!
//! 委托链的完整模式集：send / delegate / undelegate / redelegate /
//! claimReward / claimRewardCompound。每个模式有独立的资格和费用规则。
//!
//! 字段内检查顺序固定：地址格式 → 收付同源 → 金额资格 → 费用/总支出，
//! 同一字段首个命中的错误生效。

use chrono::Utc;

use crate::config::EngineConfig;
use crate::domain::{
    AccountSnapshot, CosmosNetworkInfo, Family, StakingResources, StatusField, TransactionDraft,
    TransactionMode, TransactionStatus,
};
use crate::error::{EngineError, ValidationError, ValidationWarning};
use crate::utils::{AddressValidator, Amount};

/// Cosmos 规则校验器（无状态）
pub struct CosmosValidator;

impl CosmosValidator {
    pub fn validate(
        tx: &TransactionDraft,
        account: &AccountSnapshot,
        network: &CosmosNetworkInfo,
        config: &EngineConfig,
    ) -> Result<TransactionStatus, EngineError> {
        let mut status = TransactionStatus::new();
        status.estimated_fees = Self::estimate_fees(tx, network)?;

        match tx.mode {
            TransactionMode::Send => Self::validate_send(tx, account, &mut status)?,
            TransactionMode::Delegate => Self::validate_delegate(tx, account, config, &mut status)?,
            TransactionMode::Undelegate => Self::validate_undelegate(tx, account, &mut status)?,
            TransactionMode::Redelegate => Self::validate_redelegate(tx, account, &mut status)?,
            TransactionMode::ClaimReward | TransactionMode::ClaimRewardCompound => {
                Self::validate_claim_reward(tx, account, &mut status)?
            }
        }

        Ok(status)
    }

    /// 费用估算：显式费用优先；否则 floor(gasLimit × gasPrice)。
    /// 两者都解析不出正整数时缺省（本身不是错误）。
    fn estimate_fees(
        tx: &TransactionDraft,
        network: &CosmosNetworkInfo,
    ) -> Result<Option<Amount>, EngineError> {
        if let Some(fees) = tx.fees {
            if fees.is_positive() {
                return Ok(Some(fees));
            }
        }

        match tx.gas_limit {
            Some(gas_limit) if gas_limit.is_positive() => {
                let fee = gas_limit.checked_mul_price(network.gas_price)?;
                Ok(fee.is_positive().then_some(fee))
            }
            _ => Ok(None),
        }
    }

    /// 质押类模式要求账户带质押子状态，缺失属于调用方编程错误
    fn staking_resources(account: &AccountSnapshot) -> Result<&StakingResources, EngineError> {
        account
            .resources
            .as_ref()
            .ok_or(EngineError::MissingStakingResources {
                family: Family::Cosmos,
            })
    }

    fn validate_send(
        tx: &TransactionDraft,
        account: &AccountSnapshot,
        status: &mut TransactionStatus,
    ) -> Result<(), EngineError> {
        // 转账收款方必须是账户地址空间；验证人地址一律视为非法
        if !AddressValidator::validate_cosmos_account(&tx.recipient) {
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

        if tx.use_all_amount {
            // 全额转出：可排空余额 = 总余额 − (解绑中 + 已委托)，
            // 程序性锁定的资金不参与排空
            let drainable = account.drainable_balance()?;
            if !drainable.is_positive() {
                // 解析出的金额必须为正，余额被锁光时等同于金额缺失
                status.push_error(StatusField::Amount, ValidationError::AmountRequired);
                return Ok(());
            }
            status.total_spent = Some(drainable);
            return Ok(());
        }

        if !tx.amount.is_positive() {
            status.push_error(StatusField::Amount, ValidationError::AmountRequired);
            return Ok(());
        }

        let fees = status.estimated_fees.unwrap_or(Amount::ZERO);
        let total = tx.amount.checked_add(fees)?;
        if total > account.spendable_balance {
            status.push_error(StatusField::Amount, ValidationError::NotEnoughBalance);
            return Ok(());
        }

        if status.estimated_fees.is_some() {
            status.total_spent = Some(total);
        }
        Ok(())
    }

    fn validate_delegate(
        tx: &TransactionDraft,
        account: &AccountSnapshot,
        config: &EngineConfig,
        status: &mut TransactionStatus,
    ) -> Result<(), EngineError> {
        if tx.validators.is_empty() {
            status.push_error(StatusField::Amount, ValidationError::AmountRequired);
            return Ok(());
        }

        if tx.validators.len() > config.max_delegation_targets {
            status.push_error(
                StatusField::Validators,
                ValidationError::TooManyValidators {
                    max: config.max_delegation_targets,
                },
            );
        }

        for target in &tx.validators {
            if !AddressValidator::validate_cosmos_validator(&target.validator_address) {
                status.push_error(
                    StatusField::Recipient,
                    ValidationError::InvalidAddress {
                        address: target.validator_address.clone(),
                    },
                );
            }
            if !target.amount.is_positive() {
                status.push_error(StatusField::Amount, ValidationError::AmountRequired);
            }
        }

        if status.error_on(StatusField::Amount).is_some() {
            return Ok(());
        }

        let total = Amount::checked_sum(tx.validators.iter().map(|t| &t.amount))?;
        let fees = status.estimated_fees.unwrap_or(Amount::ZERO);
        let spent = total.checked_add(fees)?;

        if spent > account.spendable_balance {
            status.push_error(StatusField::Amount, ValidationError::NotEnoughBalance);
            return Ok(());
        }
        if spent == account.spendable_balance {
            // 委托光全部可用余额不违规，但值得提醒
            status.push_warning(StatusField::Amount, ValidationWarning::DelegateAllFunds);
        }

        if status.estimated_fees.is_some() {
            status.total_spent = Some(spent);
        }
        Ok(())
    }

    fn validate_undelegate(
        tx: &TransactionDraft,
        account: &AccountSnapshot,
        status: &mut TransactionStatus,
    ) -> Result<(), EngineError> {
        let resources = Self::staking_resources(account)?;

        // 解委托的错误挂载在 unbonding 字段（与 redelegation 字段对称）
        let Some(target) = tx.validators.first() else {
            status.push_error(StatusField::Unbonding, ValidationError::AmountRequired);
            return Ok(());
        };

        if !AddressValidator::validate_cosmos_validator(&target.validator_address) {
            status.push_error(
                StatusField::Recipient,
                ValidationError::InvalidAddress {
                    address: target.validator_address.clone(),
                },
            );
        }

        if !target.amount.is_positive() {
            status.push_error(StatusField::Unbonding, ValidationError::AmountRequired);
            return Ok(());
        }

        // 解委托上限：该验证人上的已委托金额
        let delegated = resources
            .delegation_to(&target.validator_address)
            .map(|d| d.amount)
            .unwrap_or(Amount::ZERO);
        if target.amount > delegated {
            status.push_error(
                StatusField::Unbonding,
                ValidationError::NotEnoughDelegationBalance,
            );
            return Ok(());
        }

        // 质押操作只花手续费
        status.total_spent = status.estimated_fees;
        Ok(())
    }

    fn validate_redelegate(
        tx: &TransactionDraft,
        account: &AccountSnapshot,
        status: &mut TransactionStatus,
    ) -> Result<(), EngineError> {
        let resources = Self::staking_resources(account)?;

        let source = tx.source_validator.as_deref().unwrap_or("");
        if !AddressValidator::validate_cosmos_validator(source) {
            status.push_error(
                StatusField::Redelegation,
                ValidationError::InvalidAddress {
                    address: source.to_string(),
                },
            );
        }

        let Some(target) = tx.validators.first() else {
            status.push_error(StatusField::Amount, ValidationError::AmountRequired);
            return Ok(());
        };

        if !AddressValidator::validate_cosmos_validator(&target.validator_address) {
            status.push_error(
                StatusField::Recipient,
                ValidationError::InvalidAddress {
                    address: target.validator_address.clone(),
                },
            );
        } else if target.validator_address == source {
            // 重委托的"收款方"是目标验证人，与来源相同视为收付同源
            status.push_error(
                StatusField::Redelegation,
                ValidationError::InvalidAddressBecauseDestinationIsAlsoSource,
            );
        }

        // 链上规则：以来源验证人为目标、尚未完成的重委托会锁住通道
        if resources.has_inflight_redelegation_to(source, Utc::now()) {
            status.push_error(
                StatusField::Redelegation,
                ValidationError::RedelegationInProgress,
            );
        }

        if !target.amount.is_positive() {
            status.push_error(StatusField::Amount, ValidationError::AmountRequired);
            return Ok(());
        }

        // 重委托上限：来源验证人上的已委托金额
        let delegated = resources
            .delegation_to(source)
            .map(|d| d.amount)
            .unwrap_or(Amount::ZERO);
        if target.amount > delegated {
            status.push_error(
                StatusField::Amount,
                ValidationError::NotEnoughDelegationBalance,
            );
            return Ok(());
        }

        status.total_spent = status.estimated_fees;
        Ok(())
    }

    fn validate_claim_reward(
        tx: &TransactionDraft,
        account: &AccountSnapshot,
        status: &mut TransactionStatus,
    ) -> Result<(), EngineError> {
        let resources = Self::staking_resources(account)?;

        let Some(target) = tx.validators.first() else {
            // 没有目标验证人就没有可领的奖励
            status.push_error(StatusField::ClaimReward, ValidationError::RewardNotAvailable);
            return Ok(());
        };

        if !AddressValidator::validate_cosmos_validator(&target.validator_address) {
            status.push_error(
                StatusField::Recipient,
                ValidationError::InvalidAddress {
                    address: target.validator_address.clone(),
                },
            );
            return Ok(());
        }

        // 可领额：优先取该验证人委托上的奖励，退回账户级待领总额
        let claimable = resources
            .delegation_to(&target.validator_address)
            .map(|d| d.pending_rewards)
            .filter(|r| r.is_positive())
            .unwrap_or(resources.pending_rewards_balance);

        if !claimable.is_positive() {
            status.push_error(StatusField::ClaimReward, ValidationError::RewardNotAvailable);
            return Ok(());
        }

        // UX 保护：费用超过可领奖励只警告，永不阻断
        if let Some(fees) = status.estimated_fees {
            if fees > claimable {
                status.push_warning(
                    StatusField::ClaimReward,
                    ValidationWarning::ClaimRewardFeesTooHigh,
                );
            }
        }

        status.total_spent = status.estimated_fees;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::{DelegationTarget, StakingResources};

    const SELF_ADDR: &str = "cosmos1g84934jpu3v5de5yqukkkhxmcvsw3u2ajxvpdl";
    const PEER_ADDR: &str = "cosmos108uy5q9jt59gwugq5yrdhkzcd9jryslmpcstk5";
    const VALIDATOR_A: &str = "cosmosvaloper1grgelyng2v6v3t8z87wu3sxgt9m5s03xfytvz7";
    const VALIDATOR_B: &str = "cosmosvaloper1sd4tl9aljmmezzudugs7zlaya7pg2895ws8tfs";

    fn network() -> CosmosNetworkInfo {
        CosmosNetworkInfo {
            gas_price: Decimal::new(25, 3),
        }
    }

    fn account() -> AccountSnapshot {
        AccountSnapshot::new(
            SELF_ADDR,
            Amount::from_base_units(2_180_673),
            Amount::from_base_units(2_180_673),
        )
        .with_resources(StakingResources {
            delegated_balance: Amount::from_base_units(1_000_000),
            unbonding_balance: Amount::from_base_units(80_673),
            pending_rewards_balance: Amount::from_base_units(4_200),
            delegations: vec![crate::domain::Delegation {
                validator_address: VALIDATOR_A.into(),
                amount: Amount::from_base_units(1_000_000),
                pending_rewards: Amount::from_base_units(4_200),
            }],
            redelegations: vec![],
            unbondings: vec![],
        })
    }

    fn validate(tx: &TransactionDraft) -> TransactionStatus {
        CosmosValidator::validate(tx, &account(), &network(), &EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_send_to_self_is_rejected() {
        let tx = TransactionDraft::send(
            Family::Cosmos,
            SELF_ADDR,
            Amount::from_base_units(100),
        );
        let status = validate(&tx);
        assert_eq!(
            status.error_on(StatusField::Recipient),
            Some(&ValidationError::InvalidAddressBecauseDestinationIsAlsoSource)
        );
    }

    #[test]
    fn test_send_to_validator_address_is_invalid() {
        let tx = TransactionDraft::send(
            Family::Cosmos,
            VALIDATOR_A,
            Amount::from_base_units(100),
        );
        let status = validate(&tx);
        assert_eq!(
            status.error_on(StatusField::Recipient).unwrap().code(),
            "invalid_address"
        );
    }

    #[test]
    fn test_invalid_recipient_beats_amount_checks() {
        // 地址格式错误优先于金额检查，即便金额也有问题
        let tx = TransactionDraft::send(Family::Cosmos, "dsadasdasdasdas", Amount::ZERO);
        let status = validate(&tx);
        assert_eq!(
            status.error_on(StatusField::Recipient).unwrap().code(),
            "invalid_address"
        );
    }

    #[test]
    fn test_gas_limit_fee_computation() {
        let mut tx = TransactionDraft::send(Family::Cosmos, PEER_ADDR, Amount::from_base_units(100));
        tx.gas_limit = Some(Amount::from_base_units(10_000));
        let status = validate(&tx);
        assert!(status.can_sign());
        // 10000 × 0.025 = 250，精确无漂移
        assert_eq!(status.estimated_fees, Some(Amount::from_base_units(250)));
        assert_eq!(status.total_spent, Some(Amount::from_base_units(350)));
    }

    #[test]
    fn test_explicit_fee_overrides_gas() {
        let mut tx = TransactionDraft::send(Family::Cosmos, PEER_ADDR, Amount::from_base_units(100));
        tx.fees = Some(Amount::from_base_units(10_000));
        tx.gas_limit = Some(Amount::from_base_units(10_000));
        let status = validate(&tx);
        assert_eq!(status.estimated_fees, Some(Amount::from_base_units(10_000)));
    }

    #[test]
    fn test_no_fee_inputs_leaves_fees_absent() {
        let tx = TransactionDraft::send(Family::Cosmos, PEER_ADDR, Amount::from_base_units(100));
        let status = validate(&tx);
        // 费用缺省不是错误，但 totalSpent 随之缺省
        assert!(status.can_sign());
        assert_eq!(status.estimated_fees, None);
        assert_eq!(status.total_spent, None);
    }

    #[test]
    fn test_send_over_spendable_balance() {
        let tx = TransactionDraft::send(
            Family::Cosmos,
            PEER_ADDR,
            Amount::parse("99999999999999999").unwrap(),
        );
        let status = validate(&tx);
        assert_eq!(
            status.error_on(StatusField::Amount),
            Some(&ValidationError::NotEnoughBalance)
        );
    }

    #[test]
    fn test_send_max_respects_locked_resources() {
        let mut tx = TransactionDraft::send(Family::Cosmos, PEER_ADDR, Amount::ZERO);
        tx.use_all_amount = true;
        let status = validate(&tx);
        assert!(status.can_sign());
        // 2180673 − (1000000 + 80673) = 1100000
        assert_eq!(status.total_spent, Some(Amount::from_base_units(1_100_000)));
    }

    #[test]
    fn test_send_max_with_nothing_drainable() {
        // 余额整个被委托锁定，全额转出解析不出正金额
        let account = AccountSnapshot::new(SELF_ADDR, Amount::from_base_units(1_000), Amount::ZERO)
            .with_resources(StakingResources {
                delegated_balance: Amount::from_base_units(1_000),
                ..Default::default()
            });
        let mut tx = TransactionDraft::send(Family::Cosmos, PEER_ADDR, Amount::ZERO);
        tx.use_all_amount = true;

        let status =
            CosmosValidator::validate(&tx, &account, &network(), &EngineConfig::default()).unwrap();
        assert_eq!(
            status.error_on(StatusField::Amount),
            Some(&ValidationError::AmountRequired)
        );
        assert!(!status.can_sign());
        assert_eq!(status.total_spent, None);
    }

    #[test]
    fn test_delegate_zero_amount_target() {
        let tx = TransactionDraft::staking(
            Family::Cosmos,
            TransactionMode::Delegate,
            vec![DelegationTarget {
                validator_address: VALIDATOR_A.into(),
                amount: Amount::ZERO,
            }],
        );
        let status = validate(&tx);
        assert_eq!(
            status.error_on(StatusField::Amount),
            Some(&ValidationError::AmountRequired)
        );
    }

    #[test]
    fn test_delegate_to_account_address_is_invalid() {
        let tx = TransactionDraft::staking(
            Family::Cosmos,
            TransactionMode::Delegate,
            vec![DelegationTarget {
                validator_address: PEER_ADDR.into(),
                amount: Amount::from_base_units(100),
            }],
        );
        let status = validate(&tx);
        assert_eq!(
            status.error_on(StatusField::Recipient).unwrap().code(),
            "invalid_address"
        );
    }

    #[test]
    fn test_delegate_too_many_targets() {
        let targets = (0..6)
            .map(|_| DelegationTarget {
                validator_address: VALIDATOR_A.into(),
                amount: Amount::from_base_units(10),
            })
            .collect();
        let tx = TransactionDraft::staking(Family::Cosmos, TransactionMode::Delegate, targets);
        let status = validate(&tx);
        assert_eq!(
            status.error_on(StatusField::Validators),
            Some(&ValidationError::TooManyValidators { max: 5 })
        );
    }

    #[test]
    fn test_delegate_all_funds_warns() {
        let tx = TransactionDraft::staking(
            Family::Cosmos,
            TransactionMode::Delegate,
            vec![DelegationTarget {
                validator_address: VALIDATOR_A.into(),
                amount: Amount::from_base_units(2_180_673),
            }],
        );
        let status = validate(&tx);
        assert!(status.can_sign());
        assert_eq!(
            status.warning_on(StatusField::Amount),
            Some(&ValidationWarning::DelegateAllFunds)
        );
    }

    #[test]
    fn test_undelegate_over_delegated_amount() {
        let tx = TransactionDraft::staking(
            Family::Cosmos,
            TransactionMode::Undelegate,
            vec![DelegationTarget {
                validator_address: VALIDATOR_A.into(),
                amount: Amount::from_base_units(2_000_000),
            }],
        );
        let status = validate(&tx);
        assert_eq!(
            status.error_on(StatusField::Unbonding),
            Some(&ValidationError::NotEnoughDelegationBalance)
        );
    }

    #[test]
    fn test_undelegate_requires_amount() {
        let tx = TransactionDraft::staking(
            Family::Cosmos,
            TransactionMode::Undelegate,
            vec![DelegationTarget {
                validator_address: VALIDATOR_A.into(),
                amount: Amount::ZERO,
            }],
        );
        let status = validate(&tx);
        assert_eq!(
            status.error_on(StatusField::Unbonding),
            Some(&ValidationError::AmountRequired)
        );
        assert!(!status.can_sign());
    }

    #[test]
    fn test_redelegate_source_equals_destination() {
        let mut tx = TransactionDraft::staking(
            Family::Cosmos,
            TransactionMode::Redelegate,
            vec![DelegationTarget {
                validator_address: VALIDATOR_B.into(),
                amount: Amount::from_base_units(100),
            }],
        );
        tx.source_validator = Some(VALIDATOR_B.into());
        let status = validate(&tx);
        assert_eq!(
            status.error_on(StatusField::Redelegation),
            Some(&ValidationError::InvalidAddressBecauseDestinationIsAlsoSource)
        );
    }

    #[test]
    fn test_redelegate_in_progress_blocks() {
        let mut account = account();
        let resources = account.resources.as_mut().unwrap();
        resources.redelegations.push(crate::domain::Redelegation {
            validator_src_address: VALIDATOR_B.into(),
            validator_dst_address: VALIDATOR_A.into(),
            amount: Amount::from_base_units(100),
            completion_date: Utc::now() + chrono::Duration::days(14),
        });
        resources.delegations.push(crate::domain::Delegation {
            validator_address: VALIDATOR_A.into(),
            amount: Amount::from_base_units(500),
            pending_rewards: Amount::ZERO,
        });

        // 以 A 为来源重委托，但 A 上还有未完成的重委托
        let mut tx = TransactionDraft::staking(
            Family::Cosmos,
            TransactionMode::Redelegate,
            vec![DelegationTarget {
                validator_address: VALIDATOR_B.into(),
                amount: Amount::from_base_units(100),
            }],
        );
        tx.source_validator = Some(VALIDATOR_A.into());

        let status =
            CosmosValidator::validate(&tx, &account, &network(), &EngineConfig::default()).unwrap();
        assert_eq!(
            status.error_on(StatusField::Redelegation),
            Some(&ValidationError::RedelegationInProgress)
        );
    }

    #[test]
    fn test_claim_reward_without_reward() {
        let mut account = account();
        let resources = account.resources.as_mut().unwrap();
        resources.pending_rewards_balance = Amount::ZERO;
        resources.delegations[0].pending_rewards = Amount::ZERO;

        let tx = TransactionDraft::staking(
            Family::Cosmos,
            TransactionMode::ClaimReward,
            vec![DelegationTarget {
                validator_address: VALIDATOR_A.into(),
                amount: Amount::ZERO,
            }],
        );
        let status =
            CosmosValidator::validate(&tx, &account, &network(), &EngineConfig::default()).unwrap();
        assert_eq!(
            status.error_on(StatusField::ClaimReward),
            Some(&ValidationError::RewardNotAvailable)
        );
    }

    #[test]
    fn test_claim_reward_fee_warning_never_blocks() {
        let mut tx = TransactionDraft::staking(
            Family::Cosmos,
            TransactionMode::ClaimReward,
            vec![DelegationTarget {
                validator_address: VALIDATOR_A.into(),
                amount: Amount::ZERO,
            }],
        );
        tx.fees = Some(Amount::parse("9999999999999999").unwrap());
        let status = validate(&tx);
        assert!(status.can_sign());
        assert_eq!(
            status.warning_on(StatusField::ClaimReward),
            Some(&ValidationWarning::ClaimRewardFeesTooHigh)
        );
    }

    #[test]
    fn test_claim_reward_from_account_address_is_invalid() {
        let tx = TransactionDraft::staking(
            Family::Cosmos,
            TransactionMode::ClaimReward,
            vec![DelegationTarget {
                validator_address: PEER_ADDR.into(),
                amount: Amount::ZERO,
            }],
        );
        let status = validate(&tx);
        assert_eq!(
            status.error_on(StatusField::Recipient).unwrap().code(),
            "invalid_address"
        );
        assert!(status.error_on(StatusField::ClaimReward).is_none());
    }

    #[test]
    fn test_staking_without_resources_fails_fast() {
        let account = AccountSnapshot::new(
            SELF_ADDR,
            Amount::from_base_units(1_000),
            Amount::from_base_units(1_000),
        );
        let tx = TransactionDraft::staking(
            Family::Cosmos,
            TransactionMode::Undelegate,
            vec![DelegationTarget {
                validator_address: VALIDATOR_A.into(),
                amount: Amount::from_base_units(10),
            }],
        );
        let result = CosmosValidator::validate(&tx, &account, &network(), &EngineConfig::default());
        assert!(matches!(
            result,
            Err(EngineError::MissingStakingResources { .. })
        ));
    }
}
