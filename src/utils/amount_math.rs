//! 金额精确运算模块
//!
//! 企业级实现：所有余额/手续费运算使用精确定点数，禁止浮点
//! 不变量：`Amount` 永远是整数个最小单位（base unit），小数位恒为 0

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 金额运算错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// 运算溢出（checked_* 返回 None）
    #[error("amount arithmetic overflowed")]
    Overflow,
    /// 结果不是整数个最小单位
    #[error("amount must be an integer number of base units: {value}")]
    NotAnInteger { value: Decimal },
    /// 字面量无法解析
    #[error("invalid amount literal: {literal}")]
    InvalidLiteral { literal: String },
}

/// 链上金额（最小单位计）
///
/// 底层为 `rust_decimal::Decimal`，但构造时强制小数位为 0。
/// 减法允许产生负值，调用方必须在当作可花费余额前检查符号。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// 从最小单位整数构造
    pub fn from_base_units<T: Into<i64>>(units: T) -> Self {
        Amount(Decimal::from(units.into()))
    }

    /// 解析十进制字面量（必须是整数，例如 "2180673"）
    pub fn parse(literal: &str) -> Result<Self, AmountError> {
        let value = Decimal::from_str_exact(literal).map_err(|_| AmountError::InvalidLiteral {
            literal: literal.to_string(),
        })?;
        Self::try_from_decimal(value)
    }

    /// 从 Decimal 构造，拒绝带小数部分的值
    pub fn try_from_decimal(value: Decimal) -> Result<Self, AmountError> {
        if value.fract() != Decimal::ZERO {
            return Err(AmountError::NotAnInteger { value });
        }
        Ok(Amount(value.normalize()))
    }

    pub fn to_decimal(self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        !self.0.is_zero() && self.0.is_sign_positive()
    }

    pub fn is_negative(&self) -> bool {
        !self.0.is_zero() && self.0.is_sign_negative()
    }

    /// 精确加法
    pub fn checked_add(self, other: Amount) -> Result<Amount, AmountError> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or(AmountError::Overflow)
    }

    /// 精确减法（结果可以为负）
    pub fn checked_sub(self, other: Amount) -> Result<Amount, AmountError> {
        self.0
            .checked_sub(other.0)
            .map(Amount)
            .ok_or(AmountError::Overflow)
    }

    /// 乘以单价（例如 gasLimit × gasPrice）
    ///
    /// 单价允许带小数（如 0.025），乘积向下取整到最小单位。
    /// 舍入策略：round down，与链上手续费计算保持一致。
    pub fn checked_mul_price(self, price: Decimal) -> Result<Amount, AmountError> {
        let product = self.0.checked_mul(price).ok_or(AmountError::Overflow)?;
        Ok(Amount(product.floor().normalize()))
    }

    /// 负值归零（用于"可排空余额"的下界保护）
    pub fn max_zero(self) -> Amount {
        if self.is_negative() {
            Amount::ZERO
        } else {
            self
        }
    }

    /// 对一组金额求和
    pub fn checked_sum<'a, I>(amounts: I) -> Result<Amount, AmountError>
    where
        I: IntoIterator<Item = &'a Amount>,
    {
        let mut total = Amount::ZERO;
        for amount in amounts {
            total = total.checked_add(*amount)?;
        }
        Ok(total)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
