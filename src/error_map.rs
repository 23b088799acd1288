//! 广播错误码映射
//!
//! Cosmos 广播层用数字错误码报告拒绝原因（cosmos-sdk v0.37 目录，
//! 本引擎固定收录 0–16）。码 0 表示成功，永远不作为错误返回；
//! 未收录的码一律 fail closed，映射为未知广播错误，绝不静默成功。

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// 广播层拒绝码（0–16，与外部响应逐位对齐）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum BroadcastCode {
    /// 成功（不是错误）
    Ok = 0,
    /// 节点内部错误
    Internal = 1,
    /// 交易解码失败
    TxDecode = 2,
    /// 序列号非法
    InvalidSequence = 3,
    /// 未授权
    Unauthorized = 4,
    /// 资金不足
    InsufficientFunds = 5,
    /// 未知请求
    UnknownRequest = 6,
    /// 地址非法
    InvalidAddress = 7,
    /// 公钥非法
    InvalidPubKey = 8,
    /// 地址未知
    UnknownAddress = 9,
    /// 代币不足
    InsufficientCoins = 10,
    /// 代币非法
    InvalidCoins = 11,
    /// Gas 耗尽
    OutOfGas = 12,
    /// Memo 过大
    MemoTooLarge = 13,
    /// 手续费不足
    InsufficientFee = 14,
    /// 签名过多
    TooManySignatures = 15,
    /// Gas 溢出
    GasOverflow = 16,
}

/// 完整目录（构造期对 0–16 范围做穷尽校验的依据）
pub const BROADCAST_CATALOG: [BroadcastCode; 17] = [
    BroadcastCode::Ok,
    BroadcastCode::Internal,
    BroadcastCode::TxDecode,
    BroadcastCode::InvalidSequence,
    BroadcastCode::Unauthorized,
    BroadcastCode::InsufficientFunds,
    BroadcastCode::UnknownRequest,
    BroadcastCode::InvalidAddress,
    BroadcastCode::InvalidPubKey,
    BroadcastCode::UnknownAddress,
    BroadcastCode::InsufficientCoins,
    BroadcastCode::InvalidCoins,
    BroadcastCode::OutOfGas,
    BroadcastCode::MemoTooLarge,
    BroadcastCode::InsufficientFee,
    BroadcastCode::TooManySignatures,
    BroadcastCode::GasOverflow,
];

impl BroadcastCode {
    /// 从数字码解析（超出 0–16 返回 None）
    pub fn from_code(code: u32) -> Option<BroadcastCode> {
        BROADCAST_CATALOG.get(code as usize).copied()
    }

    /// 从字面量键解析（外部响应使用字符串 "0"–"16"）
    pub fn from_key(key: &str) -> Option<BroadcastCode> {
        key.parse::<u32>().ok().and_then(Self::from_code)
    }

    pub fn code(&self) -> u32 {
        *self as u32
    }

    pub fn message(&self) -> &'static str {
        match self {
            BroadcastCode::Ok => "ok",
            BroadcastCode::Internal => "internal error",
            BroadcastCode::TxDecode => "failed to decode transaction",
            BroadcastCode::InvalidSequence => "invalid sequence",
            BroadcastCode::Unauthorized => "unauthorized",
            BroadcastCode::InsufficientFunds => "insufficient funds",
            BroadcastCode::UnknownRequest => "unknown request",
            BroadcastCode::InvalidAddress => "invalid address",
            BroadcastCode::InvalidPubKey => "invalid pubkey",
            BroadcastCode::UnknownAddress => "unknown address",
            BroadcastCode::InsufficientCoins => "insufficient coins",
            BroadcastCode::InvalidCoins => "invalid coins",
            BroadcastCode::OutOfGas => "out of gas",
            BroadcastCode::MemoTooLarge => "memo too large",
            BroadcastCode::InsufficientFee => "insufficient fee",
            BroadcastCode::TooManySignatures => "too many signatures",
            BroadcastCode::GasOverflow => "gas overflow",
        }
    }
}

impl std::fmt::Display for BroadcastCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "code {} ({})", self.code(), self.message())
    }
}

/// 把广播响应里的数字码翻译为类型化错误
///
/// - `"0"` → `None`（成功，不产生错误）
/// - 已收录的码 → 对应的 `ValidationError::Broadcast`
/// - 其余（含原目录的 17 号及任意未知值）→ `UnknownBroadcastError`
pub fn interpret_broadcast_key(key: &str) -> Option<ValidationError> {
    match BroadcastCode::from_key(key) {
        Some(BroadcastCode::Ok) => None,
        Some(code) => Some(ValidationError::Broadcast(code)),
        None => Some(ValidationError::UnknownBroadcastError {
            code: key.to_string(),
        }),
    }
}

/// 同上，但输入已是整数码
pub fn interpret_broadcast_code(code: u32) -> Option<ValidationError> {
    match BroadcastCode::from_code(code) {
        Some(BroadcastCode::Ok) => None,
        Some(known) => Some(ValidationError::Broadcast(known)),
        None => Some(ValidationError::UnknownBroadcastError {
            code: code.to_string(),
        }),
    }
}
