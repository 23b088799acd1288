//! 地址验证模块
//!
//! 企业级实现：统一的地址格式验证逻辑
//! Cosmos 区分账户/验证人两个地址空间，Ripple 使用自有 Base58 字母表

use sha2::{Digest, Sha256};

use crate::domain::Family;

/// Cosmos 账户地址前缀
const COSMOS_ACCOUNT_HRP: &str = "cosmos";
/// Cosmos 验证人地址前缀
const COSMOS_VALIDATOR_HRP: &str = "cosmosvaloper";

/// Ripple 地址解码后长度：1 字节版本 + 20 字节账户ID + 4 字节校验和
const RIPPLE_PAYLOAD_LEN: usize = 25;
/// Ripple 地址版本字节
const RIPPLE_ACCOUNT_VERSION: u8 = 0x00;

/// 地址验证器
pub struct AddressValidator;

impl AddressValidator {
    /// 验证指定链族的账户地址格式
    pub fn validate(family: Family, address: &str) -> bool {
        match family {
            Family::Cosmos => Self::validate_cosmos_account(address),
            Family::Ripple => Self::validate_ripple_address(address),
        }
    }

    /// 验证 Cosmos 账户地址（bech32，hrp = "cosmos"）
    pub fn validate_cosmos_account(address: &str) -> bool {
        Self::validate_bech32(address, COSMOS_ACCOUNT_HRP)
    }

    /// 验证 Cosmos 验证人地址（bech32，hrp = "cosmosvaloper"）
    pub fn validate_cosmos_validator(address: &str) -> bool {
        Self::validate_bech32(address, COSMOS_VALIDATOR_HRP)
    }

    fn validate_bech32(address: &str, expected_hrp: &str) -> bool {
        match bech32::decode(address) {
            // 账户和验证人都是 20 字节哈希
            Ok((hrp, data)) => hrp.as_str() == expected_hrp && data.len() == 20,
            Err(_) => false,
        }
    }

    /// 验证 Ripple 地址（Base58 ripple 字母表 + 双 SHA256 校验和）
    pub fn validate_ripple_address(address: &str) -> bool {
        if !address.starts_with('r') || address.len() < 25 || address.len() > 35 {
            return false;
        }

        let payload = match bs58::decode(address)
            .with_alphabet(bs58::Alphabet::RIPPLE)
            .into_vec()
        {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };

        if payload.len() != RIPPLE_PAYLOAD_LEN || payload[0] != RIPPLE_ACCOUNT_VERSION {
            return false;
        }

        let (body, checksum) = payload.split_at(RIPPLE_PAYLOAD_LEN - 4);
        let digest = Sha256::digest(Sha256::digest(body));
        digest[..4] == *checksum
    }
}
