//! 地址验证模块
//!
//! TRON 地址格式校验：固定长度、固定前缀、Base58 字符集
//! 校验只看形状，不做任何网络或 I/O 操作

use sha2::{Digest, Sha256};

/// TRON 地址长度（Base58 编码后）
pub const TRON_ADDRESS_LEN: usize = 34;

/// TRON 主网地址前缀字符
pub const TRON_ADDRESS_PREFIX: char = 'T';

/// TRON 主网地址版本字节
const TRON_VERSION_BYTE: u8 = 0x41;

/// Base58 字符集（去掉 0、O、I、l）
const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// 已通过格式校验的地址，只能由 [`AddressValidator::parse`] 构造
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedAddress(String);

impl ValidatedAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ValidatedAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 地址验证器
pub struct AddressValidator;

impl AddressValidator {
    /// 验证地址格式
    ///
    /// 规则等价于 `^T[1-9A-HJ-NP-Za-km-z]{33}$`。
    /// 非法输入返回 false，不返回错误。
    pub fn validate(address: &str) -> bool {
        // 先按字节判断长度：多字节字符一定不在字符集里
        if address.len() != TRON_ADDRESS_LEN {
            return false;
        }

        let mut chars = address.chars();
        if chars.next() != Some(TRON_ADDRESS_PREFIX) {
            return false;
        }

        chars.all(Self::is_base58_char)
    }

    /// 校验并包装为 [`ValidatedAddress`]
    pub fn parse(address: &str) -> Option<ValidatedAddress> {
        Self::validate(address).then(|| ValidatedAddress(address.to_string()))
    }

    /// 单个字符是否属于 Base58 字符集
    pub fn is_base58_char(c: char) -> bool {
        c.is_ascii() && BASE58_ALPHABET.contains(c)
    }

    /// 完整 Base58Check 校验（版本字节 + 双 SHA-256 校验和）
    ///
    /// 仅作参考信息展示，查询流程的准入只依赖 [`AddressValidator::validate`]。
    pub fn has_valid_checksum(address: &str) -> bool {
        if !Self::validate(address) {
            return false;
        }

        let decoded = match bs58::decode(address).into_vec() {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };

        // 1 字节版本 + 20 字节账户 + 4 字节校验和
        if decoded.len() != 25 || decoded[0] != TRON_VERSION_BYTE {
            return false;
        }

        let (payload, checksum) = decoded.split_at(21);
        let first = Sha256::digest(payload);
        let second = Sha256::digest(first);

        second[..4] == *checksum
    }
}
