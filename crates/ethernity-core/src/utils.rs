/*!
 * Ethernity Utils
 * 
 * Utilitários comuns usados em toda a workspace Ethernity
 */

use crate::error::{Error, Result};
use ethereum_types::H256;
use tiny_keccak::{Hasher, Keccak};

/// Remove o prefixo `0x` (ou `0X`), se presente
pub fn strip_hex_prefix(hex: &str) -> &str {
    hex.strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex)
}

/// Decodifica uma string hexadecimal, com ou sem prefixo `0x`
pub fn decode_hex(hex: &str) -> Result<Vec<u8>> {
    let hex_str = strip_hex_prefix(hex.trim());
    hex::decode(hex_str).map_err(|e| Error::DecodeError(format!("hex inválido: {e}")))
}

/// Formata um H256 para exibição
pub fn format_h256(hash: &H256) -> String {
    format!("0x{:x}", hash)
}

/// Calcula o hash Keccak-256 de dados
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut result = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut result);
    result
}
