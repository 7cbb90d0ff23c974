/*!
 * Ethernity Types
 *
 * Tipos comuns usados em toda a workspace Ethernity
 */

use crate::error::Result;
use crate::utils::{decode_hex, keccak256};
use bytes::Bytes;
use ethereum_types::H256;
use std::fmt;

/// Alias para o hash Keccak-256 de um código de contrato
pub type CodeHash = H256;

/// Código de contrato carregado, junto com seu hash
///
/// O clone é barato: os bytes são compartilhados via [`Bytes`].
#[derive(Clone, PartialEq, Eq)]
pub struct Bytecode {
    code: Bytes,
    hash: CodeHash,
}

impl Bytecode {
    /// Cria um novo código, calculando o hash Keccak-256
    pub fn new(code: impl Into<Bytes>) -> Self {
        let code = code.into();
        let hash = H256(keccak256(&code));
        Self { code, hash }
    }

    /// Decodifica um código a partir de uma string hexadecimal
    pub fn from_hex(hex: &str) -> Result<Self> {
        Ok(Self::new(decode_hex(hex)?))
    }

    /// Bytes brutos do código
    pub fn bytes(&self) -> &[u8] {
        &self.code
    }

    /// Hash Keccak-256 do código
    pub fn hash(&self) -> CodeHash {
        self.hash
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

impl AsRef<[u8]> for Bytecode {
    fn as_ref(&self) -> &[u8] {
        &self.code
    }
}

impl fmt::Debug for Bytecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bytecode")
            .field("len", &self.code.len())
            .field("hash", &self.hash)
            .finish()
    }
}
