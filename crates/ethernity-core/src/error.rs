use thiserror::Error;

/// Erros comuns da biblioteca Ethernity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Erro de decodificação de dados (hex, JSON, mnemônicos)
    #[error("Erro de decodificação: {0}")]
    DecodeError(String),

    /// Erro de validação
    #[error("Erro de validação: {0}")]
    ValidationError(String),
}

/// Tipo de resultado usado em toda a biblioteca
pub type Result<T> = std::result::Result<T, Error>;
