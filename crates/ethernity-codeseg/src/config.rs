use ethernity_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Limite de tamanho de código implantado na mainnet (EIP-170)
pub const DEFAULT_MAX_CODE_SIZE: usize = 0x6000;

/// Configuração para análise de segmentos de código
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeAnalysisConfig {
    /// Quantidade máxima de códigos mantidos no cache
    pub cache_capacity: usize,
    /// Tamanho máximo de código aceito, em bytes
    pub max_code_size: usize,
    /// Habilita cache de tabelas de salto
    pub enable_cache: bool,
}

impl Default for CodeAnalysisConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 1024,
            max_code_size: DEFAULT_MAX_CODE_SIZE,
            enable_cache: true,
        }
    }
}

impl CodeAnalysisConfig {
    /// Carrega a configuração a partir de JSON; campos ausentes usam o padrão
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::DecodeError(format!("configuração inválida: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(Error::ValidationError(
                "cache_capacity deve ser maior que zero".to_string(),
            ));
        }
        if self.max_code_size == 0 {
            return Err(Error::ValidationError(
                "max_code_size deve ser maior que zero".to_string(),
            ));
        }
        Ok(())
    }
}
