use crate::analyzer::JumpTable;
use crate::config::CodeAnalysisConfig;
use ethernity_core::{Bytecode, CodeHash, Error, Result};
use lru::LruCache;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Entrada do cache: a tabela é construída uma única vez, por quem chegar primeiro
type Slot = Arc<OnceCell<Arc<JumpTable>>>;

/// Estatísticas do cache
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub inserts: usize,
    pub evictions: usize,
    /// Análises efetivamente executadas
    pub analyses: usize,
}

/// Cache LRU de tabelas de salto indexado pelo hash do código
///
/// Cada código residente no cache é analisado no máximo uma vez, mesmo com
/// várias threads pedindo a mesma tabela ao mesmo tempo: a primeira constrói,
/// as demais aguardam e recebem o mesmo `Arc`.
pub struct AnalysisCache {
    config: CodeAnalysisConfig,
    entries: Mutex<LruCache<CodeHash, Slot>>,
    stats: Mutex<CacheStats>,
}

impl AnalysisCache {
    /// Cria um novo cache a partir da configuração
    pub fn new(config: CodeAnalysisConfig) -> Result<Self> {
        config.validate()?;
        let capacity = NonZeroUsize::new(config.cache_capacity).ok_or_else(|| {
            Error::ValidationError("cache_capacity deve ser maior que zero".to_string())
        })?;
        Ok(Self {
            config,
            entries: Mutex::new(LruCache::new(capacity)),
            stats: Mutex::new(CacheStats::default()),
        })
    }

    /// Obtém a tabela de saltos do código, analisando-o se necessário
    pub fn get_or_analyze(&self, code: &Bytecode) -> Result<Arc<JumpTable>> {
        if code.len() > self.config.max_code_size {
            warn!(
                hash = ?code.hash(),
                len = code.len(),
                max = self.config.max_code_size,
                "código excede o tamanho máximo"
            );
            return Err(Error::ValidationError(format!(
                "código com {} bytes excede o limite de {}",
                code.len(),
                self.config.max_code_size
            )));
        }

        if !self.config.enable_cache {
            return Ok(Arc::new(self.analyze(code)));
        }

        let slot = self.slot_for(code.hash());
        let table = slot.get_or_init(|| Arc::new(self.analyze(code)));
        Ok(Arc::clone(table))
    }

    /// Consulta a tabela já construída para o hash, sem analisar
    pub fn get(&self, hash: &CodeHash) -> Option<Arc<JumpTable>> {
        let mut entries = self.entries.lock();
        entries.get(hash).and_then(|slot| slot.get().cloned())
    }

    pub fn contains(&self, hash: &CodeHash) -> bool {
        self.entries.lock().contains(hash)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Remove todas as entradas (estatísticas são mantidas)
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Obtém estatísticas do cache
    pub fn stats(&self) -> CacheStats {
        self.stats.lock().clone()
    }

    pub fn config(&self) -> &CodeAnalysisConfig {
        &self.config
    }

    fn slot_for(&self, hash: CodeHash) -> Slot {
        let mut entries = self.entries.lock();
        if let Some(slot) = entries.get(&hash) {
            self.stats.lock().hits += 1;
            return Arc::clone(slot);
        }

        let slot: Slot = Arc::new(OnceCell::new());
        let evicted = entries.push(hash, Arc::clone(&slot));
        let mut stats = self.stats.lock();
        stats.misses += 1;
        stats.inserts += 1;
        if evicted.is_some() {
            stats.evictions += 1;
        }
        slot
    }

    fn analyze(&self, code: &Bytecode) -> JumpTable {
        let table = JumpTable::new(code.bytes());
        self.stats.lock().analyses += 1;
        debug!(
            hash = ?code.hash(),
            len = code.len(),
            jumpdests = table.outcome().jumpdests,
            truncated = table.outcome().is_truncated(),
            "tabela de saltos construída"
        );
        table
    }
}
