use crate::bitmap::JumpBitmap;
use crate::instructions::Instructions;
use ethereum_types::U256;
use ethernity_core::opcodes::JUMPDEST;
use tracing::{debug, trace};

/// Resumo de uma passada de análise
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOutcome {
    /// Bytes cobertos pela passada (menor que o tamanho do código se truncada)
    pub scanned: usize,
    /// Quantidade de JUMPDESTs registrados
    pub jumpdests: usize,
    /// Offset do PUSH truncado que interrompeu a passada
    pub truncated_at: Option<usize>,
}

impl AnalysisOutcome {
    pub fn is_truncated(&self) -> bool {
        self.truncated_at.is_some()
    }
}

/// Classifica os offsets de `code`, registrando em `bitmap` os JUMPDESTs válidos
///
/// O bitmap é sempre limpo antes da passada. Imediatos de PUSH nunca são
/// classificados; um PUSH final cujo imediato ultrapassa o código encerra a
/// passada sem marcar nada dali em diante.
pub fn analyze_into(code: &[u8], bitmap: &mut JumpBitmap) -> AnalysisOutcome {
    bitmap.reset();

    let mut outcome = AnalysisOutcome::default();
    let mut insts = Instructions::new(code);
    for ins in insts.by_ref() {
        if ins.opcode.byte() == JUMPDEST {
            bitmap.set(ins.pc);
            outcome.jumpdests += 1;
        }
    }
    outcome.scanned = insts.position();
    outcome.truncated_at = insts.truncated_at();

    if let Some(pc) = outcome.truncated_at {
        debug!(
            pc,
            code_len = code.len(),
            "PUSH truncado no fim do código; análise interrompida"
        );
    }
    trace!(
        code_len = code.len(),
        scanned = outcome.scanned,
        jumpdests = outcome.jumpdests,
        "análise de código concluída"
    );
    outcome
}

/// Analisador reutilizável de segmentos de código
///
/// Mantém um único bitmap de trabalho que é reaproveitado entre códigos
/// distintos, evitando realocações. Cada chamada a [`CodeAnalyzer::analyze`]
/// limpa o estado anterior.
#[derive(Debug, Default)]
pub struct CodeAnalyzer {
    bitmap: JumpBitmap,
    last: AnalysisOutcome,
}

impl CodeAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analisa o código e devolve o bitmap de trabalho preenchido
    pub fn analyze(&mut self, code: &[u8]) -> &JumpBitmap {
        self.last = analyze_into(code, &mut self.bitmap);
        &self.bitmap
    }

    /// Analisa o código e copia o resultado para uma tabela imutável
    pub fn freeze(&mut self, code: &[u8]) -> JumpTable {
        self.analyze(code);
        let mut bitmap = JumpBitmap::with_capacity(self.bitmap.len_bits());
        for offset in self.bitmap.iter() {
            bitmap.set(offset);
        }
        JumpTable {
            bitmap,
            code_len: code.len(),
            outcome: self.last,
        }
    }

    /// Resumo da última análise
    pub fn last_outcome(&self) -> AnalysisOutcome {
        self.last
    }

    pub fn bitmap(&self) -> &JumpBitmap {
        &self.bitmap
    }

    /// Descarta o resultado atual
    pub fn reset(&mut self) {
        self.bitmap.reset();
        self.last = AnalysisOutcome::default();
    }
}

/// Tabela imutável de destinos de salto de um código
///
/// Pode ser compartilhada entre threads (via `Arc`) e consultada
/// concorrentemente por quantas execuções forem necessárias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpTable {
    bitmap: JumpBitmap,
    code_len: usize,
    outcome: AnalysisOutcome,
}

impl JumpTable {
    /// Analisa o código com um bitmap novo
    pub fn new(code: &[u8]) -> Self {
        let mut bitmap = JumpBitmap::new();
        let outcome = analyze_into(code, &mut bitmap);
        bitmap.shrink_to_fit();
        Self {
            bitmap,
            code_len: code.len(),
            outcome,
        }
    }

    pub fn is_jumpdest(&self, offset: usize) -> bool {
        self.bitmap.is_set(offset)
    }

    /// Valida um destino de salto vindo da pilha do interpretador
    pub fn is_valid_jump(&self, target: U256) -> bool {
        match stack_word_to_offset(target) {
            Some(offset) => offset < self.code_len && self.bitmap.is_set(offset),
            None => false,
        }
    }

    /// Offsets de JUMPDEST válidos, em ordem crescente
    pub fn jumpdests(&self) -> impl Iterator<Item = usize> + '_ {
        self.bitmap.iter()
    }

    pub fn bitmap(&self) -> &JumpBitmap {
        &self.bitmap
    }

    pub fn code_len(&self) -> usize {
        self.code_len
    }

    pub fn outcome(&self) -> AnalysisOutcome {
        self.outcome
    }
}

/// Valida um salto para `target` conferindo também o byte no código
pub fn is_valid_jump(code: &[u8], bitmap: &JumpBitmap, target: U256) -> bool {
    let Some(offset) = stack_word_to_offset(target) else {
        return false;
    };
    code.get(offset) == Some(&JUMPDEST) && bitmap.is_set(offset)
}

fn stack_word_to_offset(word: U256) -> Option<usize> {
    if word.bits() > usize::BITS as usize {
        return None;
    }
    Some(word.low_u64() as usize)
}
