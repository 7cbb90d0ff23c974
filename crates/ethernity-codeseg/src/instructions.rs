use ethernity_core::opcodes::immediate_size;
use ethernity_core::OpCode;
use std::fmt;

/// Instrução decodificada do bytecode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction<'a> {
    pub pc: usize,
    pub opcode: OpCode,
    /// Bytes de imediato (vazio para opcodes que não são PUSH)
    pub immediate: &'a [u8],
}

impl Instruction<'_> {
    /// Offset da próxima instrução
    pub fn next_pc(&self) -> usize {
        self.pc + 1 + self.immediate.len()
    }
}

impl fmt::Display for Instruction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}: {}", self.pc, self.opcode)?;
        if !self.immediate.is_empty() {
            f.write_str(" 0x")?;
            for byte in self.immediate {
                write!(f, "{:02x}", byte)?;
            }
        }
        Ok(())
    }
}

/// Percorre o bytecode instrução por instrução, pulando imediatos de PUSH
///
/// A iteração termina no fim do código ou em um PUSH cujo imediato ultrapassa
/// o fim do buffer; nesse caso [`Instructions::truncated_at`] informa o offset
/// do PUSH truncado, que não é emitido.
#[derive(Debug, Clone)]
pub struct Instructions<'a> {
    code: &'a [u8],
    pos: usize,
    truncated_at: Option<usize>,
}

impl<'a> Instructions<'a> {
    pub fn new(code: &'a [u8]) -> Self {
        Self {
            code,
            pos: 0,
            truncated_at: None,
        }
    }

    /// Offset do PUSH truncado que encerrou a iteração, se houver
    pub fn truncated_at(&self) -> Option<usize> {
        self.truncated_at
    }

    /// Offset atual do cursor
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for Instructions<'a> {
    type Item = Instruction<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.truncated_at.is_some() {
            return None;
        }
        let pc = self.pos;
        let opcode = *self.code.get(pc)?;
        let size = immediate_size(opcode);
        if size > 0 && pc + size >= self.code.len() {
            self.truncated_at = Some(pc);
            return None;
        }
        let immediate = &self.code[pc + 1..pc + 1 + size];
        self.pos = pc + 1 + size;
        Some(Instruction {
            pc,
            opcode: OpCode(opcode),
            immediate,
        })
    }
}

/// Decodifica o bytecode em uma lista de instruções
pub fn parse_instructions(code: &[u8]) -> Vec<Instruction<'_>> {
    Instructions::new(code).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_push_immediates() {
        let code = [0x60, 0x5b, 0x61, 0x01, 0x02, 0x5b];
        let insts = parse_instructions(&code);
        let pcs: Vec<usize> = insts.iter().map(|i| i.pc).collect();
        assert_eq!(pcs, vec![0, 2, 5]);
        assert_eq!(insts[0].immediate, &[0x5b]);
        assert_eq!(insts[1].immediate, &[0x01, 0x02]);
        assert!(insts[2].immediate.is_empty());
        assert_eq!(insts[1].next_pc(), 5);
    }

    #[test]
    fn stops_at_truncated_push() {
        let code = [0x5b, 0x62, 0x01, 0x5b];
        let mut iter = Instructions::new(&code);
        assert_eq!(iter.next().map(|i| i.pc), Some(0));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.truncated_at(), Some(1));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn exact_fit_is_not_truncated() {
        let code = [0x61, 0x5b, 0x5b];
        let mut iter = Instructions::new(&code);
        assert_eq!(iter.next().map(|i| i.immediate.len()), Some(2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.truncated_at(), None);
        assert_eq!(iter.position(), 3);
    }

    #[test]
    fn display_uses_mnemonics() {
        let code = [0x61, 0xab, 0xcd, 0x5b];
        let lines: Vec<String> = Instructions::new(&code).map(|i| i.to_string()).collect();
        assert_eq!(lines, vec!["0x0000: PUSH2 0xabcd", "0x0003: JUMPDEST"]);
    }
}
