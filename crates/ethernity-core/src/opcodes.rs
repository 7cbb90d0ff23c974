/*!
 * Ethernity Opcodes
 *
 * Tabela estática de opcodes EVM: constantes, largura de imediatos e mnemônicos
 */

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

pub const STOP: u8 = 0x00;
pub const ADD: u8 = 0x01;
pub const MUL: u8 = 0x02;
pub const SUB: u8 = 0x03;
pub const DIV: u8 = 0x04;
pub const SDIV: u8 = 0x05;
pub const MOD: u8 = 0x06;
pub const SMOD: u8 = 0x07;
pub const ADDMOD: u8 = 0x08;
pub const MULMOD: u8 = 0x09;
pub const EXP: u8 = 0x0a;
pub const SIGNEXTEND: u8 = 0x0b;

pub const LT: u8 = 0x10;
pub const GT: u8 = 0x11;
pub const SLT: u8 = 0x12;
pub const SGT: u8 = 0x13;
pub const EQ: u8 = 0x14;
pub const ISZERO: u8 = 0x15;
pub const AND: u8 = 0x16;
pub const OR: u8 = 0x17;
pub const XOR: u8 = 0x18;
pub const NOT: u8 = 0x19;
pub const BYTE: u8 = 0x1a;
pub const SHL: u8 = 0x1b;
pub const SHR: u8 = 0x1c;
pub const SAR: u8 = 0x1d;

pub const SHA3: u8 = 0x20;

pub const ADDRESS: u8 = 0x30;
pub const BALANCE: u8 = 0x31;
pub const ORIGIN: u8 = 0x32;
pub const CALLER: u8 = 0x33;
pub const CALLVALUE: u8 = 0x34;
pub const CALLDATALOAD: u8 = 0x35;
pub const CALLDATASIZE: u8 = 0x36;
pub const CALLDATACOPY: u8 = 0x37;
pub const CODESIZE: u8 = 0x38;
pub const CODECOPY: u8 = 0x39;
pub const GASPRICE: u8 = 0x3a;
pub const EXTCODESIZE: u8 = 0x3b;
pub const EXTCODECOPY: u8 = 0x3c;
pub const RETURNDATASIZE: u8 = 0x3d;
pub const RETURNDATACOPY: u8 = 0x3e;
pub const EXTCODEHASH: u8 = 0x3f;

pub const BLOCKHASH: u8 = 0x40;
pub const COINBASE: u8 = 0x41;
pub const TIMESTAMP: u8 = 0x42;
pub const NUMBER: u8 = 0x43;
pub const DIFFICULTY: u8 = 0x44;
pub const GASLIMIT: u8 = 0x45;
pub const CHAINID: u8 = 0x46;
pub const SELFBALANCE: u8 = 0x47;
pub const BASEFEE: u8 = 0x48;

pub const POP: u8 = 0x50;
pub const MLOAD: u8 = 0x51;
pub const MSTORE: u8 = 0x52;
pub const MSTORE8: u8 = 0x53;
pub const SLOAD: u8 = 0x54;
pub const SSTORE: u8 = 0x55;
pub const JUMP: u8 = 0x56;
pub const JUMPI: u8 = 0x57;
pub const PC: u8 = 0x58;
pub const MSIZE: u8 = 0x59;
pub const GAS: u8 = 0x5a;
/// Marcador de destino de salto válido
pub const JUMPDEST: u8 = 0x5b;

pub const PUSH0: u8 = 0x5f;
/// Primeiro opcode PUSH com imediato (1 byte)
pub const PUSH1: u8 = 0x60;
/// Último opcode PUSH com imediato (32 bytes)
pub const PUSH32: u8 = 0x7f;

pub const DUP1: u8 = 0x80;
pub const DUP16: u8 = 0x8f;
pub const SWAP1: u8 = 0x90;
pub const SWAP16: u8 = 0x9f;
pub const LOG0: u8 = 0xa0;
pub const LOG4: u8 = 0xa4;

pub const CREATE: u8 = 0xf0;
pub const CALL: u8 = 0xf1;
pub const CALLCODE: u8 = 0xf2;
pub const RETURN: u8 = 0xf3;
pub const DELEGATECALL: u8 = 0xf4;
pub const CREATE2: u8 = 0xf5;
pub const STATICCALL: u8 = 0xfa;
pub const REVERT: u8 = 0xfd;
pub const INVALID: u8 = 0xfe;
pub const SELFDESTRUCT: u8 = 0xff;

/// Tamanho máximo de um imediato PUSH, em bytes
pub const MAX_IMMEDIATE_SIZE: usize = 32;

/// Indica se o opcode é um PUSH que carrega imediato (PUSH1..PUSH32)
///
/// `PUSH0` não carrega imediato e portanto não é considerado aqui.
#[inline]
pub const fn is_push(opcode: u8) -> bool {
    opcode >= PUSH1 && opcode <= PUSH32
}

/// Quantidade de bytes de imediato que seguem o opcode (0 para não-PUSH)
#[inline]
pub const fn immediate_size(opcode: u8) -> usize {
    if is_push(opcode) {
        (opcode - PUSH1) as usize + 1
    } else {
        0
    }
}

const PUSH_NAMES: [&str; 33] = [
    "PUSH0", "PUSH1", "PUSH2", "PUSH3", "PUSH4", "PUSH5", "PUSH6", "PUSH7", "PUSH8", "PUSH9",
    "PUSH10", "PUSH11", "PUSH12", "PUSH13", "PUSH14", "PUSH15", "PUSH16", "PUSH17", "PUSH18",
    "PUSH19", "PUSH20", "PUSH21", "PUSH22", "PUSH23", "PUSH24", "PUSH25", "PUSH26", "PUSH27",
    "PUSH28", "PUSH29", "PUSH30", "PUSH31", "PUSH32",
];

const DUP_NAMES: [&str; 16] = [
    "DUP1", "DUP2", "DUP3", "DUP4", "DUP5", "DUP6", "DUP7", "DUP8", "DUP9", "DUP10", "DUP11",
    "DUP12", "DUP13", "DUP14", "DUP15", "DUP16",
];

const SWAP_NAMES: [&str; 16] = [
    "SWAP1", "SWAP2", "SWAP3", "SWAP4", "SWAP5", "SWAP6", "SWAP7", "SWAP8", "SWAP9", "SWAP10",
    "SWAP11", "SWAP12", "SWAP13", "SWAP14", "SWAP15", "SWAP16",
];

const LOG_NAMES: [&str; 5] = ["LOG0", "LOG1", "LOG2", "LOG3", "LOG4"];

const fn build_mnemonics() -> [Option<&'static str>; 256] {
    let mut table: [Option<&'static str>; 256] = [None; 256];

    table[STOP as usize] = Some("STOP");
    table[ADD as usize] = Some("ADD");
    table[MUL as usize] = Some("MUL");
    table[SUB as usize] = Some("SUB");
    table[DIV as usize] = Some("DIV");
    table[SDIV as usize] = Some("SDIV");
    table[MOD as usize] = Some("MOD");
    table[SMOD as usize] = Some("SMOD");
    table[ADDMOD as usize] = Some("ADDMOD");
    table[MULMOD as usize] = Some("MULMOD");
    table[EXP as usize] = Some("EXP");
    table[SIGNEXTEND as usize] = Some("SIGNEXTEND");
    table[LT as usize] = Some("LT");
    table[GT as usize] = Some("GT");
    table[SLT as usize] = Some("SLT");
    table[SGT as usize] = Some("SGT");
    table[EQ as usize] = Some("EQ");
    table[ISZERO as usize] = Some("ISZERO");
    table[AND as usize] = Some("AND");
    table[OR as usize] = Some("OR");
    table[XOR as usize] = Some("XOR");
    table[NOT as usize] = Some("NOT");
    table[BYTE as usize] = Some("BYTE");
    table[SHL as usize] = Some("SHL");
    table[SHR as usize] = Some("SHR");
    table[SAR as usize] = Some("SAR");
    table[SHA3 as usize] = Some("SHA3");
    table[ADDRESS as usize] = Some("ADDRESS");
    table[BALANCE as usize] = Some("BALANCE");
    table[ORIGIN as usize] = Some("ORIGIN");
    table[CALLER as usize] = Some("CALLER");
    table[CALLVALUE as usize] = Some("CALLVALUE");
    table[CALLDATALOAD as usize] = Some("CALLDATALOAD");
    table[CALLDATASIZE as usize] = Some("CALLDATASIZE");
    table[CALLDATACOPY as usize] = Some("CALLDATACOPY");
    table[CODESIZE as usize] = Some("CODESIZE");
    table[CODECOPY as usize] = Some("CODECOPY");
    table[GASPRICE as usize] = Some("GASPRICE");
    table[EXTCODESIZE as usize] = Some("EXTCODESIZE");
    table[EXTCODECOPY as usize] = Some("EXTCODECOPY");
    table[RETURNDATASIZE as usize] = Some("RETURNDATASIZE");
    table[RETURNDATACOPY as usize] = Some("RETURNDATACOPY");
    table[EXTCODEHASH as usize] = Some("EXTCODEHASH");
    table[BLOCKHASH as usize] = Some("BLOCKHASH");
    table[COINBASE as usize] = Some("COINBASE");
    table[TIMESTAMP as usize] = Some("TIMESTAMP");
    table[NUMBER as usize] = Some("NUMBER");
    table[DIFFICULTY as usize] = Some("DIFFICULTY");
    table[GASLIMIT as usize] = Some("GASLIMIT");
    table[CHAINID as usize] = Some("CHAINID");
    table[SELFBALANCE as usize] = Some("SELFBALANCE");
    table[BASEFEE as usize] = Some("BASEFEE");
    table[POP as usize] = Some("POP");
    table[MLOAD as usize] = Some("MLOAD");
    table[MSTORE as usize] = Some("MSTORE");
    table[MSTORE8 as usize] = Some("MSTORE8");
    table[SLOAD as usize] = Some("SLOAD");
    table[SSTORE as usize] = Some("SSTORE");
    table[JUMP as usize] = Some("JUMP");
    table[JUMPI as usize] = Some("JUMPI");
    table[PC as usize] = Some("PC");
    table[MSIZE as usize] = Some("MSIZE");
    table[GAS as usize] = Some("GAS");
    table[JUMPDEST as usize] = Some("JUMPDEST");
    table[CREATE as usize] = Some("CREATE");
    table[CALL as usize] = Some("CALL");
    table[CALLCODE as usize] = Some("CALLCODE");
    table[RETURN as usize] = Some("RETURN");
    table[DELEGATECALL as usize] = Some("DELEGATECALL");
    table[CREATE2 as usize] = Some("CREATE2");
    table[STATICCALL as usize] = Some("STATICCALL");
    table[REVERT as usize] = Some("REVERT");
    table[INVALID as usize] = Some("INVALID");
    table[SELFDESTRUCT as usize] = Some("SELFDESTRUCT");

    // faixas numeradas
    let mut i = 0;
    while i < PUSH_NAMES.len() {
        table[PUSH0 as usize + i] = Some(PUSH_NAMES[i]);
        i += 1;
    }
    let mut i = 0;
    while i < DUP_NAMES.len() {
        table[DUP1 as usize + i] = Some(DUP_NAMES[i]);
        table[SWAP1 as usize + i] = Some(SWAP_NAMES[i]);
        i += 1;
    }
    let mut i = 0;
    while i < LOG_NAMES.len() {
        table[LOG0 as usize + i] = Some(LOG_NAMES[i]);
        i += 1;
    }

    table
}

static MNEMONICS: [Option<&str>; 256] = build_mnemonics();

/// Mnemônico do opcode, ou `None` para bytes não definidos
#[inline]
pub fn mnemonic(opcode: u8) -> Option<&'static str> {
    MNEMONICS[opcode as usize]
}

/// Opcode EVM com exibição por mnemônico
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpCode(pub u8);

impl OpCode {
    pub const fn byte(self) -> u8 {
        self.0
    }

    pub fn mnemonic(self) -> Option<&'static str> {
        mnemonic(self.0)
    }

    pub const fn is_push(self) -> bool {
        is_push(self.0)
    }

    pub const fn immediate_size(self) -> usize {
        immediate_size(self.0)
    }

    pub const fn is_jumpdest(self) -> bool {
        self.0 == JUMPDEST
    }
}

impl From<u8> for OpCode {
    fn from(value: u8) -> Self {
        OpCode(value)
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mnemonic() {
            Some(name) => f.write_str(name),
            None => write!(f, "UNKNOWN(0x{:02x})", self.0),
        }
    }
}

impl FromStr for OpCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        MNEMONICS
            .iter()
            .position(|name| matches!(name, Some(n) if n.eq_ignore_ascii_case(wanted)))
            .map(|idx| OpCode(idx as u8))
            .ok_or_else(|| Error::DecodeError(format!("mnemônico desconhecido: {wanted}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_widths() {
        assert_eq!(immediate_size(PUSH0), 0);
        assert_eq!(immediate_size(PUSH1), 1);
        assert_eq!(immediate_size(0x61), 2);
        assert_eq!(immediate_size(PUSH32), 32);
        assert_eq!(immediate_size(DUP1), 0);
        assert_eq!(immediate_size(JUMPDEST), 0);
        assert!(!is_push(PUSH0));
        assert!(is_push(PUSH1) && is_push(PUSH32));
        assert!(!is_push(DUP1));
    }

    #[test]
    fn every_push_is_counted_once() {
        let pushes = (0u8..=255).filter(|op| is_push(*op)).count();
        assert_eq!(pushes, 32);
        let max = (0u8..=255).map(immediate_size).max().unwrap();
        assert_eq!(max, MAX_IMMEDIATE_SIZE);
    }

    #[test]
    fn mnemonics_for_ranges() {
        assert_eq!(mnemonic(PUSH0), Some("PUSH0"));
        assert_eq!(mnemonic(PUSH1), Some("PUSH1"));
        assert_eq!(mnemonic(PUSH32), Some("PUSH32"));
        assert_eq!(mnemonic(DUP16), Some("DUP16"));
        assert_eq!(mnemonic(SWAP1), Some("SWAP1"));
        assert_eq!(mnemonic(LOG0), Some("LOG0"));
        assert_eq!(mnemonic(LOG4), Some("LOG4"));
        assert_eq!(mnemonic(JUMPDEST), Some("JUMPDEST"));
        assert_eq!(mnemonic(0x0c), None);
        assert_eq!(mnemonic(0xef), None);
    }

    #[test]
    fn display_and_parse() {
        assert_eq!(OpCode(JUMPDEST).to_string(), "JUMPDEST");
        assert_eq!(OpCode(0x0c).to_string(), "UNKNOWN(0x0c)");
        assert_eq!("push2".parse::<OpCode>().unwrap(), OpCode(0x61));
        assert_eq!("SELFDESTRUCT".parse::<OpCode>().unwrap(), OpCode(SELFDESTRUCT));
        assert!(matches!("FOO".parse::<OpCode>(), Err(Error::DecodeError(_))));
    }
}
