//! Ethernity CodeSeg
//!
//! Análise de segmentos de código EVM: separa inícios de instrução dos bytes
//! de imediato dos PUSH e registra quais offsets são destinos de salto válidos.

pub mod bitmap;
pub mod instructions;
pub mod analyzer;
pub mod cache;
pub mod config;

pub use analyzer::{analyze_into, is_valid_jump, AnalysisOutcome, CodeAnalyzer, JumpTable};
pub use bitmap::JumpBitmap;
pub use cache::{AnalysisCache, CacheStats};
pub use config::CodeAnalysisConfig;
pub use instructions::{parse_instructions, Instruction, Instructions};
