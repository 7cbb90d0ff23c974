use std::env;

use anyhow::Context;
use ethernity_codeseg::{AnalysisCache, CodeAnalysisConfig, Instructions};
use ethernity_core::{utils::format_h256, Bytecode};
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Uso: {} <BYTECODE_HEX> [--disasm]", args[0]);
        std::process::exit(1);
    }
    let code = Bytecode::from_hex(&args[1]).context("bytecode inválido")?;
    let disasm = args.iter().any(|a| a == "--disasm");

    let cache = AnalysisCache::new(CodeAnalysisConfig::default())?;
    let table = cache
        .get_or_analyze(&code)
        .context("falha ao analisar o código")?;
    info!("Código {} com {} bytes", format_h256(&code.hash()), code.len());

    let outcome = table.outcome();
    if let Some(pc) = outcome.truncated_at {
        println!("PUSH truncado em {:#06x}; bytes seguintes ignorados", pc);
    }

    println!("JUMPDESTs válidos ({}):", outcome.jumpdests);
    for pc in table.jumpdests() {
        println!("  {:#06x}", pc);
    }

    if disasm {
        println!("\nInstruções:");
        for ins in Instructions::new(code.bytes()) {
            let mark = if table.is_jumpdest(ins.pc) { "*" } else { " " };
            println!("{} {}", mark, ins);
        }
    }
    Ok(())
}
