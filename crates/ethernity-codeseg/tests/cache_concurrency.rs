#[cfg(loom)]
use loom::sync::Arc;
#[cfg(loom)]
use loom::thread;
#[cfg(not(loom))]
use std::sync::Arc;
#[cfg(not(loom))]
use std::thread;

use ethernity_codeseg::{AnalysisCache, CodeAnalysisConfig, JumpTable};
use ethernity_core::Bytecode;

fn sample_code(idx: u8) -> Bytecode {
    // PUSH1 idx, JUMPDEST, PUSH2 0x5b5b, JUMPDEST
    Bytecode::new(vec![0x60, idx, 0x5b, 0x61, 0x5b, 0x5b, 0x5b])
}

#[test]
fn concurrent_lookups_analyze_once() {
    #[cfg(loom)]
    {
        let mut builder = loom::model::Builder::new();
        builder.max_threads = 4;
        builder.check(|| {
            run_same_code(3);
        });
    }
    #[cfg(not(loom))]
    {
        run_same_code(32);
    }
}

fn run_same_code(threads: usize) {
    let cache = Arc::new(AnalysisCache::new(CodeAnalysisConfig::default()).unwrap());
    let code = sample_code(0x5b);
    let mut handles = Vec::new();
    for _ in 0..threads {
        let c = Arc::clone(&cache);
        let code = code.clone();
        handles.push(thread::spawn(move || c.get_or_analyze(&code).unwrap()));
    }
    let tables: Vec<std::sync::Arc<JumpTable>> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    for t in &tables {
        assert!(std::sync::Arc::ptr_eq(t, &tables[0]));
        assert_eq!(t.jumpdests().collect::<Vec<_>>(), vec![2, 6]);
    }
    let stats = cache.stats();
    assert_eq!(stats.analyses, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, threads - 1);
}

#[test]
fn shared_table_is_read_concurrently() {
    let table = std::sync::Arc::new(JumpTable::new(sample_code(1).bytes()));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let t = std::sync::Arc::clone(&table);
            std::thread::spawn(move || (0..16).filter(|&pc| t.is_jumpdest(pc)).count())
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), 2);
    }
}

#[test]
fn distinct_codes_each_analyzed_once() {
    let cache = std::sync::Arc::new(AnalysisCache::new(CodeAnalysisConfig::default()).unwrap());
    let handles: Vec<_> = (0..16u8)
        .map(|i| {
            let c = std::sync::Arc::clone(&cache);
            std::thread::spawn(move || {
                for _ in 0..4 {
                    c.get_or_analyze(&sample_code(i % 4)).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(cache.len(), 4);
    assert_eq!(cache.stats().analyses, 4);
}
