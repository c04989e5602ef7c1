//! Scenario 7 from SPEC_FULL.md §8: concurrent queries over a shared
//! engine return the same results as the sequential run.

use std::sync::Arc;
use std::thread;

use urlfilter_core::{EngineConfig, FilterEngine};

#[test]
fn concurrent_queries_against_shared_engine_agree_with_sequential_counts() {
    let engine = Arc::new(FilterEngine::new(EngineConfig::default()));
    engine.initialize().unwrap();

    const THREADS: usize = 4;
    const QUERIES_PER_THREAD: usize = 100;

    let mut handles = Vec::with_capacity(THREADS);
    for t in 0..THREADS {
        let engine = Arc::clone(&engine);
        handles.push(thread::spawn(move || {
            let mut blocked = 0;
            for i in 0..QUERIES_PER_THREAD {
                let url = format!("https://test{t}-{i}.doubleclick.net/ads");
                if engine.should_block(&url, "", "") {
                    blocked += 1;
                }
            }
            blocked
        }));
    }

    let total_blocked: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total_blocked, THREADS * QUERIES_PER_THREAD);
}

#[test]
fn concurrent_mutation_and_queries_never_panic_or_deadlock() {
    let engine = Arc::new(FilterEngine::new(EngineConfig {
        load_builtin_list_on_init: false,
        max_rules: None,
    }));
    engine.initialize().unwrap();
    engine.load_filter_rules("||shared-example.test^").unwrap();

    let reader_engine = Arc::clone(&engine);
    let reader = thread::spawn(move || {
        for _ in 0..200 {
            let _ = reader_engine.should_block("https://shared-example.test/x", "", "");
        }
    });

    let writer_engine = Arc::clone(&engine);
    let writer = thread::spawn(move || {
        for i in 0..50 {
            let _ = writer_engine.load_filter_rules(&format!("||extra{i}.test^"));
        }
    });

    reader.join().unwrap();
    writer.join().unwrap();

    assert!(engine.rule_count() >= 51);
}
