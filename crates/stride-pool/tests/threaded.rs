//! Integration test: proxy recycling and interning across threads.
//!
//! The recycling queue and the canonical-id table are the only pool
//! facilities shared between threads; everything else goes through
//! `&mut Pool`.

use std::collections::HashSet;
use std::sync::Mutex;

use stride_pool::{CanonicalIds, Pool, PoolConfig};
use stride_test_utils::fixtures::IntRecord;

#[test]
fn create_ref_and_release_ref_from_many_threads() {
    let rec = IntRecord::new();
    let pool = Pool::with_config(rec.layout.clone(), PoolConfig::new().with_proxy_cache(8)).unwrap();

    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..200 {
                    let proxy = pool.create_ref();
                    assert!(!proxy.is_bound());
                    assert_eq!(proxy.owner(), pool.id());
                    pool.release_ref(proxy).unwrap();
                }
            });
        }
    });

    let stats = pool.stats();
    // Every request was served by either a fresh mint or the queue.
    assert_eq!(stats.proxies_allocated + stats.proxies_recycled, 1600);
    assert!(stats.proxies_recycled > 0);
}

#[test]
fn release_past_cache_capacity_drops_quietly() {
    let rec = IntRecord::new();
    let pool = Pool::with_config(rec.layout.clone(), PoolConfig::new().with_proxy_cache(2)).unwrap();
    let proxies: Vec<_> = (0..5).map(|_| pool.create_ref()).collect();
    for proxy in proxies {
        pool.release_ref(proxy).unwrap();
    }
    for _ in 0..5 {
        let _ = pool.create_ref();
    }
    let stats = pool.stats();
    assert_eq!(stats.proxies_recycled, 2);
    assert_eq!(stats.proxies_allocated, 8);
}

#[test]
fn interning_creates_one_record_per_key() {
    let rec = IntRecord::new();
    let pool = Mutex::new(Pool::new(rec.layout.clone()).unwrap());
    let ids = CanonicalIds::new();

    let per_thread: Vec<Vec<u64>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    (0..50i32)
                        .map(|key| {
                            ids.intern_with(key, || {
                                let mut pool = pool.lock().unwrap();
                                let mut p = pool.create_ref();
                                pool.create(&mut p).unwrap();
                                rec.value.set_quiet(&mut *pool, &p, key);
                                let id = pool.get_id(&p);
                                pool.release_ref(p).unwrap();
                                id
                            })
                        })
                        .collect::<Vec<u64>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(per_thread.windows(2).all(|w| w[0] == w[1]));
    let pool = pool.into_inner().unwrap();
    assert_eq!(pool.len(), 50);
    assert_eq!(per_thread[0].iter().collect::<HashSet<_>>().len(), 50);

    let mut p = pool.proxy();
    for key in 0..50i32 {
        let id = ids.get(&key).unwrap();
        pool.get_object(id, &mut p).unwrap();
        assert_eq!(rec.value.get(&pool, &p), key);
    }
}
