//! Property tests: record ids stay stable under arbitrary create/delete
//! sequences, and field values survive every growth step.

use std::collections::BTreeMap;

use proptest::prelude::*;
use stride_pool::{Pool, PoolConfig};
use stride_storage::StorageKind;
use stride_test_utils::fixtures::IntRecord;

#[derive(Clone, Debug)]
enum Op {
    Create(i32),
    Delete(usize),
    Write(usize, i32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i32>().prop_map(Op::Create),
        1 => any::<usize>().prop_map(Op::Delete),
        1 => (any::<usize>(), any::<i32>()).prop_map(|(i, v)| Op::Write(i, v)),
    ]
}

fn storage_kind() -> impl Strategy<Value = StorageKind> {
    prop_oneof![
        Just(StorageKind::Heap),
        Just(StorageKind::Mapped),
        (1u64..9).prop_map(|elements_per_array| StorageKind::MultiArray { elements_per_array }),
    ]
}

proptest! {
    #[test]
    fn pool_matches_model(
        kind in storage_kind(),
        initial in 1u64..6,
        ops in prop::collection::vec(op(), 1..200),
    ) {
        let rec = IntRecord::new();
        let config = PoolConfig::new().with_initial_capacity(initial).with_storage(kind);
        let mut pool = Pool::with_config(rec.layout.clone(), config).unwrap();
        let mut model: BTreeMap<u64, i32> = BTreeMap::new();
        let mut p = pool.create_ref();

        for op in ops {
            match op {
                Op::Create(v) => {
                    pool.create(&mut p).unwrap();
                    let id = pool.get_id(&p);
                    prop_assert!(!model.contains_key(&id));
                    rec.value.set_quiet(&mut pool, &p, v);
                    model.insert(id, v);
                }
                Op::Delete(pick) if !model.is_empty() => {
                    let id = *model.keys().nth(pick % model.len()).unwrap();
                    pool.delete_id(id).unwrap();
                    model.remove(&id);
                    prop_assert!(!pool.is_live(id));
                }
                Op::Write(pick, v) if !model.is_empty() => {
                    let id = *model.keys().nth(pick % model.len()).unwrap();
                    pool.get_object(id, &mut p).unwrap();
                    rec.value.set(&mut pool, &p, v);
                    model.insert(id, v);
                }
                _ => {}
            }
        }

        prop_assert_eq!(pool.len(), model.len() as u64);
        prop_assert_eq!(pool.iter().collect::<Vec<_>>(), model.keys().copied().collect::<Vec<_>>());
        for (&id, &v) in &model {
            pool.get_object(id, &mut p).unwrap();
            prop_assert_eq!(rec.value.get(&pool, &p), v);
        }
        let stats = pool.stats();
        prop_assert_eq!(stats.live + stats.free, stats.high_water_mark);
        prop_assert!(stats.capacity >= stats.high_water_mark);
    }
}
