//! Benchmark profiles for the stride record pools.
//!
//! - [`particle_pool`]: a pool pre-filled with particles on a chosen backend
//! - [`churn_schedule`]: deterministic create/delete pattern
//! - [`ParticleFields`]: the accessors matching [`particle_layout`]

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use stride_core::{Layout, LayoutBuilder};
use stride_pool::{Attribute, Pool, PoolConfig, PoolError, PointAttribute};
use stride_storage::StorageKind;

/// Accessors for the benchmark particle record.
#[derive(Clone, Copy, Debug)]
pub struct ParticleFields {
    /// 3-D position.
    pub pos: PointAttribute,
    /// Scalar mass.
    pub mass: Attribute<f32>,
}

/// Particle layout: `pos: [f64; 3]`, `mass: f32`. 28 bytes per record.
pub fn particle_layout() -> Result<(Layout, ParticleFields), PoolError> {
    let mut b = LayoutBuilder::new();
    let pos = PointAttribute::new(b.array::<f64>("pos", 3));
    let mass = Attribute::new(b.scalar::<f32>("mass"));
    Ok((b.build()?, ParticleFields { pos, mass }))
}

/// Pool of `n` particles on `storage`, positions along the x axis.
pub fn particle_pool(n: u64, storage: StorageKind) -> Result<(Pool, ParticleFields), PoolError> {
    let (layout, fields) = particle_layout()?;
    let config = PoolConfig::new()
        .with_initial_capacity(n.max(1))
        .with_storage(storage)
        .with_validation(false);
    let mut pool = Pool::with_config(layout, config)?;
    let mut p = pool.create_ref();
    for i in 0..n {
        pool.create(&mut p)?;
        fields.pos.set_position_quiet(&mut pool, &p, &[i as f64, 0.0, 0.0]);
        fields.mass.set_quiet(&mut pool, &p, 1.0);
    }
    Ok((pool, fields))
}

/// Deterministic delete pattern over `0..n`: roughly one id in `every`,
/// spread by a fixed LCG seeded with `seed`. Ids are unique and ascending.
pub fn churn_schedule(n: u64, every: u64, seed: u64) -> Vec<u64> {
    let mut ids: Vec<u64> = (0..n)
        .filter(|&i| {
            let h = seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add(i.wrapping_mul(1442695040888963407));
            (h >> 33) % every.max(1) == 0
        })
        .collect();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_pool_is_populated() {
        let (pool, fields) = particle_pool(100, StorageKind::Heap).unwrap();
        assert_eq!(pool.len(), 100);
        let mut p = pool.proxy();
        pool.get_object(42, &mut p).unwrap();
        assert_eq!(fields.pos.coordinate(&pool, &p, 0), 42.0);
        assert_eq!(fields.mass.get(&pool, &p), 1.0);
    }

    #[test]
    fn particle_layout_size() {
        let (layout, _) = particle_layout().unwrap();
        assert_eq!(layout.record_size(), 28);
    }

    #[test]
    fn churn_schedule_deterministic_and_in_range() {
        let a = churn_schedule(1000, 4, 42);
        let b = churn_schedule(1000, 4, 42);
        assert_eq!(a, b);
        assert!(!a.is_empty());
        assert!(a.windows(2).all(|w| w[0] < w[1]));
        assert!(a.iter().all(|&id| id < 1000));
    }
}
