//! Flyweight record handles.

use std::fmt;

use stride_core::PoolId;

/// Reusable, repointable handle to one record of one pool.
///
/// A proxy is just `(owning pool, current index)`. It holds no reference
/// to storage, so pool growth can never leave it dangling, and it never
/// keeps a record alive: the pool's liveness bookkeeping is authoritative.
/// Several proxies may address the same index; all of them observe the
/// same bytes.
///
/// Proxies are obtained from [`Pool::proxy`](crate::Pool::proxy) or the
/// recycling queue ([`Pool::create_ref`](crate::Pool::create_ref)) and are
/// repointed by [`Pool::create`](crate::Pool::create) and
/// [`Pool::get_object`](crate::Pool::get_object).
#[derive(PartialEq, Eq, Hash)]
pub struct Proxy {
    owner: PoolId,
    index: u64,
}

impl Proxy {
    /// Index of an unbound proxy.
    pub const UNBOUND: u64 = u64::MAX;

    pub(crate) fn unbound(owner: PoolId) -> Self {
        Self {
            owner,
            index: Self::UNBOUND,
        }
    }

    /// Record index this proxy currently addresses.
    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Pool that created this proxy.
    #[inline]
    pub fn owner(&self) -> PoolId {
        self.owner
    }

    /// Whether the proxy has been pointed at a record.
    pub fn is_bound(&self) -> bool {
        self.index != Self::UNBOUND
    }

    #[inline]
    pub(crate) fn point_at(&mut self, index: u64) {
        self.index = index;
    }

    pub(crate) fn unbind(&mut self) {
        self.index = Self::UNBOUND;
    }
}

impl fmt::Debug for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bound() {
            write!(f, "Proxy({}@{})", self.index, self.owner)
        } else {
            write!(f, "Proxy(unbound@{})", self.owner)
        }
    }
}
