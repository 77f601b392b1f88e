//! Positional reuse of external decoration objects across refreshes.
//!
//! Slot `i` of a pool always backs the `i`-th item of the latest refresh. When
//! fewer items are needed the surplus is retired: destroyed, or only hidden so
//! that state the host attached to it survives. Hidden objects are revived
//! before new ones are created.

/// What to do with objects a refresh no longer needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum RetirePolicy {
    /// Interactive/editable contexts: hand surplus objects back to the host.
    #[default]
    Destroy,
    /// Keep surplus objects alive but invisible.
    Hide,
}

/// A host object that can be shown or hidden.
pub trait Decoration {
    fn set_visible(&mut self, visible: bool);
}

/// Creates and destroys pooled objects on behalf of a pool.
pub trait Factory<T> {
    fn create(&mut self, slot: usize) -> T;

    fn destroy(&mut self, obj: T) {
        drop(obj);
    }
}

struct FnFactory<C, D> {
    create: C,
    destroy: D,
}

impl<T, C: FnMut(usize) -> T, D: FnMut(T)> Factory<T> for FnFactory<C, D> {
    fn create(&mut self, slot: usize) -> T {
        (self.create)(slot)
    }

    fn destroy(&mut self, obj: T) {
        (self.destroy)(obj)
    }
}

/// Counts of what one `sync` did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolDelta {
    pub reused: usize,
    pub revived: usize,
    pub created: usize,
    pub retired: usize,
}

impl PoolDelta {
    pub fn merge(&mut self, other: PoolDelta) {
        self.reused += other.reused;
        self.revived += other.revived;
        self.created += other.created;
        self.retired += other.retired;
    }

    #[inline]
    pub fn is_noop(&self) -> bool {
        self.revived == 0 && self.created == 0 && self.retired == 0
    }
}

/// Ordered pool; the first `active` objects are live, the rest are hidden.
#[derive(Debug)]
pub struct RenderObjectPool<T> {
    objects: Vec<T>,
    active: usize,
}

impl<T> Default for RenderObjectPool<T> {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            active: 0,
        }
    }
}

impl<T: Decoration> RenderObjectPool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live objects, in slot order.
    #[inline]
    pub fn active(&self) -> &[T] {
        &self.objects[..self.active]
    }

    #[inline]
    pub fn active_mut(&mut self) -> &mut [T] {
        &mut self.objects[..self.active]
    }

    /// Live plus hidden.
    #[inline]
    pub fn total(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.active
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Resize the live prefix to `required` slots.
    ///
    /// Slots `0..min(prev, required)` keep their objects; the caller restyles them.
    /// Missing slots are filled by reviving hidden objects, then by `create(slot)`.
    /// Surplus live slots are retired per `policy`; under `Destroy` hidden
    /// leftovers past `required` are destroyed too.
    pub fn sync(
        &mut self,
        required: usize,
        policy: RetirePolicy,
        create: impl FnMut(usize) -> T,
        destroy: impl FnMut(T),
    ) -> PoolDelta {
        self.sync_with(required, policy, &mut FnFactory { create, destroy })
    }

    /// `sync` with a single factory, for callers whose create and destroy share state.
    pub fn sync_with<F: Factory<T> + ?Sized>(
        &mut self,
        required: usize,
        policy: RetirePolicy,
        factory: &mut F,
    ) -> PoolDelta {
        let prev = self.active;
        let mut delta = PoolDelta {
            reused: prev.min(required),
            ..PoolDelta::default()
        };
        if required > prev {
            let revive_end = required.min(self.objects.len());
            for obj in &mut self.objects[prev..revive_end] {
                obj.set_visible(true);
                delta.revived += 1;
            }
            for slot in self.objects.len()..required {
                self.objects.push(factory.create(slot));
                delta.created += 1;
            }
        } else {
            delta.retired = prev - required;
            if policy == RetirePolicy::Hide {
                for obj in &mut self.objects[required..prev] {
                    obj.set_visible(false);
                }
            }
        }
        if policy == RetirePolicy::Destroy && self.objects.len() > required {
            for obj in self.objects.drain(required..) {
                factory.destroy(obj);
            }
        }
        self.active = required;
        delta
    }

    /// Retire everything.
    pub fn clear(&mut self, policy: RetirePolicy, destroy: impl FnMut(T)) -> PoolDelta {
        self.sync(0, policy, |_| unreachable!("clearing never creates"), destroy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Obj {
        id: usize,
        visible: bool,
        content: &'static str,
    }

    impl Decoration for Obj {
        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }
    }

    fn filled(n: usize) -> (RenderObjectPool<Obj>, usize) {
        let mut pool = RenderObjectPool::new();
        let mut next = 0;
        pool.sync(
            n,
            RetirePolicy::Destroy,
            |_| {
                next += 1;
                Obj {
                    id: next - 1,
                    visible: true,
                    content: "old",
                }
            },
            drop,
        );
        (pool, next)
    }

    #[test]
    fn shrink_destroys_surplus_and_keeps_indices() {
        let (mut pool, _) = filled(5);
        let mut destroyed = Vec::new();
        let d = pool.sync(3, RetirePolicy::Destroy, |_| unreachable!(), |o| destroyed.push(o.id));
        assert_eq!(d, PoolDelta { reused: 3, revived: 0, created: 0, retired: 2 });
        assert_eq!(destroyed, vec![3, 4]);
        let ids: Vec<usize> = pool.active().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(pool.total(), 3);
    }

    #[test]
    fn grow_creates_only_missing_and_overwrites_in_place() {
        let (mut pool, mut next) = filled(5);
        let d = pool.sync(
            7,
            RetirePolicy::Destroy,
            |slot| {
                next += 1;
                assert!(slot >= 5);
                Obj { id: next - 1, visible: true, content: "new" }
            },
            drop,
        );
        assert_eq!(d.created, 2);
        assert_eq!(d.reused, 5);
        for obj in pool.active_mut() {
            obj.content = "restyled";
        }
        let ids: Vec<usize> = pool.active().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5, 6]);
        assert!(pool.active().iter().all(|o| o.content == "restyled"));
    }

    #[test]
    fn hide_policy_keeps_objects_and_revives_them() {
        let (mut pool, _) = filled(5);
        let d = pool.sync(3, RetirePolicy::Hide, |_| unreachable!(), |_| panic!("hide must not destroy"));
        assert_eq!(d.retired, 2);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.total(), 5);
        let d = pool.sync(
            6,
            RetirePolicy::Hide,
            |slot| Obj { id: 100 + slot, visible: true, content: "new" },
            drop,
        );
        assert_eq!(d, PoolDelta { reused: 3, revived: 2, created: 1, retired: 0 });
        let ids: Vec<usize> = pool.active().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 105]);
        assert!(pool.active().iter().all(|o| o.visible));
    }

    #[test]
    fn clear_retires_everything() {
        let (mut pool, _) = filled(4);
        let mut n = 0;
        let d = pool.clear(RetirePolicy::Destroy, |_| n += 1);
        assert_eq!(d.retired, 4);
        assert_eq!(n, 4);
        assert!(pool.is_empty());
        assert!(d.reused == 0 && !d.is_noop());
    }

    #[test]
    fn factory_shares_state_between_create_and_destroy() {
        struct Ledger {
            live: Vec<usize>,
        }
        impl Factory<Obj> for Ledger {
            fn create(&mut self, slot: usize) -> Obj {
                self.live.push(slot);
                Obj { id: slot, visible: true, content: "new" }
            }
            fn destroy(&mut self, obj: Obj) {
                self.live.retain(|&id| id != obj.id);
            }
        }
        let mut ledger = Ledger { live: Vec::new() };
        let mut pool = RenderObjectPool::new();
        pool.sync_with(4, RetirePolicy::Destroy, &mut ledger);
        pool.sync_with(2, RetirePolicy::Destroy, &mut ledger);
        assert_eq!(ledger.live, vec![0, 1]);
        assert_eq!(pool.total(), 2);
    }
}
