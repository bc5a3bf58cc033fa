// Fixed-capacity entity slots with the worker handle for each occupant.

use crate::domain::{Interceptor, Threat};
use tokio::task::JoinHandle;

/// An entity record that can live in a pool slot.
pub trait PoolEntry {
    fn id(&self) -> u64;
    fn is_active(&self) -> bool;
}

impl PoolEntry for Threat {
    fn id(&self) -> u64 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.alive
    }
}

impl PoolEntry for Interceptor {
    fn id(&self) -> u64 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.alive
    }
}

#[derive(Debug)]
struct Slot<T> {
    entry: Option<T>,
    worker: Option<JoinHandle<()>>,
}

impl<T: PoolEntry> Slot<T> {
    // Reusable once the occupant is inactive and its worker has exited.
    fn is_free(&self) -> bool {
        let idle = self.entry.as_ref().is_none_or(|e| !e.is_active());
        idle && self.worker.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

/// Bounded pool of entity records. Always accessed under its owning domain lock.
#[derive(Debug)]
pub struct EntityPool<T> {
    slots: Vec<Slot<T>>,
    // Workers started for this pool that have not exited yet.
    active_workers: usize,
}

impl<T: PoolEntry> EntityPool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| Slot {
                entry: None,
                worker: None,
            })
            .collect();
        Self {
            slots,
            active_workers: 0,
        }
    }

    pub fn active_workers(&self) -> usize {
        self.active_workers
    }

    pub fn free_slot(&self) -> Option<usize> {
        if self.active_workers >= self.slots.len() {
            return None;
        }
        self.slots.iter().position(Slot::is_free)
    }

    /// Places a new occupant and counts its (about to start) worker as active.
    pub fn occupy(&mut self, index: usize, entry: T) {
        let slot = &mut self.slots[index];
        slot.entry = Some(entry);
        slot.worker = None;
        self.active_workers += 1;
    }

    pub fn attach_worker(&mut self, index: usize, handle: JoinHandle<()>) {
        self.slots[index].worker = Some(handle);
    }

    /// Undoes `occupy` when the worker could not be started.
    pub fn rollback(&mut self, index: usize) {
        let slot = &mut self.slots[index];
        slot.entry = None;
        slot.worker = None;
        self.active_workers = self.active_workers.saturating_sub(1);
    }

    /// Called exactly once by each worker on its way out.
    pub fn worker_exited(&mut self) {
        self.active_workers = self.active_workers.saturating_sub(1);
    }

    /// The occupant of `index`, provided it is still the entity with `id`.
    pub fn get_mut(&mut self, index: usize, id: u64) -> Option<&mut T> {
        self.slots
            .get_mut(index)
            .and_then(|slot| slot.entry.as_mut())
            .filter(|entry| entry.id() == id)
    }

    pub fn get(&self, index: usize, id: u64) -> Option<&T> {
        self.slots
            .get(index)
            .and_then(|slot| slot.entry.as_ref())
            .filter(|entry| entry.id() == id)
    }

    pub fn active(&self) -> impl Iterator<Item = &T> {
        self.slots
            .iter()
            .filter_map(|slot| slot.entry.as_ref())
            .filter(|entry| entry.is_active())
    }

    /// Active occupants with their slot index, for id-checked access later.
    pub fn active_slots(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.entry.as_ref().map(|entry| (index, entry)))
            .filter(|(_, entry)| entry.is_active())
    }

    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots
            .iter_mut()
            .filter_map(|slot| slot.entry.as_mut())
            .filter(|entry| entry.is_active())
    }

    /// Takes the handles of workers that are still running. Finished ones are left behind,
    /// so a handle is never handed out twice.
    pub fn take_live_workers(&mut self) -> Vec<JoinHandle<()>> {
        self.slots
            .iter_mut()
            .filter(|slot| slot.worker.as_ref().is_some_and(|h| !h.is_finished()))
            .filter_map(|slot| slot.worker.take())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Position;

    #[test]
    fn retired_slot_without_worker_is_reused() {
        let mut pool = EntityPool::with_capacity(2);
        pool.occupy(0, Threat::new(1, Position::new(0, 0)));
        assert_eq!(pool.free_slot(), Some(1));

        assert!(pool.get_mut(0, 1).is_some_and(Threat::try_ground));
        pool.worker_exited();
        assert_eq!(pool.free_slot(), Some(0));
    }

    #[test]
    fn stale_id_does_not_reach_new_occupant() {
        let mut pool = EntityPool::with_capacity(1);
        pool.occupy(0, Threat::new(1, Position::new(0, 0)));
        assert!(pool.get_mut(0, 1).is_some_and(Threat::try_destroy));
        pool.worker_exited();
        pool.occupy(0, Threat::new(2, Position::new(3, 3)));

        assert!(pool.get_mut(0, 1).is_none());
        assert_eq!(pool.get(0, 2).map(|t| t.position), Some(Position::new(3, 3)));
    }

    #[test]
    fn rollback_frees_slot_and_worker_count() {
        let mut pool = EntityPool::with_capacity(1);
        pool.occupy(0, Threat::new(1, Position::new(0, 0)));
        assert_eq!(pool.free_slot(), None);
        pool.rollback(0);
        assert_eq!(pool.active_workers(), 0);
        assert_eq!(pool.free_slot(), Some(0));
        assert_eq!(pool.active().count(), 0);
    }

    #[tokio::test]
    async fn slot_waits_for_running_worker() {
        let mut pool = EntityPool::with_capacity(1);
        pool.occupy(0, Threat::new(1, Position::new(0, 0)));
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        pool.attach_worker(
            0,
            tokio::spawn(async move {
                let _ = release_rx.await;
            }),
        );
        assert!(pool.get_mut(0, 1).is_some_and(Threat::try_destroy));
        pool.worker_exited();
        assert_eq!(pool.free_slot(), None);

        let _ = release_tx.send(());
        let handles = pool.take_live_workers();
        assert_eq!(handles.len(), 1);
        for handle in handles {
            handle.await.expect("worker should not panic");
        }
        assert!(pool.take_live_workers().is_empty());
    }
}
