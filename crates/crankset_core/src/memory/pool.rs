//! # Component Pool
//!
//! Fixed-capacity slot array with a liveness flag per slot.
//!
//! Slots are never freed back to the heap: deactivating a slot only clears
//! its flag, and the next allocation that lands on it overwrites the whole
//! record. A [`Handle`] is the slot index, so it stays meaningful across
//! reuse but says nothing about whether the slot is still live.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::ecs::Component;
use crate::error::PoolError;

/// Index of a slot in a [`ComponentPool<T>`].
///
/// The type parameter only ties the handle to the pool kind it came from; the
/// handle itself is a plain `u32`.
pub struct Handle<T> {
    index: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// Creates a handle from a raw slot index.
    ///
    /// Nothing checks that the index is in range; pool accessors do that.
    #[inline]
    #[must_use]
    pub const fn from_index(index: u32) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Returns the slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Returns the slot index as stored.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.index
    }
}

// Manual impls: derives would demand the same bounds from `T`.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Handle<T> {}

impl<T> PartialOrd for Handle<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Handle<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T: Component> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", T::NAME, self.index)
    }
}

/// A fixed-capacity pool of `T` records.
///
/// All memory is allocated by [`ComponentPool::new`]. Allocation scans for
/// the lowest inactive slot, so it is O(capacity); at console scale (tens of
/// slots) that is cheaper than maintaining a free list.
///
/// # Example
///
/// ```rust
/// use crankset_core::{ComponentPool, Resizer};
///
/// let mut pool: ComponentPool<Resizer> = ComponentPool::new(2);
/// let handle = pool.allocate(Resizer { size: 25.0 })?;
/// assert!(pool.is_active(handle));
///
/// pool.deactivate(handle)?;
/// assert_eq!(pool.active_count(), 0);
/// # Ok::<(), crankset_core::PoolError>(())
/// ```
pub struct ComponentPool<T: Component> {
    /// Slot records. Inactive slots keep stale values.
    slots: Box<[T]>,
    /// Liveness flag per slot.
    active: Box<[bool]>,
    /// Number of `true` entries in `active`.
    active_count: usize,
}

impl<T: Component> ComponentPool<T> {
    /// Creates a pool with `capacity` inactive slots.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero or exceeds `u32::MAX`. Configuration
    /// validation rejects both before a pool is built.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        assert!(
            u32::try_from(capacity).is_ok(),
            "Capacity cannot exceed u32::MAX"
        );

        let slots: Vec<T> = (0..capacity).map(|_| T::default()).collect();

        Self {
            slots: slots.into_boxed_slice(),
            active: vec![false; capacity].into_boxed_slice(),
            active_count: 0,
        }
    }

    /// Returns the total number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of active slots.
    #[inline]
    #[must_use]
    pub const fn active_count(&self) -> usize {
        self.active_count
    }

    /// Returns the number of inactive slots.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.capacity() - self.active_count
    }

    /// Returns `true` when no slot is free.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.active_count == self.capacity()
    }

    /// Writes `initial` into the lowest inactive slot and activates it.
    ///
    /// # Errors
    ///
    /// [`PoolError::PoolExhausted`] when every slot is active. The pool is
    /// left untouched in that case.
    pub fn allocate(&mut self, initial: T) -> Result<Handle<T>, PoolError> {
        let Some(handle) = self.first_free() else {
            return Err(PoolError::PoolExhausted {
                pool: T::NAME,
                capacity: self.capacity(),
            });
        };

        let index = handle.index();
        self.slots[index] = initial;
        self.active[index] = true;
        self.active_count += 1;

        Ok(handle)
    }

    /// Clears the liveness flag of a slot. The record itself is not touched.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidHandle`] if the handle is out of range or the slot
    /// is already inactive.
    pub fn deactivate(&mut self, handle: Handle<T>) -> Result<(), PoolError> {
        if !self.is_active(handle) {
            return Err(self.invalid(handle));
        }

        self.active[handle.index()] = false;
        self.active_count -= 1;
        Ok(())
    }

    /// Returns `true` if the handle is in range and its slot is active.
    #[inline]
    #[must_use]
    pub fn is_active(&self, handle: Handle<T>) -> bool {
        self.active.get(handle.index()).copied().unwrap_or(false)
    }

    /// Gets the record in a slot, live or not.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidHandle`] if the handle is out of range.
    #[inline]
    pub fn get(&self, handle: Handle<T>) -> Result<&T, PoolError> {
        self.slots.get(handle.index()).ok_or_else(|| self.invalid(handle))
    }

    /// Gets the record in a slot mutably, live or not.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidHandle`] if the handle is out of range.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle<T>) -> Result<&mut T, PoolError> {
        let error = self.invalid(handle);
        self.slots.get_mut(handle.index()).ok_or(error)
    }

    /// Gets the record only if the slot is active.
    #[inline]
    #[must_use]
    pub fn get_active(&self, handle: Handle<T>) -> Option<&T> {
        if self.is_active(handle) {
            self.slots.get(handle.index())
        } else {
            None
        }
    }

    /// Gets the record mutably only if the slot is active.
    #[inline]
    pub fn get_active_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        if self.is_active(handle) {
            self.slots.get_mut(handle.index())
        } else {
            None
        }
    }

    /// Returns the lowest active slot.
    #[must_use]
    pub fn first_active(&self) -> Option<Handle<T>> {
        self.active_handles().next()
    }

    /// Returns the slot the next [`allocate`](Self::allocate) will use.
    #[must_use]
    pub fn first_free(&self) -> Option<Handle<T>> {
        self.active
            .iter()
            .position(|&live| !live)
            .map(Self::handle_at)
    }

    /// Lazily yields the handles of active slots in ascending index order.
    ///
    /// Each call starts a fresh scan from slot 0.
    pub fn active_handles(&self) -> ActiveHandles<'_, T> {
        ActiveHandles {
            flags: self.active.iter().enumerate(),
            _marker: PhantomData,
        }
    }

    /// Calls `f` for every active slot, ascending.
    pub fn for_each_active<F>(&self, mut f: F)
    where
        F: FnMut(Handle<T>, &T),
    {
        for (handle, record) in self.iter_active() {
            f(handle, record);
        }
    }

    /// Calls `f` for every active slot with mutable access, ascending.
    pub fn for_each_active_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(Handle<T>, &mut T),
    {
        for (handle, record) in self.iter_active_mut() {
            f(handle, record);
        }
    }

    /// Iterates over active records with their handles.
    pub fn iter_active(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        self.slots
            .iter()
            .zip(self.active.iter())
            .enumerate()
            .filter(|&(_, (_, &live))| live)
            .map(|(index, (record, _))| (Self::handle_at(index), record))
    }

    /// Iterates mutably over active records with their handles.
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (Handle<T>, &mut T)> {
        self.slots
            .iter_mut()
            .zip(self.active.iter())
            .enumerate()
            .filter(|&(_, (_, &live))| live)
            .map(|(index, (record, _))| (Self::handle_at(index), record))
    }

    /// Deactivates every slot. Records keep their stale values.
    pub fn clear(&mut self) {
        self.active.fill(false);
        self.active_count = 0;
    }

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn handle_at(index: usize) -> Handle<T> {
        // Capacity is bounded by u32::MAX in `new`.
        Handle::from_index(index as u32)
    }

    fn invalid(&self, handle: Handle<T>) -> PoolError {
        PoolError::InvalidHandle {
            pool: T::NAME,
            index: handle.index(),
            capacity: self.capacity(),
        }
    }
}

/// Lazy scan over a pool's liveness flags. See [`ComponentPool::active_handles`].
pub struct ActiveHandles<'a, T> {
    flags: std::iter::Enumerate<std::slice::Iter<'a, bool>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Component> Iterator for ActiveHandles<'_, T> {
    type Item = Handle<T>;

    fn next(&mut self) -> Option<Handle<T>> {
        self.flags
            .by_ref()
            .find(|&(_, &live)| live)
            .map(|(index, _)| ComponentPool::<T>::handle_at(index))
    }
}
