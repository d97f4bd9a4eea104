//! # Arena Allocator
//!
//! A bump allocator for frame-lived values that are released all at once.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Handle to a value allocated in an [`Arena`].
///
/// A handle is an index tagged with the generation of the arena that issued
/// it. Resetting the arena starts a new generation, so a handle kept past a
/// reset no longer resolves.
pub struct Handle<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// Returns the slot index inside the arena.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Returns the arena generation this handle belongs to.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}@{})", self.index, self.generation)
    }
}

/// A bump arena of `T` values.
///
/// Allocation appends to retained storage. Values are never freed one by
/// one; [`Arena::reset`] drops them all and rewinds to zero while keeping the
/// backing buffer, so steady-state frames do not touch the allocator.
///
/// # Thread Safety
///
/// This arena is NOT thread-safe. Use one arena per thread.
///
/// # Example
///
/// ```rust
/// use ephemera_core::Arena;
///
/// let mut arena: Arena<&str> = Arena::new(16);
/// let first = arena.alloc("first");
/// assert_eq!(arena[first], "first");
///
/// arena.reset();
/// assert_eq!(arena.used(), 0);
/// assert!(arena.get(first).is_none());
/// ```
pub struct Arena<T> {
    /// Live values of the current generation.
    storage: Vec<T>,
    /// Bumped on every reset.
    generation: u32,
    /// Largest number of values held by any generation so far.
    high_water: usize,
}

impl<T> Arena<T> {
    /// Creates a new arena with room for `capacity` values.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of values reserved up front
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
            generation: 0,
            high_water: 0,
        }
    }

    /// Returns the reserved capacity in values.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Returns the number of values allocated in this generation.
    #[inline]
    #[must_use]
    pub fn used(&self) -> usize {
        self.storage.len()
    }

    /// Returns how many more values fit before the storage has to grow.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.used()
    }

    /// Returns true if nothing has been allocated in this generation.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Returns the current generation.
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Returns the largest generation size seen so far.
    #[inline]
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water.max(self.storage.len())
    }

    /// Allocates a value and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if a single generation exceeds `u32::MAX` values.
    pub fn alloc(&mut self, value: T) -> Handle<T> {
        let Ok(index) = u32::try_from(self.storage.len()) else {
            panic!("arena generation {} exceeded u32::MAX values", self.generation);
        };
        self.storage.push(value);
        Handle {
            index,
            generation: self.generation,
            _marker: PhantomData,
        }
    }

    /// Returns true if the handle resolves in the current generation.
    #[inline]
    #[must_use]
    pub fn contains(&self, handle: Handle<T>) -> bool {
        handle.generation == self.generation && handle.index() < self.storage.len()
    }

    /// Gets a reference to an allocated value.
    ///
    /// Returns `None` for handles from another generation.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        if handle.generation != self.generation {
            return None;
        }
        self.storage.get(handle.index())
    }

    /// Gets a mutable reference to an allocated value.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        if handle.generation != self.generation {
            return None;
        }
        self.storage.get_mut(handle.index())
    }

    /// Iterates over the values of the current generation in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        let generation = self.generation;
        self.storage.iter().enumerate().map(move |(index, value)| {
            // `alloc` never lets the length pass u32::MAX.
            #[allow(clippy::cast_possible_truncation)]
            let index = index as u32;
            let handle = Handle {
                index,
                generation,
                _marker: PhantomData,
            };
            (handle, value)
        })
    }

    /// Resets the arena, invalidating every handle issued so far.
    ///
    /// Values are dropped but the backing buffer is kept, so the next
    /// generation allocates into already reserved memory.
    pub fn reset(&mut self) {
        self.high_water = self.high_water.max(self.storage.len());
        self.storage.clear();
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<T> Index<Handle<T>> for Arena<T> {
    type Output = T;

    fn index(&self, handle: Handle<T>) -> &T {
        match self.get(handle) {
            Some(value) => value,
            None => panic!(
                "stale arena handle {handle:?} (current generation {})",
                self.generation
            ),
        }
    }
}

impl<T> IndexMut<Handle<T>> for Arena<T> {
    fn index_mut(&mut self, handle: Handle<T>) -> &mut T {
        let generation = self.generation;
        match self.get_mut(handle) {
            Some(value) => value,
            None => panic!("stale arena handle {handle:?} (current generation {generation})"),
        }
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new(0)
    }
}
