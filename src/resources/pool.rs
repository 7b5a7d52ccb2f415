//! Object pool for short-lived, frequently recycled values.
//!
//! [`Pool`] keeps freed objects around so the next [`Pool::obtain`] can reuse
//! them instead of building a new one. Every object is [`Poolable::reset`]
//! on its way back into the pool, so an obtained object always starts from a
//! clean state.
//!
//! The pool does not track objects that are handed out; callers own them
//! until they give them back with [`Pool::free`].

/// Objects that can be recycled by a [`Pool`].
pub trait Poolable {
    /// Restore the object to its freshly-created state.
    fn reset(&mut self);
}

/// A pool of reusable objects.
///
/// At most `max` free objects are retained; extra objects passed to
/// [`Pool::free`] are dropped.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    free_objects: Vec<T>,
    max: usize,
    peak: usize,
}

impl<T: Poolable + Default> Default for Pool<T> {
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}

impl<T: Poolable + Default> Pool<T> {
    /// Creates an empty pool retaining at most `max` free objects.
    pub fn new(max: usize) -> Self {
        Self {
            free_objects: Vec::new(),
            max,
            peak: 0,
        }
    }

    /// Takes a free object, or creates a new one when the pool is empty.
    pub fn obtain(&mut self) -> T {
        self.free_objects.pop().unwrap_or_default()
    }

    /// Resets `object` and puts it back, unless the pool is already full.
    pub fn free(&mut self, mut object: T) {
        if self.free_objects.len() >= self.max {
            return;
        }
        object.reset();
        self.free_objects.push(object);
        self.peak = self.peak.max(self.free_objects.len());
    }

    /// Number of objects ready to be obtained.
    pub fn free_count(&self) -> usize {
        self.free_objects.len()
    }

    /// Largest number of free objects the pool has held at once.
    pub fn peak(&self) -> usize {
        self.peak
    }

    /// Maximum number of free objects retained.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Drops every free object.
    pub fn clear(&mut self) {
        self.free_objects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, Debug)]
    struct Counter {
        value: u32,
        resets: u32,
    }

    impl Poolable for Counter {
        fn reset(&mut self) {
            self.value = 0;
            self.resets += 1;
        }
    }

    #[test]
    fn test_obtain_from_empty_pool_creates_default() {
        let mut pool: Pool<Counter> = Pool::default();
        let c = pool.obtain();
        assert_eq!(c.value, 0);
        assert_eq!(c.resets, 0);
        assert_eq!(pool.free_count(), 0);
    }

    #[test]
    fn test_free_resets_and_recycles() {
        let mut pool: Pool<Counter> = Pool::default();
        let mut c = pool.obtain();
        c.value = 42;
        pool.free(c);
        assert_eq!(pool.free_count(), 1);

        let c = pool.obtain();
        assert_eq!(c.value, 0);
        assert_eq!(c.resets, 1);
        assert_eq!(pool.free_count(), 0);
    }

    #[test]
    fn test_free_beyond_max_drops_object() {
        let mut pool: Pool<Counter> = Pool::new(2);
        pool.free(Counter::default());
        pool.free(Counter::default());
        pool.free(Counter::default());
        assert_eq!(pool.free_count(), 2);
        assert_eq!(pool.peak(), 2);
        assert_eq!(pool.max(), 2);
    }

    #[test]
    fn test_peak_tracks_high_water_mark() {
        let mut pool: Pool<Counter> = Pool::default();
        pool.free(Counter::default());
        pool.free(Counter::default());
        pool.free(Counter::default());
        let _a = pool.obtain();
        let _b = pool.obtain();
        assert_eq!(pool.free_count(), 1);
        assert_eq!(pool.peak(), 3);
        pool.clear();
        assert_eq!(pool.free_count(), 0);
    }
}
