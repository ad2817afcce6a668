use std::iter::{Fuse, FusedIterator};

/// Splitting iterators into batches.
///
/// Every batch holds `size` items except the last, which holds whatever is left. An empty
/// iterator produces no batches, and a `size` of zero puts everything into a single batch.
pub trait IteratorExtension: Iterator + Sized {
    /// Lazily groups the items into batches.
    fn yielded_batch(self, size: usize) -> Batches<Self, fn(&[Self::Item])> {
        let ignore: fn(&[Self::Item]) = |_| ();
        self.yielded_batch_with(size, ignore)
    }

    /// Lazily groups the items into batches, calling `op` on each batch just before it is yielded.
    /// Batches that are never pulled from the iterator are never passed to `op`.
    fn yielded_batch_with<F>(self, size: usize, op: F) -> Batches<Self, F>
    where
        F: FnMut(&[Self::Item]),
    {
        Batches {
            inner: self.fuse(),
            size,
            op,
        }
    }

    /// Groups all of the items into batches immediately.
    fn immediate_batch(self, size: usize) -> Vec<Vec<Self::Item>> {
        self.yielded_batch(size).collect()
    }

    /// Groups all of the items into batches immediately, calling `op` on each of them in order.
    fn immediate_batch_with<F>(self, size: usize, op: F) -> Vec<Vec<Self::Item>>
    where
        F: FnMut(&[Self::Item]),
    {
        self.yielded_batch_with(size, op).collect()
    }
}

impl<I: Iterator> IteratorExtension for I {}

/// The iterator returned by [`IteratorExtension::yielded_batch`] and
/// [`yielded_batch_with`](IteratorExtension::yielded_batch_with).
#[derive(Debug, Clone)]
pub struct Batches<I: Iterator, F> {
    inner: Fuse<I>,
    size: usize,
    op: F,
}

impl<I: Iterator, F: FnMut(&[I::Item])> Iterator for Batches<I, F> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Vec<I::Item>> {
        let batch: Vec<I::Item> = match self.size {
            0 => self.inner.by_ref().collect(),
            size => self.inner.by_ref().take(size).collect(),
        };

        if batch.is_empty() {
            return None;
        }
        (self.op)(&batch);
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.inner.size_hint();
        match self.size {
            0 => (lower.min(1), upper.map(|upper| upper.min(1))),
            size => (lower.div_ceil(size), upper.map(|upper| upper.div_ceil(size))),
        }
    }
}

impl<I: Iterator, F: FnMut(&[I::Item])> FusedIterator for Batches<I, F> {}
