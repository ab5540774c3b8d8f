//! Arrays of big-endian scalars

use std::marker::PhantomData;

use types::Scalar;

/// A borrowed array of big-endian scalars.
///
/// Elements are decoded on access.
pub struct BeArray<'a, T> {
    bytes: &'a [u8],
    phantom: PhantomData<T>,
}

// manual impls so that `T` doesn't need to be `Clone`
impl<T> Clone for BeArray<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BeArray<'_, T> {}

impl<'a, T: Scalar> BeArray<'a, T> {
    /// Wrap `bytes`, which must have a length that is a multiple of the
    /// element size.
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        debug_assert_eq!(bytes.len() % T::RAW_BYTE_LEN, 0);
        BeArray {
            bytes,
            phantom: PhantomData,
        }
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.bytes.len() / T::RAW_BYTE_LEN
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The element at `idx`, if it exists.
    pub fn get(&self, idx: usize) -> Option<T> {
        let start = idx.checked_mul(T::RAW_BYTE_LEN)?;
        self.bytes.get(start..).and_then(T::read)
    }

    /// The last element, if the array is not empty.
    pub fn last(&self) -> Option<T> {
        self.len().checked_sub(1).and_then(|idx| self.get(idx))
    }

    /// Iterate over the decoded elements.
    pub fn iter(&self) -> impl Iterator<Item = T> + 'a
    where
        T: 'a,
    {
        self.bytes.chunks_exact(T::RAW_BYTE_LEN).filter_map(T::read)
    }
}

impl<T: Scalar + std::fmt::Debug> std::fmt::Debug for BeArray<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
