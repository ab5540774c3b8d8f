//! Building big-endian test data

use gufont_types::Scalar;

/// Bytes assembled from big-endian scalars, in the builder style the table
/// tests use.
#[derive(Debug, Clone, Default)]
pub struct BeBuffer {
    data: Vec<u8>,
}

impl BeBuffer {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Append one scalar.
    pub fn push(mut self, item: impl Scalar) -> Self {
        self.data.extend(item.to_raw().as_ref());
        self
    }

    /// Append every scalar of `iter`.
    pub fn extend<T: Scalar>(self, iter: impl IntoIterator<Item = T>) -> Self {
        iter.into_iter().fold(self, |buf, item| buf.push(item))
    }

    /// Append raw bytes.
    pub fn extend_bytes(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    /// Pad with zeros up to a multiple of `align`.
    pub fn align_to(mut self, align: usize) -> Self {
        let padded = self.data.len().next_multiple_of(align);
        self.data.resize(padded, 0);
        self
    }
}

impl std::ops::Deref for BeBuffer {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

/// Build a [`BeBuffer`] from a comma separated list of scalars.
///
/// Bracketed groups are written element by element:
///
/// ```
/// # use gufont_test_data::be_buffer;
/// let buf = be_buffer! { 1u16, [2u8, 3], 4i16 };
/// assert_eq!(buf.as_slice(), &[0, 1, 2, 3, 0, 4]);
/// ```
#[macro_export]
macro_rules! be_buffer {
    () => {
        $crate::bebuffer::BeBuffer::new()
    };
    ($($tokens:tt)+) => {{
        let buf = $crate::bebuffer::BeBuffer::new();
        $crate::be_buffer_add!(buf, $($tokens)+)
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! be_buffer_add {
    ($buf:ident $(,)?) => {
        $buf
    };
    ($buf:ident, [$($item:expr),* $(,)?] $(, $($rest:tt)*)?) => {{
        let $buf = $buf.extend([$($item),*]);
        $crate::be_buffer_add!($buf, $($($rest)*)?)
    }};
    ($buf:ident, $item:expr $(, $($rest:tt)*)?) => {{
        let $buf = $buf.push($item);
        $crate::be_buffer_add!($buf, $($($rest)*)?)
    }};
}

#[cfg(test)]
mod tests {
    use super::BeBuffer;

    #[test]
    fn padding() {
        let buf = BeBuffer::new().push(1u16).push(7i8).align_to(4);
        assert_eq!(buf.as_slice(), &[0, 1, 7, 0]);
        assert_eq!(buf.align_to(4).len(), 4);
    }

    #[test]
    fn macro_groups() {
        let buf = be_buffer! {
            4_u16,
            [1u8, 2, 3],
            -2_i16,
        };
        assert_eq!(buf.as_slice(), &[0, 4, 1, 2, 3, 0xff, 0xfe]);
        assert_eq!(be_buffer!().len(), 0);
    }
}
