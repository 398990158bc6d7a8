//! Byte buffer with bit-level addressing.
use std::fmt;

/// Fixed-length byte buffer addressed by global bit index.
///
/// Bit `i` lives in byte `i / 8`. Inside a byte, bits are numbered from the most significant one,
/// so bit `0` has value `0x80` and bit `7` has value `0x01`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct BitBuffer {
    bytes: Box<[u8]>,
}

impl BitBuffer {
    /// Create all-zero buffer of `len` bytes.
    pub(crate) fn zeroed(len: usize) -> Self {
        Self {
            bytes: vec![0; len].into_boxed_slice(),
        }
    }

    /// Take ownership of existing bytes.
    pub(crate) fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into_boxed_slice(),
        }
    }

    /// Number of bytes.
    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Number of addressable bits.
    pub(crate) fn bit_len(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Set bit `i` to 1.
    ///
    /// Panics if `i` is out of range.
    pub(crate) fn set(&mut self, i: usize) {
        self.bytes[i / 8] |= mask(i);
    }

    /// Check whether bit `i` is 1.
    ///
    /// Panics if `i` is out of range.
    pub(crate) fn get(&self, i: usize) -> bool {
        self.bytes[i / 8] & mask(i) != 0
    }

    /// Byte-wise OR of `other` into `self`. Both buffers must have the same length.
    pub(crate) fn or_assign(&mut self, other: &Self) {
        debug_assert_eq!(self.len(), other.len());
        for (a, b) in self.bytes.iter_mut().zip(other.bytes.iter()) {
            *a |= *b;
        }
    }

    /// Check if every bit set in `self` is also set in `other`. Both buffers must have the same
    /// length.
    pub(crate) fn is_covered_by(&self, other: &Self) -> bool {
        debug_assert_eq!(self.len(), other.len());
        self.bytes
            .iter()
            .zip(other.bytes.iter())
            .all(|(a, b)| a & b == *a)
    }

    /// Number of bits set to 1.
    pub(crate) fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Check if no bit is set.
    pub(crate) fn is_zero(&self) -> bool {
        self.bytes.iter().all(|b| *b == 0)
    }

    /// Reset all bits to 0.
    pub(crate) fn clear(&mut self) {
        self.bytes.fill(0);
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn into_vec(self) -> Vec<u8> {
        self.bytes.into_vec()
    }
}

fn mask(i: usize) -> u8 {
    0x80 >> (i % 8)
}

impl fmt::Debug for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitBuffer {{ len: {} }}", self.bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::BitBuffer;

    #[test]
    fn zeroed() {
        let b = BitBuffer::zeroed(4);
        assert_eq!(b.len(), 4);
        assert_eq!(b.bit_len(), 32);
        assert_eq!(b.as_bytes(), &[0, 0, 0, 0]);
        assert!(b.is_zero());
        assert_eq!(b.count_ones(), 0);
    }

    #[test]
    fn msb_first() {
        let mut b = BitBuffer::zeroed(4);
        b.set(29);
        assert_eq!(b.as_bytes(), &[0x00, 0x00, 0x00, 0x04]);

        let mut b = BitBuffer::zeroed(2);
        b.set(0);
        b.set(15);
        assert_eq!(b.as_bytes(), &[0x80, 0x01]);
    }

    #[test]
    fn get_set() {
        let mut b = BitBuffer::zeroed(3);
        for i in 0..24 {
            assert!(!b.get(i));
        }

        b.set(9);
        assert!(b.get(9));
        assert!(!b.get(8));
        assert!(!b.get(10));
        assert_eq!(b.count_ones(), 1);

        b.set(9);
        assert_eq!(b.count_ones(), 1);
        assert_eq!(b.as_bytes(), &[0x00, 0x40, 0x00]);
    }

    #[test]
    #[should_panic]
    fn set_out_of_range() {
        let mut b = BitBuffer::zeroed(1);
        b.set(8);
    }

    #[test]
    fn or_assign() {
        let mut a = BitBuffer::from_vec(vec![0x80, 0x00]);
        let b = BitBuffer::from_vec(vec![0x01, 0x10]);
        a.or_assign(&b);
        assert_eq!(a.as_bytes(), &[0x81, 0x10]);
        assert_eq!(b.as_bytes(), &[0x01, 0x10]);
    }

    #[test]
    fn is_covered_by() {
        let a = BitBuffer::from_vec(vec![0, 0, 1]);
        let b = BitBuffer::from_vec(vec![0, 0, 3]);
        assert!(a.is_covered_by(&b));
        assert!(!b.is_covered_by(&a));
        assert!(a.is_covered_by(&a));
    }

    #[test]
    fn clear() {
        let mut b = BitBuffer::from_vec(vec![0xff, 0x0f]);
        assert_eq!(b.count_ones(), 12);
        b.clear();
        assert!(b.is_zero());
        assert_eq!(b.into_vec(), vec![0, 0]);
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", BitBuffer::zeroed(4)), "BitBuffer { len: 4 }");
    }
}
