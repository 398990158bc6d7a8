//! Bloom filter over a fixed-size byte buffer.
use std::fmt;

use crate::bits::BitBuffer;
use crate::encoder::{Encoder, Identity};
use crate::error::{Error, Result};
use crate::positions::Positions;

mod codec;
mod estimate;
#[cfg(feature = "serde")]
mod serde;

/// A Bloom filter is a set-like data structure, that keeps track of elements it has seen without
/// the need to store them. Looking up values has a certain false positive rate, but a false
/// negative rate of 0%.
///
/// This filter does not hash anything itself. Values are turned into fragments by an
/// [`Encoder`], by default [`Identity`] which expects the caller to pass digests (or truncated
/// digests) directly.
///
/// # Examples
/// ```
/// use blooms::Blooms;
///
/// let mut filter = Blooms::new(4).unwrap();
/// filter.insert(&[0x00, 0x00]).insert(&[0xff, 0xff]);
///
/// assert!(filter.contains(&[0x00, 0x00]));
/// assert_eq!(filter.as_bytes(), &[0x80, 0x00, 0x00, 0x01]);
/// assert_eq!(filter.to_base64(), "gAAAAQ==");
/// ```
///
/// # How It Works
/// The filter is a buffer of `size` bytes, i.e. `m = 8 * size` bits, all initially unset. Bit `i`
/// is stored in byte `i / 8`, counted from the most significant bit of that byte.
///
/// A fragment is split into 2-byte segments, each read as a big-endian integer `v`. Every segment
/// addresses bit `v % m` (see [`Positions`]). Insertion sets all addressed bits, lookup checks
/// that all of them are set. The number of segments plays the role of the number of hash
/// functions `k`, so it is chosen by the caller through the fragment length.
///
/// Because segments are 16 bits wide, at most the first 65536 bits of a filter are reachable.
///
/// # See Also
/// - [`specialize!`](crate::specialize): bind a filter type to an encoding scheme
///
/// # References
/// - ["Space/Time Trade-offs in Hash Coding with Allowable Errors", Burton H. Bloom, 1970](http://dmod.eu/deca/ft_gateway.cfm.pdf)
/// - [Wikipedia: Bloom filter](https://en.wikipedia.org/wiki/Bloom_filter)
#[derive(Clone)]
pub struct Blooms<E = Identity>
where
    E: Encoder,
{
    bits: BitBuffer,
    encoder: E,
}

impl Blooms {
    /// Create new, all-zero filter of `size` bytes that takes pre-encoded fragments.
    ///
    /// Fails with [`Error::InvalidSize`] if `size` is 0.
    pub fn new(size: usize) -> Result<Self> {
        Self::with_encoder(size, Identity)
    }

    /// Create filter from raw bytes, e.g. obtained via [`as_bytes`](Self::as_bytes).
    ///
    /// Fails with [`Error::InvalidSize`] if `bytes` is empty.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        Self::from_bytes_with_encoder(bytes, Identity)
    }
}

impl<E> Blooms<E>
where
    E: Encoder,
{
    /// Same as `new` but with a specific encoder.
    pub fn with_encoder(size: usize, encoder: E) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            bits: BitBuffer::zeroed(size),
            encoder,
        })
    }

    /// Same as `from_bytes` but with a specific encoder.
    pub fn from_bytes_with_encoder(bytes: impl Into<Vec<u8>>, encoder: E) -> Result<Self> {
        let bytes = bytes.into();
        check_size(bytes.len())?;
        Ok(Self {
            bits: BitBuffer::from_vec(bytes),
            encoder,
        })
    }

    /// Reinterpret the filter state under another encoder.
    ///
    /// The text form and raw bytes carry no information about the encoder, so this is how a
    /// decoded filter is turned back into the variant that produced it.
    pub fn reencode<F>(self, encoder: F) -> Blooms<F>
    where
        F: Encoder,
    {
        Blooms {
            bits: self.bits,
            encoder,
        }
    }

    /// Get size of the filter in bytes.
    pub fn size(&self) -> usize {
        self.bits.len()
    }

    /// Get `m` (number of stored bits).
    pub fn bit_len(&self) -> usize {
        self.bits.bit_len()
    }

    /// Get the encoder.
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Raw bytes of the filter.
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_bytes()
    }

    /// Consume the filter and return its raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bits.into_vec()
    }

    /// Bit positions that `item` maps to, after encoding.
    pub fn positions_of(&self, item: &E::Item) -> Vec<usize> {
        Positions::new(&self.encoder.encode(item), self.bit_len()).collect()
    }

    /// Add new element to the filter.
    ///
    /// Adding the same element multiple times has no further effect. Elements that encode to
    /// fewer than 2 bytes do not change the filter.
    pub fn insert(&mut self, item: &E::Item) -> &mut Self {
        let fragment = self.encoder.encode(item);
        self.insert_fragment(&fragment)
    }

    /// Add all elements to the filter. The order of the elements does not matter.
    pub fn insert_all<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<E::Item>,
    {
        for item in items {
            self.insert(item.as_ref());
        }
        self
    }

    /// Add an already encoded fragment, bypassing the encoder.
    pub fn insert_fragment(&mut self, fragment: &[u8]) -> &mut Self {
        for pos in Positions::new(fragment, self.bits.bit_len()) {
            self.bits.set(pos);
        }
        self
    }

    /// Guess if the given element was added to the filter.
    ///
    /// Elements that encode to fewer than 2 bytes address no bit and are therefore always
    /// reported as present.
    pub fn contains(&self, item: &E::Item) -> bool {
        self.contains_fragment(&self.encoder.encode(item))
    }

    /// Guess if the given, already encoded fragment was added to the filter.
    pub fn contains_fragment(&self, fragment: &[u8]) -> bool {
        Positions::new(fragment, self.bits.bit_len()).all(|pos| self.bits.get(pos))
    }

    /// Return union of this filter and `other` as a new filter.
    ///
    /// Every element contained in either filter is contained in the result. Neither input is
    /// modified.
    ///
    /// Fails with [`Error::SizeMismatch`] if the sizes differ.
    pub fn union(&self, other: &Self) -> Result<Self>
    where
        E: Clone,
    {
        let mut res = self.clone();
        res.union_with(other)?;
        Ok(res)
    }

    /// Add the entire content of another filter to this filter.
    ///
    /// The result is the same as adding all elements added to `other` to `self` in the first
    /// place.
    ///
    /// Fails with [`Error::SizeMismatch`] if the sizes differ, in which case `self` is left
    /// untouched.
    pub fn union_with(&mut self, other: &Self) -> Result<&mut Self> {
        check_same_size(self.size(), other.size())?;
        self.bits.or_assign(&other.bits);
        Ok(self)
    }

    /// Check if every element accepted by this filter is also accepted by `other`.
    ///
    /// This considers all elements a filter reports as present, including false positives, i.e.
    /// it checks that every bit set in `self` is also set in `other`.
    ///
    /// Fails with [`Error::SizeMismatch`] if the sizes differ.
    pub fn is_subset(&self, other: &Self) -> Result<bool> {
        check_same_size(self.size(), other.size())?;
        Ok(self.bits.is_covered_by(&other.bits))
    }

    /// Clear state of the filter, so that it behaves like a fresh one.
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Check whether no bit is set.
    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }
}

fn check_size(size: usize) -> Result<()> {
    if size == 0 {
        tracing::debug!(size, "rejecting filter with non-positive size");
        return Err(Error::InvalidSize(size));
    }
    Ok(())
}

fn check_same_size(left: usize, right: usize) -> Result<()> {
    if left != right {
        tracing::debug!(left, right, "rejecting filters of different sizes");
        return Err(Error::SizeMismatch { left, right });
    }
    Ok(())
}

impl<E> PartialEq for Blooms<E>
where
    E: Encoder,
{
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<E> Eq for Blooms<E> where E: Encoder {}

impl<E> fmt::Debug for Blooms<E>
where
    E: Encoder + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Blooms {{ size: {}, encoder: {:?} }}",
            self.size(),
            self.encoder
        )
    }
}

impl<E, T> Extend<T> for Blooms<E>
where
    E: Encoder,
    T: AsRef<E::Item>,
{
    fn extend<S: IntoIterator<Item = T>>(&mut self, iter: S) {
        self.insert_all(iter);
    }
}
