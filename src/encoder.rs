//! Encoders that turn caller values into fragments.
//!
//! A [`Blooms`](crate::Blooms) filter is generic over its encoder. Insert and query apply the
//! encoder before mapping the fragment to bit positions, so every call site of a filter type uses
//! the same hashing/truncation scheme. Union, subset tests and the text codec never look at the
//! encoder.
//!
//! There are three ways to get an encoder:
//!
//! - [`Identity`]: the caller passes already encoded fragments (the default).
//! - [`encode_with`]: wrap a closure.
//! - [`specialize!`](crate::specialize): declare a named, zero-sized encoder type, i.e. a filter
//!   variant that can be named in signatures.
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// Maps a caller value to the fragment that is fed into a filter.
pub trait Encoder {
    /// Type of the values accepted by the filter.
    type Item: ?Sized;

    /// Encode `item` into a fragment.
    ///
    /// Must be deterministic: the same item has to produce the same fragment for insertion and
    /// lookup.
    fn encode<'a>(&self, item: &'a Self::Item) -> Cow<'a, [u8]>;
}

/// Encoder that passes fragments through unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Identity;

impl Encoder for Identity {
    type Item = [u8];

    fn encode<'a>(&self, item: &'a [u8]) -> Cow<'a, [u8]> {
        Cow::Borrowed(item)
    }
}

/// Encoder backed by a function or closure, see [`encode_with`].
pub struct FnEncoder<T, F>
where
    T: ?Sized,
    F: Fn(&T) -> Vec<u8>,
{
    f: F,
    _item: PhantomData<fn(&T)>,
}

/// Create an encoder from a function or closure.
///
/// # Examples
/// ```
/// use blooms::{Blooms, encode_with};
///
/// let mut filter = Blooms::with_encoder(64, encode_with(|s: &str| s.as_bytes().to_vec())).unwrap();
/// filter.insert("hello");
/// assert!(filter.contains("hello"));
/// ```
pub fn encode_with<T, F>(f: F) -> FnEncoder<T, F>
where
    T: ?Sized,
    F: Fn(&T) -> Vec<u8>,
{
    FnEncoder {
        f,
        _item: PhantomData,
    }
}

impl<T, F> Encoder for FnEncoder<T, F>
where
    T: ?Sized,
    F: Fn(&T) -> Vec<u8>,
{
    type Item = T;

    fn encode<'a>(&self, item: &'a T) -> Cow<'a, [u8]> {
        Cow::Owned((self.f)(item))
    }
}

impl<T, F> Clone for FnEncoder<T, F>
where
    T: ?Sized,
    F: Fn(&T) -> Vec<u8> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _item: PhantomData,
        }
    }
}

impl<T, F> fmt::Debug for FnEncoder<T, F>
where
    T: ?Sized,
    F: Fn(&T) -> Vec<u8>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad("FnEncoder")
    }
}

/// Declare a filter variant: a named, zero-sized [`Encoder`] type bound to an encode function.
///
/// The generated type gets a `filter(size)` constructor that returns a fresh
/// [`Blooms`](crate::Blooms) using it.
///
/// # Examples
/// ```
/// use blooms::specialize;
/// use sha2::{Digest, Sha256};
///
/// specialize! {
///     /// First two bytes of the SHA-256 digest.
///     pub Sha256Prefix(item: &[u8]) {
///         Sha256::digest(item)[..2].to_vec()
///     }
/// }
///
/// let mut filter = Sha256Prefix::filter(4).unwrap();
/// filter.insert(&[1, 2, 3]);
/// assert!(filter.contains(&[1, 2, 3]));
/// ```
#[macro_export]
macro_rules! specialize {
    ($(#[$meta:meta])* $vis:vis $name:ident($item:ident: &$ty:ty) $body:block) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::encoder::Encoder for $name {
            type Item = $ty;

            fn encode<'a>(&self, $item: &'a $ty) -> ::std::borrow::Cow<'a, [u8]> {
                let fragment: ::std::vec::Vec<u8> = ::std::convert::Into::into($body);
                ::std::borrow::Cow::Owned(fragment)
            }
        }

        impl $name {
            /// Create a new, all-zero filter of `size` bytes that uses this encoder.
            #[allow(dead_code)]
            $vis fn filter(size: usize) -> $crate::Result<$crate::Blooms<Self>> {
                $crate::Blooms::with_encoder(size, Self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{Encoder, Identity, encode_with};

    specialize! {
        /// Reverses the input.
        Reversed(item: &[u8]) {
            item.iter().rev().copied().collect::<Vec<u8>>()
        }
    }

    specialize! {
        StrLen(item: &str) {
            (item.len() as u16).to_be_bytes()
        }
    }

    #[test]
    fn identity_borrows() {
        let fragment = [1u8, 2, 3];
        let encoded = Identity.encode(&fragment);
        assert!(matches!(encoded, Cow::Borrowed(_)));
        assert_eq!(encoded.as_ref(), &[1, 2, 3]);
    }

    #[test]
    fn fn_encoder() {
        let e = encode_with(|x: &u32| x.to_be_bytes().to_vec());
        assert_eq!(e.encode(&0x0102_0304).as_ref(), &[1, 2, 3, 4]);
        assert_eq!(format!("{:?}", e), "FnEncoder");

        let e2 = e.clone();
        assert_eq!(e2.encode(&1).as_ref(), &[0, 0, 0, 1]);
    }

    #[test]
    fn specialized() {
        assert_eq!(Reversed.encode(&[1, 2, 3]).as_ref(), &[3, 2, 1]);
        assert_eq!(StrLen.encode("abc").as_ref(), &[0, 3]);
        assert_eq!(format!("{:?}", Reversed), "Reversed");
    }

    #[test]
    fn specialized_filter() {
        let mut filter = StrLen::filter(4).unwrap();
        assert_eq!(filter.size(), 4);

        // "abc" maps to 3, so every other 3-byte string matches as well
        filter.insert("abc");
        assert!(filter.contains("xyz"));
        assert!(!filter.contains("ab"));
        assert_eq!(filter.as_bytes(), &[0x10, 0x00, 0x00, 0x00]);

        assert!(Reversed::filter(0).is_err());
    }
}
