//! Text and hex representations.
//!
//! The text form is the standard base64 encoding (RFC 4648, with `=` padding) of the raw bytes.
//! There is no header, version tag or length prefix: the size is implied by the decoded length,
//! and the encoder is not recorded at all.
use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::Blooms;
use crate::encoder::{Encoder, Identity};
use crate::error::{Error, Result};

impl Blooms {
    /// Decode a filter from its base64 text form.
    ///
    /// The result uses the [`Identity`] encoder. Use [`from_base64_with_encoder`] or
    /// [`reencode`](Blooms::reencode) to restore a specialized filter.
    ///
    /// Fails with [`Error::Decode`] if `s` is not valid base64, and with [`Error::InvalidSize`]
    /// if it decodes to no bytes at all.
    ///
    /// [`from_base64_with_encoder`]: Blooms::from_base64_with_encoder
    pub fn from_base64(s: &str) -> Result<Self> {
        Self::from_base64_with_encoder(s, Identity)
    }
}

impl<E> Blooms<E>
where
    E: Encoder,
{
    /// Same as `from_base64` but with a specific encoder.
    pub fn from_base64_with_encoder(s: &str, encoder: E) -> Result<Self> {
        let bytes = STANDARD.decode(s).map_err(|e| {
            tracing::debug!(len = s.len(), error = %e, "cannot decode filter text");
            Error::from(e)
        })?;
        Self::from_bytes_with_encoder(bytes, encoder)
    }

    /// Encode the filter as base64 text.
    ///
    /// The output only depends on the filter bytes.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.as_bytes())
    }
}

impl<E> fmt::Display for Blooms<E>
where
    E: Encoder,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl FromStr for Blooms {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base64(s)
    }
}

impl<E> fmt::LowerHex for Blooms<E>
where
    E: Encoder,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.as_bytes() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl<E> fmt::UpperHex for Blooms<E>
where
    E: Encoder,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.as_bytes() {
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}
