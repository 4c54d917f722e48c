//! Access to the operating system CSPRNG.
//!
//! `OsRng` is stateless, so concurrent callers never share a counter or
//! buffer and cannot observe correlated output.

use rand::rngs::{OsRng, StdRng};
use rand::{CryptoRng, RngCore, SeedableRng};

use crate::error::{CoreError, Result};

/// Fill `buf` from the OS randomness source.
pub fn fill_random(buf: &mut [u8]) -> Result<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CoreError::KeyGenerationFailure(e.to_string()))
}

/// Return `N` fresh random bytes.
pub fn random_array<const N: usize>() -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    fill_random(&mut bytes)?;
    Ok(bytes)
}

/// Wraps a generator for backends that draw through the infallible
/// `RngCore::fill_bytes`.
///
/// The first failure of the inner generator is recorded and every later
/// draw comes from a fixed fallback stream, so the backend always runs to
/// completion. [`finish`](Self::finish) then reports the failure and the
/// backend's output must be discarded.
pub(crate) struct CheckedRng<'a, R> {
    inner: &'a mut R,
    fallback: Option<StdRng>,
    error: Option<String>,
}

impl<'a, R: RngCore + CryptoRng> CheckedRng<'a, R> {
    pub(crate) fn new(inner: &'a mut R) -> Self {
        Self {
            inner,
            fallback: None,
            error: None,
        }
    }

    /// `Err(KeyGenerationFailure)` if any draw failed.
    pub(crate) fn finish(self) -> Result<()> {
        match self.error {
            Some(reason) => Err(CoreError::KeyGenerationFailure(reason)),
            None => Ok(()),
        }
    }
}

impl<R: RngCore + CryptoRng> RngCore for CheckedRng<'_, R> {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if self.error.is_none() {
            match self.inner.try_fill_bytes(dest) {
                Ok(()) => return,
                Err(e) => self.error = Some(e.to_string()),
            }
        }
        // Zeros would stall prime search and non-zero padding loops.
        self.fallback
            .get_or_insert_with(|| StdRng::from_seed([0u8; 32]))
            .fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl<R: RngCore + CryptoRng> CryptoRng for CheckedRng<'_, R> {}

/// A generator whose source is always unavailable. `fill_bytes` panics the
/// way `OsRng` does.
#[cfg(test)]
pub(crate) struct UnavailableRng;

#[cfg(test)]
impl RngCore for UnavailableRng {
    fn next_u32(&mut self) -> u32 {
        panic!("entropy source unavailable")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("entropy source unavailable")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("entropy source unavailable")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        Err(rand::Error::new("entropy source unavailable"))
    }
}

#[cfg(test)]
impl CryptoRng for UnavailableRng {}
