//! Deterministic candidate salt generation.
//!
//! A stream is an arithmetic progression over a 256-bit base derived from the
//! seed: the salt at global index `i` is `keccak256(seed) + i`, with an optional
//! fixed header overwriting the leading bytes. Partitioning hands worker `w` of
//! `n` the indices `w, w + n, w + 2n, ...`, so substreams never overlap.

use crate::hash::keccak256;
use alloy_primitives::{B256, U256};
use rand::Rng;

/// Longest header a stream accepts. At least one byte must stay variable.
const MAX_HEADER_LEN: usize = 31;

/// Draws a seed from the thread-local CSPRNG.
pub fn random_seed() -> u128 {
    rand::rng().random()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaltStream {
    base: U256,
    header: [u8; MAX_HEADER_LEN],
    header_len: usize,
    /// Global index of the next salt, `None` once the index space is used up.
    next: Option<u64>,
    stride: u64,
}

impl SaltStream {
    pub fn new(seed: u128) -> Self {
        Self {
            base: U256::from_be_bytes(keccak256(seed.to_be_bytes()).0),
            header: [0u8; MAX_HEADER_LEN],
            header_len: 0,
            next: Some(0),
            stride: 1,
        }
    }

    /// Pins the leading salt bytes to `header`. Longer headers are cut to 31 bytes.
    pub fn with_header(mut self, header: &[u8]) -> Self {
        let len = header.len().min(MAX_HEADER_LEN);
        self.header[..len].copy_from_slice(&header[..len]);
        self.header_len = len;
        self
    }

    /// Global index the next call to [`Iterator::next`] will produce.
    pub fn next_index(&self) -> Option<u64> {
        self.next
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// The salt at a global index, independent of the stream's position.
    pub fn salt_at(&self, index: u64) -> B256 {
        let mut bytes = self.base.wrapping_add(U256::from(index)).to_be_bytes::<32>();
        bytes[..self.header_len].copy_from_slice(&self.header[..self.header_len]);
        B256::from(bytes)
    }

    /// Splits the remaining indices of this stream into `workers` disjoint
    /// substreams. Substream `w` starts `w` steps after this stream's position.
    pub fn substreams(&self, workers: usize) -> Vec<SaltStream> {
        let workers = workers.max(1) as u64;
        let stride = self.stride.checked_mul(workers);

        (0..workers)
            .map(|w| {
                let next = match stride {
                    Some(_) => self
                        .next
                        .and_then(|start| w.checked_mul(self.stride)?.checked_add(start)),
                    None => None,
                };
                SaltStream {
                    next,
                    stride: stride.unwrap_or(u64::MAX),
                    ..self.clone()
                }
            })
            .collect()
    }
}

impl Iterator for SaltStream {
    type Item = B256;

    fn next(&mut self) -> Option<B256> {
        let index = self.next?;
        self.next = index.checked_add(self.stride);
        Some(self.salt_at(index))
    }
}
