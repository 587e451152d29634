//! Caller and chain binding of raw salts, following CreateX's `_guard`.

use crate::hash::{address_word, keccak256, u64_word};
use alloy_primitives::{Address, B256};

/// Value of raw-salt byte 20 when cross-chain redeploy protection is requested.
pub const CROSS_CHAIN_FLAG: u8 = 0x01;

/// Mixes an optional caller and chain id into raw salts.
///
/// When neither is set the guard is inactive and raw salts are used as-is.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SaltGuard {
    pub caller: Option<Address>,
    pub chain_id: Option<u64>,
}

impl SaltGuard {
    pub fn new(caller: Option<Address>, chain_id: Option<u64>) -> Self {
        Self { caller, chain_id }
    }

    pub fn is_active(&self) -> bool {
        self.caller.is_some() || self.chain_id.is_some()
    }

    /// `keccak256(caller_word ∥ chain_id_word ∥ raw_salt)`, absent parts omitted.
    ///
    /// Returns `None` when the guard is inactive.
    pub fn guard(&self, raw: &B256) -> Option<B256> {
        let guarded = match (self.caller, self.chain_id) {
            (Some(caller), Some(chain_id)) => {
                let mut preimage = [0u8; 96];
                preimage[0..32].copy_from_slice(&address_word(caller));
                preimage[32..64].copy_from_slice(&u64_word(chain_id));
                preimage[64..96].copy_from_slice(raw.as_slice());
                keccak256(preimage)
            }
            (Some(caller), None) => {
                let mut preimage = [0u8; 64];
                preimage[0..32].copy_from_slice(&address_word(caller));
                preimage[32..64].copy_from_slice(raw.as_slice());
                keccak256(preimage)
            }
            (None, Some(chain_id)) => {
                let mut preimage = [0u8; 64];
                preimage[0..32].copy_from_slice(&u64_word(chain_id));
                preimage[32..64].copy_from_slice(raw.as_slice());
                keccak256(preimage)
            }
            (None, None) => return None,
        };
        Some(guarded)
    }

    /// Leading raw-salt bytes CreateX inspects to pick the guard: the caller
    /// (or zero) in bytes 0..20 and the cross-chain flag in byte 20.
    pub fn salt_header(&self) -> [u8; 21] {
        let mut header = [0u8; 21];
        if let Some(caller) = self.caller {
            header[..20].copy_from_slice(caller.as_slice());
        }
        if self.chain_id.is_some() {
            header[20] = CROSS_CHAIN_FLAG;
        }
        header
    }
}
