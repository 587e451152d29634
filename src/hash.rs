//! Hashing and byte-layout helpers shared by every derivation scheme.
//!
//! Everything here packs fixed-width values into the exact preimages the EVM
//! hashes: the 85-byte CREATE2 preimage, the RLP list used by CREATE, 32-byte
//! ABI words and the MetaProxy creation code used by EulerSwap pools.

use alloy_primitives::{Address, B256};

pub use alloy_primitives::keccak256;

/// Length of a CREATE2 preimage: `0xff` (1) + deployer (20) + salt (32) + init code hash (32).
pub const CREATE2_PREIMAGE_LEN: usize = 85;

/// Longest CREATE preimage: list header (1) + address header (1) + address (20) + nonce (1 + 8).
pub const CREATE_PREIMAGE_MAX_LEN: usize = 31;

/// ERC-3448 MetaProxy creation code, split around the 20-byte target address.
const META_PROXY_HEAD: &[u8] = &[
    0x60, 0x0b, 0x38, 0x03, 0x80, 0x60, 0x0b, 0x3d, 0x39, 0x3d, 0xf3, 0x36, 0x3d, 0x3d, 0x37, 0x3d,
    0x3d, 0x3d, 0x3d, 0x60, 0x36, 0x80, 0x38, 0x03, 0x80, 0x91, 0x36, 0x39, 0x36, 0x01, 0x3d, 0x73,
];
const META_PROXY_TAIL: &[u8] = &[
    0x5a, 0xf4, 0x3d, 0x3d, 0x93, 0x80, 0x3e, 0x60, 0x34, 0x57, 0xfd, 0x5b, 0xf3,
];

/// A CREATE2 preimage with the deployer and init code hash already in place.
///
/// Only the salt segment (bytes 21..53) changes between candidates, so a worker
/// keeps one of these for the whole run and rewrites the salt in place.
#[derive(Debug, Clone, Copy)]
pub struct Create2Preimage([u8; CREATE2_PREIMAGE_LEN]);

impl Create2Preimage {
    pub fn new(deployer: Address, init_code_hash: B256) -> Self {
        let mut buf = [0u8; CREATE2_PREIMAGE_LEN];
        buf[0] = 0xff;
        buf[1..21].copy_from_slice(deployer.as_slice());
        buf[53..85].copy_from_slice(init_code_hash.as_slice());
        Self(buf)
    }

    /// Writes `salt` into the preimage and returns the resulting address.
    #[inline]
    pub fn address(&mut self, salt: &B256) -> Address {
        self.0[21..53].copy_from_slice(salt.as_slice());
        Address::from_slice(&keccak256(self.0)[12..])
    }
}

/// `last_20_bytes(keccak256(0xff ∥ deployer ∥ salt ∥ init_code_hash))`
pub fn create2_address(deployer: Address, salt: B256, init_code_hash: B256) -> Address {
    Create2Preimage::new(deployer, init_code_hash).address(&salt)
}

/// Address of the contract `sender` creates with the CREATE opcode at `nonce`.
///
/// The preimage is `rlp([sender, nonce])`. Both items are short, so the list
/// header is always a single byte.
pub fn create_address(sender: Address, nonce: u64) -> Address {
    let mut buf = [0u8; CREATE_PREIMAGE_MAX_LEN];
    let len = rlp_sender_nonce(&mut buf, sender, nonce);
    Address::from_slice(&keccak256(&buf[..len])[12..])
}

/// Encodes `rlp([sender, nonce])` into `buf` and returns the encoded length.
pub fn rlp_sender_nonce(
    buf: &mut [u8; CREATE_PREIMAGE_MAX_LEN],
    sender: Address,
    nonce: u64,
) -> usize {
    buf[1] = 0x80 + 20;
    buf[2..22].copy_from_slice(sender.as_slice());

    let end = match nonce {
        0 => {
            buf[22] = 0x80;
            23
        }
        1..=0x7f => {
            buf[22] = nonce as u8;
            23
        }
        _ => {
            let bytes = nonce.to_be_bytes();
            let skip = nonce.leading_zeros() as usize / 8;
            let width = 8 - skip;
            buf[22] = 0x80 + width as u8;
            buf[23..23 + width].copy_from_slice(&bytes[skip..]);
            23 + width
        }
    };

    buf[0] = 0xc0 + (end - 1) as u8;
    end
}

/// Left-pads an address into a 32-byte ABI word.
#[inline]
pub fn address_word(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_slice());
    word
}

/// Encodes an unsigned integer as a 32-byte big-endian ABI word.
#[inline]
pub fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Builds the ERC-3448 MetaProxy creation code for `target` with `metadata`
/// appended after the runtime code.
pub fn meta_proxy_creation_code(target: Address, metadata: &[u8]) -> Vec<u8> {
    let mut code = Vec::with_capacity(
        META_PROXY_HEAD.len() + 20 + META_PROXY_TAIL.len() + metadata.len(),
    );
    code.extend_from_slice(META_PROXY_HEAD);
    code.extend_from_slice(target.as_slice());
    code.extend_from_slice(META_PROXY_TAIL);
    code.extend_from_slice(metadata);
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{U256, address, b256};

    #[test]
    fn create2_preimage_matches_alloy() {
        let deployer = address!("0x4e59b44847b379578588920cA78FbF26c0B4956C");
        let init_code_hash = keccak256([0x60u8, 0x00]);
        let mut preimage = Create2Preimage::new(deployer, init_code_hash);

        for salt in [B256::ZERO, B256::repeat_byte(0xab), keccak256("salt")] {
            assert_eq!(preimage.address(&salt), deployer.create2(salt, init_code_hash));
        }
    }

    #[test]
    fn create_address_matches_alloy_for_all_nonce_widths() {
        let sender = address!("0x6ac7ea33f8831ea9dcc53393aaa88b25a785dbf0");
        for nonce in [0, 1, 0x7f, 0x80, 0xff, 0x100, 0xdead_beef, u64::MAX] {
            assert_eq!(
                create_address(sender, nonce),
                sender.create(nonce),
                "nonce {nonce}"
            );
        }
    }

    #[test]
    fn rlp_nonce_one_layout() {
        let sender = address!("0x1111111111111111111111111111111111111111");
        let mut buf = [0u8; CREATE_PREIMAGE_MAX_LEN];
        let len = rlp_sender_nonce(&mut buf, sender, 1);
        assert_eq!(len, 23);
        assert_eq!(buf[0], 0xd6);
        assert_eq!(buf[1], 0x94);
        assert_eq!(&buf[2..22], sender.as_slice());
        assert_eq!(buf[22], 0x01);
    }

    #[test]
    fn abi_words_are_left_padded() {
        let addr = address!("0xDeaDbeefdEAdbeefdEadbEEFdeadbeEFdEaDbeeF");
        let word = address_word(addr);
        assert!(word[..12].iter().all(|b| *b == 0));
        assert_eq!(&word[12..], addr.as_slice());

        assert_eq!(
            B256::from(u64_word(130)),
            B256::from(U256::from(130u64).to_be_bytes::<32>())
        );
    }

    #[test]
    fn meta_proxy_code_embeds_target() {
        let target = address!("0xF5d35536482f62c9031b4d6bD34724671BCE33d1");
        let code = meta_proxy_creation_code(target, &[0xaa, 0xbb]);
        assert_eq!(code.len(), 32 + 20 + 13 + 2);
        assert_eq!(code[31], 0x73);
        assert_eq!(&code[32..52], target.as_slice());
        assert_eq!(&code[code.len() - 2..], &[0xaa, 0xbb]);
        assert_eq!(
            &code[..32],
            b256!("0x600b380380600b3d393df3363d3d373d3d3d3d60368038038091363936013d73").as_slice()
        );
    }
}
