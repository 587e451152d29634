//! Deterministic deployment address formulas, one per deployment scheme.

use crate::guard::SaltGuard;
use crate::hash::{Create2Preimage, create_address, create2_address};
use crate::pattern::Permissions;
use crate::pool::PoolParams;
use alloy_primitives::{Address, B256};
use std::fmt;

/// Init code of the minimal proxy CreateX deploys with CREATE2 before the
/// proxy deploys the real contract with CREATE.
pub const PROXY_INIT_CODE: [u8; 16] = [
    0x67, 0x36, 0x3d, 0x3d, 0x37, 0x36, 0x3d, 0x34, 0xf0, 0x3d, 0x52, 0x60, 0x08, 0x60, 0x18, 0xf3,
];

/// Keccak256 hash of [`PROXY_INIT_CODE`].
pub const PROXY_INIT_CODE_HASH: B256 = B256::new([
    0x21, 0xc3, 0x5d, 0xbe, 0x1b, 0x34, 0x4a, 0x24, 0x88, 0xcf, 0x33, 0x21, 0xd6, 0xce, 0x54, 0x2f,
    0x8e, 0x9f, 0x30, 0x55, 0x44, 0xff, 0x09, 0xe4, 0x99, 0x3a, 0x62, 0x31, 0x9a, 0x49, 0x7c, 0x1f,
]);

/// Nonce at which the CREATE3 proxy deploys the final contract.
const PROXY_DEPLOY_NONCE: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Create2Params {
    pub deployer: Address,
    pub init_code_hash: B256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Create3Params {
    pub deployer: Address,
    /// Optional permissioned and cross-chain protection.
    pub guard: SaltGuard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EulerSwapParams {
    pub factory: Address,
    pub eulerswap_impl: Address,
    pub pool: PoolParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct V4HookParams {
    pub deployer: Address,
    pub init_code_hash: B256,
    pub permissions: Permissions,
}

/// A deployment scheme together with everything fixed for one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scheme {
    Create2(Create2Params),
    Create3(Create3Params),
    EulerSwap(EulerSwapParams),
    V4Hook(V4HookParams),
}

impl Scheme {
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::Create2(_) => "create2",
            Scheme::Create3(_) => "create3",
            Scheme::EulerSwap(_) => "eulerswap",
            Scheme::V4Hook(_) => "v4-hook",
        }
    }

    /// Address produced by deploying with `salt`.
    ///
    /// `salt` is the value the deployer hashes, i.e. the guarded salt when the
    /// scheme guards salts.
    pub fn derive(&self, salt: &B256) -> Address {
        match self {
            Scheme::Create2(p) => create2_address(p.deployer, *salt, p.init_code_hash),
            Scheme::Create3(p) => create3_address(p.deployer, *salt),
            Scheme::EulerSwap(p) => eulerswap_address(p.factory, p.eulerswap_impl, &p.pool, *salt),
            Scheme::V4Hook(p) => create2_address(p.deployer, *salt, p.init_code_hash),
        }
    }

    /// Guard applied to raw salts before derivation.
    pub fn guard(&self) -> SaltGuard {
        match self {
            Scheme::Create3(p) => p.guard,
            _ => SaltGuard::default(),
        }
    }

    /// Fixed leading bytes of every raw salt for this scheme, if any.
    pub fn salt_header(&self) -> Option<[u8; 21]> {
        match self {
            Scheme::Create3(p) if p.guard.is_active() => Some(p.guard.salt_header()),
            _ => None,
        }
    }

    /// Precomputes per-search constants for the mining loop.
    pub fn deriver(&self) -> AddressDeriver {
        match self {
            Scheme::Create2(p) => {
                AddressDeriver::Create2(Create2Preimage::new(p.deployer, p.init_code_hash))
            }
            Scheme::Create3(p) => {
                AddressDeriver::Create3(Create2Preimage::new(p.deployer, PROXY_INIT_CODE_HASH))
            }
            Scheme::EulerSwap(p) => AddressDeriver::Create2(Create2Preimage::new(
                p.factory,
                p.pool.init_code_hash(p.eulerswap_impl),
            )),
            Scheme::V4Hook(p) => {
                AddressDeriver::Create2(Create2Preimage::new(p.deployer, p.init_code_hash))
            }
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Create2(p) => write!(f, "create2 deployer={}", p.deployer),
            Scheme::Create3(p) => write!(f, "create3 deployer={}", p.deployer),
            Scheme::EulerSwap(p) => write!(f, "eulerswap factory={}", p.factory),
            Scheme::V4Hook(p) => {
                write!(f, "v4-hook deployer={} permissions={}", p.deployer, p.permissions)
            }
        }
    }
}

/// Two-hop CREATE3 address: CREATE2 of the bootstrap proxy, then CREATE at nonce 1.
pub fn create3_address(deployer: Address, salt: B256) -> Address {
    let proxy = create2_address(deployer, salt, PROXY_INIT_CODE_HASH);
    create_address(proxy, PROXY_DEPLOY_NONCE)
}

/// Address of an EulerSwap pool deployed by `factory` with `salt`.
pub fn eulerswap_address(
    factory: Address,
    eulerswap_impl: Address,
    pool: &PoolParams,
    salt: B256,
) -> Address {
    create2_address(factory, salt, pool.init_code_hash(eulerswap_impl))
}

/// Per-worker address calculator with its preimage buffer preloaded.
///
/// EulerSwap and V4 hook addresses are plain CREATE2 addresses once the init
/// code hash is known, so only two shapes remain.
#[derive(Debug, Clone, Copy)]
pub enum AddressDeriver {
    Create2(Create2Preimage),
    Create3(Create2Preimage),
}

impl AddressDeriver {
    /// Calculates the contract address that would result from deploying with `salt`.
    #[inline]
    pub fn compute_address(&mut self, salt: &B256) -> Address {
        match self {
            AddressDeriver::Create2(preimage) => preimage.address(salt),
            AddressDeriver::Create3(preimage) => {
                create_address(preimage.address(salt), PROXY_DEPLOY_NONCE)
            }
        }
    }
}
