//! EulerSwap pool parameters and their canonical encoding.
//!
//! A pool is a MetaProxy clone of the EulerSwap implementation with the
//! ABI-encoded parameters appended as metadata, deployed by the factory via
//! CREATE2. Pools are also Uniswap V4 hooks, so their address must carry a
//! fixed set of hook permission bits.

use crate::hash::{keccak256, meta_proxy_creation_code};
use crate::pattern::Permissions;
use alloy_primitives::{Address, B256, U256, aliases::U112};
use alloy_sol_types::SolValue;

mod abi {
    alloy_sol_types::sol! {
        struct Params {
            address vault0;
            address vault1;
            address eulerAccount;
            uint112 equilibriumReserve0;
            uint112 equilibriumReserve1;
            uint256 priceX;
            uint256 priceY;
            uint256 concentrationX;
            uint256 concentrationY;
            uint256 fee;
            uint256 protocolFee;
            address protocolFeeRecipient;
        }
    }
}

/// Hook permissions every EulerSwap pool address must encode.
pub const EULERSWAP_PERMISSIONS: Permissions = Permissions {
    before_initialize: true,
    before_add_liquidity: true,
    before_swap: true,
    before_donate: true,
    before_swap_return_delta: true,
    ..Permissions::NONE
};

/// `IEulerSwap.Params`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolParams {
    pub vault0: Address,
    pub vault1: Address,
    pub euler_account: Address,
    pub equilibrium_reserve0: U112,
    pub equilibrium_reserve1: U112,
    pub price_x: U256,
    pub price_y: U256,
    pub concentration_x: U256,
    pub concentration_y: U256,
    pub fee: U256,
    pub protocol_fee: U256,
    pub protocol_fee_recipient: Address,
}

impl PoolParams {
    /// Canonical ABI encoding, twelve 32-byte words in declaration order.
    pub fn abi_encode(&self) -> Vec<u8> {
        abi::Params {
            vault0: self.vault0,
            vault1: self.vault1,
            eulerAccount: self.euler_account,
            equilibriumReserve0: self.equilibrium_reserve0,
            equilibriumReserve1: self.equilibrium_reserve1,
            priceX: self.price_x,
            priceY: self.price_y,
            concentrationX: self.concentration_x,
            concentrationY: self.concentration_y,
            fee: self.fee,
            protocolFee: self.protocol_fee,
            protocolFeeRecipient: self.protocol_fee_recipient,
        }
        .abi_encode()
    }

    /// Hash of the pool's creation code when cloned from `eulerswap_impl`.
    pub fn init_code_hash(&self, eulerswap_impl: Address) -> B256 {
        keccak256(meta_proxy_creation_code(eulerswap_impl, &self.abi_encode()))
    }
}
