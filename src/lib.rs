//! Salt mining for deterministic contract deployments.
//!
//! Given a deployment scheme (CREATE2, CREATE3 via CreateX, an EulerSwap pool,
//! or a Uniswap V4 hook) and a target predicate on the resulting address, the
//! [`MiningEngine`] searches a seeded salt stream in parallel and reports the
//! salts that hit.

pub mod config;
pub mod derive;
pub mod error;
pub mod guard;
pub mod hash;
pub mod mine;
pub mod parse;
pub mod pattern;
pub mod pool;
pub mod salt;

pub use config::{DeploymentConfig, MiningJob, MiningRequest};
pub use derive::{
    Create2Params, Create3Params, EulerSwapParams, Scheme, V4HookParams, create3_address,
    eulerswap_address,
};
pub use error::{MineError, ParseError, Result};
pub use guard::SaltGuard;
pub use mine::{
    EngineOptions, MiningEngine, MiningOutput, MiningResult, StopReason, mine,
};
pub use parse::HexMode;
pub use pattern::{Pattern, PatternType, Permissions};
pub use pool::{EULERSWAP_PERMISSIONS, PoolParams};
