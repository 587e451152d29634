//! Validated mining configuration and the textual request it is parsed from.
//!
//! Callers hand over every value as text (decimal or `0x`-hex). Nothing reaches
//! the engine before it has been parsed into a [`DeploymentConfig`].

use crate::derive::{Create2Params, Create3Params, EulerSwapParams, Scheme, V4HookParams};
use crate::error::{MineError, ParseError, Result};
use crate::guard::SaltGuard;
use crate::parse::{self, HexMode};
use crate::pattern::{Matcher, Pattern, PatternType, Permissions};
use crate::pool::{EULERSWAP_PERMISSIONS, PoolParams};
use serde::Deserialize;

/// Everything that defines one search, fixed before the search starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    pub scheme: Scheme,
    /// Upper bound on candidate salts evaluated across all workers.
    pub max_iterations: u64,
    /// Upper bound on reported matches.
    pub max_results: u32,
    /// Seed of the salt stream. `None` draws a random one per run.
    pub seed: Option<u128>,
}

impl DeploymentConfig {
    pub fn new(scheme: Scheme, max_iterations: u64, max_results: u32) -> Result<Self> {
        let config = Self {
            scheme,
            max_iterations,
            max_results,
            seed: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u128) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(MineError::config("max_iterations", ParseError::Zero));
        }
        if self.max_results == 0 {
            return Err(MineError::config("max_results", ParseError::Zero));
        }
        Ok(())
    }

    /// Builds the predicate for this scheme.
    ///
    /// CREATE2 and CREATE3 search by text pattern and require one. EulerSwap
    /// and V4 hook searches match permission bits and reject a pattern.
    pub fn matcher(&self, pattern: Option<&Pattern>) -> Result<Matcher> {
        match (&self.scheme, pattern) {
            (Scheme::Create2(_) | Scheme::Create3(_), Some(pattern)) => {
                Ok(Matcher::Pattern(pattern.clone()))
            }
            (Scheme::Create2(_) | Scheme::Create3(_), None) => Err(MineError::InvalidPattern(
                format!("{} searches need a pattern", self.scheme.name()),
            )),
            (Scheme::EulerSwap(_) | Scheme::V4Hook(_), Some(pattern)) => {
                Err(MineError::InvalidPattern(format!(
                    "{} searches match hook permission bits, not a {} pattern",
                    self.scheme.name(),
                    pattern.kind()
                )))
            }
            (Scheme::EulerSwap(_), None) => Ok(Matcher::permissions(&EULERSWAP_PERMISSIONS)),
            (Scheme::V4Hook(p), None) => Ok(Matcher::permissions(&p.permissions)),
        }
    }
}

/// A validated config plus the pattern for text-pattern schemes.
#[derive(Debug, Clone)]
pub struct MiningJob {
    pub config: DeploymentConfig,
    pub pattern: Option<Pattern>,
}

/// `IEulerSwap.Params` as text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoolParamsRequest {
    pub vault0: String,
    pub vault1: String,
    pub euler_account: String,
    pub equilibrium_reserve0: String,
    pub equilibrium_reserve1: String,
    pub price_x: String,
    pub price_y: String,
    pub concentration_x: String,
    pub concentration_y: String,
    pub fee: String,
    pub protocol_fee: String,
    pub protocol_fee_recipient: String,
}

/// Scheme-specific request fields, tagged by `"scheme"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum SchemeRequest {
    Create2 {
        deployer: String,
        init_code_hash: String,
    },
    Create3 {
        deployer: String,
        #[serde(default)]
        caller: Option<String>,
        #[serde(default)]
        chain_id: Option<String>,
    },
    #[serde(rename = "eulerswap")]
    EulerSwap {
        factory: String,
        eulerswap_impl: String,
        pool_params: PoolParamsRequest,
    },
    #[serde(rename = "v4_hook")]
    V4Hook {
        deployer: String,
        init_code_hash: String,
        /// Flag names or a bitmask, see [`Permissions`]'s `FromStr`.
        #[serde(default)]
        permissions: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatternRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

/// A mining request as received from a caller.
///
/// ```json
/// {
///   "scheme": "create3",
///   "deployer": "0xba5ed099633d3b313e4d5f7bdc1305d3c28ba5ed",
///   "caller": "0xdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef",
///   "chain_id": "130",
///   "max_iterations": "1000000",
///   "max_results": "1",
///   "seed": "0x539",
///   "pattern": { "type": "prefix", "value": "0x2718" }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct MiningRequest {
    #[serde(flatten)]
    pub scheme: SchemeRequest,
    pub max_iterations: String,
    pub max_results: String,
    #[serde(default)]
    pub seed: Option<String>,
    #[serde(default)]
    pub pattern: Option<PatternRequest>,
}

/// Treats blank optional text the same as an absent field.
fn present(text: &Option<String>) -> Option<&str> {
    text.as_deref().map(str::trim).filter(|t| !t.is_empty())
}

fn field<T>(name: &str, parsed: std::result::Result<T, ParseError>) -> Result<T> {
    parsed.map_err(|source| MineError::config(name, source))
}

/// Parses optional seed text. Blank means absent; anything else must parse.
pub fn parse_seed(text: Option<&str>) -> Result<Option<u128>> {
    match text.map(str::trim).filter(|t| !t.is_empty()) {
        None => Ok(None),
        Some(input) => parse::parse_u128(input)
            .map(Some)
            .map_err(|source| MineError::SeedParse {
                input: input.to_string(),
                source,
            }),
    }
}

pub fn parse_max_results(text: &str) -> Result<u32> {
    let value = field("max_results", parse::parse_cap(text))?;
    u32::try_from(value).map_err(|_| {
        MineError::config(
            "max_results",
            ParseError::Integer(format!("{value} does not fit in u32")),
        )
    })
}

impl PoolParamsRequest {
    pub fn parse(&self, mode: HexMode) -> Result<PoolParams> {
        Ok(PoolParams {
            vault0: field("vault0", parse::parse_address(&self.vault0, mode))?,
            vault1: field("vault1", parse::parse_address(&self.vault1, mode))?,
            euler_account: field("euler_account", parse::parse_address(&self.euler_account, mode))?,
            equilibrium_reserve0: field(
                "equilibrium_reserve0",
                parse::parse_uint(&self.equilibrium_reserve0),
            )?,
            equilibrium_reserve1: field(
                "equilibrium_reserve1",
                parse::parse_uint(&self.equilibrium_reserve1),
            )?,
            price_x: field("price_x", parse::parse_uint(&self.price_x))?,
            price_y: field("price_y", parse::parse_uint(&self.price_y))?,
            concentration_x: field("concentration_x", parse::parse_uint(&self.concentration_x))?,
            concentration_y: field("concentration_y", parse::parse_uint(&self.concentration_y))?,
            fee: field("fee", parse::parse_uint(&self.fee))?,
            protocol_fee: field("protocol_fee", parse::parse_uint(&self.protocol_fee))?,
            protocol_fee_recipient: field(
                "protocol_fee_recipient",
                parse::parse_address(&self.protocol_fee_recipient, mode),
            )?,
        })
    }
}

impl SchemeRequest {
    pub fn parse(&self, mode: HexMode) -> Result<Scheme> {
        let scheme = match self {
            SchemeRequest::Create2 {
                deployer,
                init_code_hash,
            } => Scheme::Create2(Create2Params {
                deployer: field("deployer", parse::parse_address(deployer, mode))?,
                init_code_hash: field("init_code_hash", parse::parse_b256(init_code_hash, mode))?,
            }),
            SchemeRequest::Create3 {
                deployer,
                caller,
                chain_id,
            } => {
                let caller = present(caller)
                    .map(|c| field("caller", parse::parse_address(c, mode)))
                    .transpose()?;
                let chain_id = present(chain_id)
                    .map(|c| field("chain_id", parse::parse_u64(c)))
                    .transpose()?;
                Scheme::Create3(Create3Params {
                    deployer: field("deployer", parse::parse_address(deployer, mode))?,
                    guard: SaltGuard::new(caller, chain_id),
                })
            }
            SchemeRequest::EulerSwap {
                factory,
                eulerswap_impl,
                pool_params,
            } => Scheme::EulerSwap(EulerSwapParams {
                factory: field("factory", parse::parse_address(factory, mode))?,
                eulerswap_impl: field(
                    "eulerswap_impl",
                    parse::parse_address(eulerswap_impl, mode),
                )?,
                pool: pool_params.parse(mode)?,
            }),
            SchemeRequest::V4Hook {
                deployer,
                init_code_hash,
                permissions,
            } => Scheme::V4Hook(V4HookParams {
                deployer: field("deployer", parse::parse_address(deployer, mode))?,
                init_code_hash: field("init_code_hash", parse::parse_b256(init_code_hash, mode))?,
                permissions: field("permissions", permissions.parse::<Permissions>())?,
            }),
        };
        Ok(scheme)
    }
}

impl PatternRequest {
    pub fn parse(&self, mode: HexMode) -> Result<Pattern> {
        let kind: PatternType = self
            .kind
            .parse()
            .map_err(|_| {
                MineError::InvalidPattern(format!("unknown pattern type {:?}", self.kind))
            })?;
        Pattern::from_hex(&self.value, kind, mode)
    }
}

impl MiningRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses and validates every field. The pattern is checked against the scheme too.
    pub fn into_job(&self, mode: HexMode) -> Result<MiningJob> {
        let config = DeploymentConfig {
            scheme: self.scheme.parse(mode)?,
            max_iterations: field("max_iterations", parse::parse_cap(&self.max_iterations))?,
            max_results: parse_max_results(&self.max_results)?,
            seed: parse_seed(self.seed.as_deref())?,
        };
        config.validate()?;

        let pattern = self.pattern.as_ref().map(|p| p.parse(mode)).transpose()?;
        config.matcher(pattern.as_ref())?;

        Ok(MiningJob { config, pattern })
    }
}
