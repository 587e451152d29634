use std::path::PathBuf;
use vanity_miner::{
    EngineOptions, HexMode, MiningRequest,
    config::{PatternRequest, PoolParamsRequest, SchemeRequest},
    mine::DEFAULT_BATCH_SIZE,
};

/// The standard CREATE2 factory address on Ethereum.
/// See: https://github.com/Arachnid/deterministic-deployment-proxy
const CREATE2_DEFAULT_FACTORY: &str = "0x4e59b44847b379578588920cA78FbF26c0B4956C";

/// The CreateX factory, deployed at the same address on every supported chain.
/// See: https://github.com/pcaversaccio/createx
const CREATEX_FACTORY: &str = "0xba5Ed099633D3B313e4D5F7bdc1305d3c28ba5Ed";

const DEFAULT_MAX_ITERATIONS: &str = "10000000";
const DEFAULT_MAX_RESULTS: &str = "1";

/// Command-line interface for the salt miner.
///
/// Every address, hash and integer is taken as text (decimal or `0x`-hex) and
/// validated before mining starts.
#[derive(Clone, Debug, clap::Parser)]
#[command(
    name = "vanity-miner",
    version,
    about = "Fast salt miner for CREATE2, CREATE3, EulerSwap pool and Uniswap V4 hook addresses."
)]
pub(super) struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Clone, Debug, clap::Subcommand)]
pub(super) enum Command {
    /// Mines a CREATE2 salt whose address matches a hex pattern.
    Create2 {
        /// Address of the deploying factory.
        #[arg(long, default_value = CREATE2_DEFAULT_FACTORY)]
        deployer: String,

        /// Keccak256 hash of the contract's initialization code.
        #[arg(long)]
        init_code_hash: String,

        #[command(flatten)]
        pattern: PatternArgs,
    },

    /// Mines a CreateX CREATE3 salt whose address matches a hex pattern.
    ///
    /// The address does not depend on the init code. Passing `--caller`
    /// and/or `--chain-id` enables CreateX's salt guard.
    Create3 {
        /// Address of the CreateX factory.
        #[arg(long, default_value = CREATEX_FACTORY)]
        deployer: String,

        /// Only this caller may deploy with the mined salt.
        #[arg(long)]
        caller: Option<String>,

        /// Bind the mined salt to this chain.
        #[arg(long)]
        chain_id: Option<String>,

        #[command(flatten)]
        pattern: PatternArgs,
    },

    /// Mines an EulerSwap pool salt whose address carries the pool's hook permissions.
    Eulerswap {
        /// Address of the EulerSwap factory.
        #[arg(long)]
        factory: String,

        /// Address of the EulerSwap implementation the pool proxies to.
        #[arg(long)]
        eulerswap_impl: String,

        #[command(flatten)]
        pool: PoolArgs,
    },

    /// Mines a CREATE2 salt for a Uniswap V4 hook with exactly the given permissions.
    V4Hook {
        /// Address of the deploying factory.
        #[arg(long, default_value = CREATE2_DEFAULT_FACTORY)]
        deployer: String,

        /// Keccak256 hash of the hook's initialization code.
        #[arg(long)]
        init_code_hash: String,

        /// Comma-separated flag names (e.g. `before-swap,after-swap`) or a bitmask.
        #[arg(long)]
        permissions: String,
    },

    /// Runs a mining request read from a JSON file.
    ///
    /// Caps and seed given on the command line override the file's.
    Request {
        /// Path to the JSON request.
        path: PathBuf,
    },
}

/// Target pattern for text-pattern schemes.
#[derive(Clone, Debug, clap::Args)]
pub(super) struct PatternArgs {
    /// Hex pattern the address must contain, up to 20 bytes.
    #[arg(long)]
    pub pattern: String,

    /// Where in the address the pattern must appear.
    #[arg(long, default_value = "prefix", value_parser = ["prefix", "suffix", "contains"])]
    pub pattern_type: String,
}

/// `IEulerSwap.Params` fields.
#[derive(Clone, Debug, clap::Args)]
pub(super) struct PoolArgs {
    #[arg(long)]
    pub vault0: String,
    #[arg(long)]
    pub vault1: String,
    #[arg(long)]
    pub euler_account: String,
    #[arg(long)]
    pub equilibrium_reserve0: String,
    #[arg(long)]
    pub equilibrium_reserve1: String,
    #[arg(long)]
    pub price_x: String,
    #[arg(long)]
    pub price_y: String,
    #[arg(long)]
    pub concentration_x: String,
    #[arg(long)]
    pub concentration_y: String,
    #[arg(long)]
    pub fee: String,
    #[arg(long)]
    pub protocol_fee: String,
    #[arg(long)]
    pub protocol_fee_recipient: String,
}

/// Flags shared by every subcommand.
#[derive(Clone, Debug, clap::Args)]
pub(super) struct RunArgs {
    /// Maximum number of salts to evaluate [default: 10000000].
    #[arg(long, global = true)]
    pub max_iterations: Option<String>,

    /// Maximum number of matching salts to report [default: 1].
    #[arg(long, global = true)]
    pub max_results: Option<String>,

    /// 128-bit seed of the salt stream. Random when omitted.
    #[arg(long, global = true)]
    pub seed: Option<String>,

    /// Number of worker threads. Defaults to the number of CPUs.
    #[arg(long, global = true)]
    pub workers: Option<usize>,

    /// Salts each worker evaluates between synchronization points.
    #[arg(long, global = true, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: u64,

    /// Pad odd-length hex with a leading zero instead of rejecting it.
    #[arg(long, global = true)]
    pub lenient_hex: bool,

    /// Print the output as JSON.
    #[arg(long, global = true)]
    pub json: bool,
}

impl RunArgs {
    pub fn hex_mode(&self) -> HexMode {
        if self.lenient_hex {
            HexMode::PadOdd
        } else {
            HexMode::Strict
        }
    }

    pub fn engine_options(&self) -> EngineOptions {
        let defaults = EngineOptions::default();
        EngineOptions {
            workers: self.workers.unwrap_or(defaults.workers),
            batch_size: self.batch_size,
        }
    }

    /// Applies command-line caps and seed on top of `request`.
    fn apply(&self, mut request: MiningRequest) -> MiningRequest {
        if let Some(max_iterations) = &self.max_iterations {
            request.max_iterations = max_iterations.clone();
        }
        if let Some(max_results) = &self.max_results {
            request.max_results = max_results.clone();
        }
        if self.seed.is_some() {
            request.seed = self.seed.clone();
        }
        request
    }
}

impl PatternArgs {
    fn request(&self) -> PatternRequest {
        PatternRequest {
            kind: self.pattern_type.clone(),
            value: self.pattern.clone(),
        }
    }
}

impl From<PoolArgs> for PoolParamsRequest {
    fn from(pool: PoolArgs) -> Self {
        PoolParamsRequest {
            vault0: pool.vault0,
            vault1: pool.vault1,
            euler_account: pool.euler_account,
            equilibrium_reserve0: pool.equilibrium_reserve0,
            equilibrium_reserve1: pool.equilibrium_reserve1,
            price_x: pool.price_x,
            price_y: pool.price_y,
            concentration_x: pool.concentration_x,
            concentration_y: pool.concentration_y,
            fee: pool.fee,
            protocol_fee: pool.protocol_fee,
            protocol_fee_recipient: pool.protocol_fee_recipient,
        }
    }
}

impl Cli {
    /// Turns the parsed command line into a textual mining request.
    pub fn into_request(self) -> Result<MiningRequest, Box<dyn std::error::Error>> {
        let (scheme, pattern) = match self.command {
            Command::Request { path } => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|e| format!("reading {}: {e}", path.display()))?;
                return Ok(self.run.apply(MiningRequest::from_json(&json)?));
            }
            Command::Create2 {
                deployer,
                init_code_hash,
                pattern,
            } => (
                SchemeRequest::Create2 {
                    deployer,
                    init_code_hash,
                },
                Some(pattern.request()),
            ),
            Command::Create3 {
                deployer,
                caller,
                chain_id,
                pattern,
            } => (
                SchemeRequest::Create3 {
                    deployer,
                    caller,
                    chain_id,
                },
                Some(pattern.request()),
            ),
            Command::Eulerswap {
                factory,
                eulerswap_impl,
                pool,
            } => (
                SchemeRequest::EulerSwap {
                    factory,
                    eulerswap_impl,
                    pool_params: pool.into(),
                },
                None,
            ),
            Command::V4Hook {
                deployer,
                init_code_hash,
                permissions,
            } => (
                SchemeRequest::V4Hook {
                    deployer,
                    init_code_hash,
                    permissions,
                },
                None,
            ),
        };

        Ok(MiningRequest {
            scheme,
            max_iterations: self
                .run
                .max_iterations
                .unwrap_or_else(|| DEFAULT_MAX_ITERATIONS.to_string()),
            max_results: self
                .run
                .max_results
                .unwrap_or_else(|| DEFAULT_MAX_RESULTS.to_string()),
            seed: self.run.seed,
            pattern,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("vanity-miner").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn create3_defaults_to_createx() {
        let cli = parse(&["create3", "--pattern", "0xdead", "--seed", "7"]);
        let job = cli.into_request().unwrap().into_job(HexMode::Strict).unwrap();
        assert_eq!(job.config.max_iterations, 10_000_000);
        assert_eq!(job.config.max_results, 1);
        assert_eq!(job.config.seed, Some(7));
        assert_eq!(job.config.scheme.name(), "create3");
        assert!(job.pattern.is_some());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&[
            "v4-hook",
            "--init-code-hash",
            "0x0000000000000000000000000000000000000000000000000000000000000000",
            "--permissions",
            "before-swap,after-swap",
            "--workers",
            "3",
            "--max-results",
            "4",
            "--json",
        ]);
        assert!(cli.run.json);
        assert_eq!(cli.run.engine_options().workers, 3);
        assert_eq!(cli.run.engine_options().batch_size, DEFAULT_BATCH_SIZE);
        let job = cli.into_request().unwrap().into_job(HexMode::Strict).unwrap();
        assert_eq!(job.config.max_results, 4);
        assert!(job.pattern.is_none());
    }

    #[test]
    fn rejects_unknown_pattern_type() {
        let args = [
            "vanity-miner",
            "create2",
            "--init-code-hash",
            "0x00",
            "--pattern",
            "ab",
            "--pattern-type",
            "middle",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
