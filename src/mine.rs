//! The parallel salt search.
//!
//! A run partitions one seeded [`SaltStream`] across a fixed pool of workers
//! and advances them in epochs. Within an epoch every worker evaluates up to
//! `batch_size` salts of its own substream without talking to the others.
//! Between epochs the engine folds the workers' matches, in worker-id order,
//! into the capped result list and decides whether to stop. This keeps the hot
//! loop lock-free and makes the output a pure function of config, seed, worker
//! count and batch size.
//!
//! The shared stop flag is raised only when a run aborts. Filling the result
//! cap does not interrupt the other workers mid-epoch: each runs on until its
//! own hits fill the slots that were open when the epoch began, or its batch
//! ends. A run with many workers therefore evaluates more salts past the last
//! accepted hit than a single-worker run, in exchange for reproducible output.

use crate::config::{DeploymentConfig, MiningJob};
use crate::derive::AddressDeriver;
use crate::error::{MineError, Result};
use crate::guard::SaltGuard;
use crate::pattern::{Matcher, Pattern};
use crate::salt::{SaltStream, random_seed};
use alloy_primitives::{Address, B256};
use log::{debug, info};
use rayon::prelude::{IntoParallelRefMutIterator, ParallelIterator};
use serde::{Serialize, Serializer};
use std::{
    fmt,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

/// Salts each worker evaluates per epoch unless told otherwise.
pub const DEFAULT_BATCH_SIZE: u64 = 4096;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    ResultsFull,
    IterationsExhausted,
}

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running,
    Stopped(StopReason),
}

impl EngineState {
    fn advance(&mut self, next: EngineState) -> Result<()> {
        match (*self, next) {
            (EngineState::Idle, EngineState::Running)
            | (EngineState::Running, EngineState::Stopped(_)) => {
                *self = next;
                Ok(())
            }
            (from, to) => Err(MineError::InternalInvariantViolation(format!(
                "illegal engine transition {from:?} -> {to:?}"
            ))),
        }
    }
}

/// A salt whose derived address satisfied the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MiningResult {
    #[serde(serialize_with = "serialize_address")]
    pub computed_address: Address,
    /// The salt as emitted by the salt stream.
    #[serde(serialize_with = "serialize_hex")]
    pub salt: B256,
    /// The salt actually hashed by the deployer, present only when guarding applied.
    #[serde(
        serialize_with = "serialize_opt_hex",
        skip_serializing_if = "Option::is_none"
    )]
    pub guarded_salt: Option<B256>,
}

impl MiningResult {
    /// The salt the address derivation consumed.
    pub fn deployed_salt(&self) -> B256 {
        self.guarded_salt.unwrap_or(self.salt)
    }
}

impl fmt::Display for MiningResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "address 0x{} salt 0x{}",
            hex::encode(self.computed_address.as_slice()),
            hex::encode(self.salt.as_slice())
        )?;
        if let Some(guarded) = self.guarded_salt {
            write!(f, " guarded 0x{}", hex::encode(guarded.as_slice()))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MiningOutput {
    /// Matches in discovery order, at most `max_results` of them.
    pub results: Vec<MiningResult>,
    /// Exact number of salts evaluated across all workers.
    pub total_iterations: u64,
    pub stop_reason: StopReason,
    /// The seed the run used, drawn at random if the config had none.
    #[serde(serialize_with = "serialize_decimal")]
    pub seed: u128,
    #[serde(serialize_with = "serialize_millis", rename = "elapsed_ms")]
    pub elapsed: Duration,
}

impl MiningOutput {
    /// Salts evaluated per second of wall time.
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total_iterations as f64 / secs
        } else {
            0.0
        }
    }
}

fn serialize_address<S: Serializer>(value: &Address, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("0x{}", hex::encode(value.as_slice())))
}

fn serialize_hex<S: Serializer>(value: &B256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("0x{}", hex::encode(value.as_slice())))
}

fn serialize_opt_hex<S: Serializer>(
    value: &Option<B256>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serialize_hex(value, serializer),
        None => serializer.serialize_none(),
    }
}

// u128 does not survive a round trip through JavaScript numbers.
fn serialize_decimal<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

fn serialize_millis<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(value.as_millis().try_into().unwrap_or(u64::MAX))
}

/// Tuning knobs that do not change what a run searches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Number of parallel workers, each owning one substream.
    pub workers: usize,
    /// Salts per worker per epoch.
    pub batch_size: u64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// The only state workers share during a run.
struct RunState {
    results: Mutex<Vec<MiningResult>>,
    iterations: AtomicU64,
    /// Raised on abort only. A full result list is detected between epochs.
    stop: AtomicBool,
    max_results: usize,
    max_iterations: u64,
}

impl RunState {
    fn new(max_results: usize, max_iterations: u64) -> Self {
        Self {
            results: Mutex::new(Vec::with_capacity(max_results.min(1024))),
            iterations: AtomicU64::new(0),
            stop: AtomicBool::new(false),
            max_results,
            max_iterations,
        }
    }

    #[inline]
    fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Stops every worker and reports the violation.
    fn abort(&self, message: String) -> MineError {
        self.stop();
        MineError::InternalInvariantViolation(message)
    }

    /// Adds a worker's evaluated count to the shared counter.
    fn record_iterations(&self, evaluated: u64) -> Result<u64> {
        let total = self
            .iterations
            .fetch_add(evaluated, Ordering::SeqCst)
            .saturating_add(evaluated);
        if total > self.max_iterations {
            return Err(self.abort(format!(
                "{total} iterations recorded, cap is {}",
                self.max_iterations
            )));
        }
        Ok(total)
    }

    fn total_iterations(&self) -> u64 {
        self.iterations.load(Ordering::SeqCst)
    }

    /// Appends `result` unless the list is already full. The length check and
    /// the push happen under one lock, so racing callers never overfill it.
    fn try_accept(&self, result: MiningResult) -> Result<bool> {
        let mut results = self
            .results
            .lock()
            .map_err(|_| self.abort("result list lock poisoned".to_string()))?;
        if results.len() >= self.max_results {
            return Ok(false);
        }
        results.push(result);
        Ok(true)
    }

    fn accepted(&self) -> Result<usize> {
        let results = self
            .results
            .lock()
            .map_err(|_| self.abort("result list lock poisoned".to_string()))?;
        Ok(results.len())
    }

    fn into_results(self) -> Result<Vec<MiningResult>> {
        self.results.into_inner().map_err(|_| {
            MineError::InternalInvariantViolation("result list lock poisoned".to_string())
        })
    }
}

/// One worker: a substream plus its own copy of everything the hot loop touches.
struct Worker {
    id: usize,
    stream: SaltStream,
    deriver: AddressDeriver,
    guard: SaltGuard,
    matcher: Matcher,
}

impl Worker {
    /// Whether the substream has no index below the iteration cap left.
    fn exhausted(&self, max_iterations: u64) -> bool {
        !matches!(self.stream.next_index(), Some(index) if index < max_iterations)
    }

    /// Evaluates up to `batch` salts and returns the matches, in order.
    ///
    /// Stops early on the shared stop flag, at the iteration cap, or once its
    /// own matches fill `open_slots`: later matches from this worker in the
    /// same epoch could never be accepted.
    fn run_epoch(
        &mut self,
        state: &RunState,
        batch: u64,
        open_slots: usize,
    ) -> Result<Vec<MiningResult>> {
        let mut found = Vec::new();
        let mut evaluated = 0u64;

        while evaluated < batch && !state.is_stopped() && !self.exhausted(state.max_iterations) {
            let Some(salt) = self.stream.next() else {
                break;
            };
            let guarded_salt = self.guard.guard(&salt);
            let computed_address = self
                .deriver
                .compute_address(guarded_salt.as_ref().unwrap_or(&salt));
            evaluated += 1;

            if self.matcher.matches(&computed_address) {
                found.push(MiningResult {
                    computed_address,
                    salt,
                    guarded_salt,
                });
                if found.len() >= open_slots {
                    break;
                }
            }
        }

        state.record_iterations(evaluated)?;
        Ok(found)
    }
}

/// Runs searches. Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct MiningEngine {
    options: EngineOptions,
}

impl MiningEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    pub fn run(&self, job: &MiningJob) -> Result<MiningOutput> {
        self.mine(&job.config, job.pattern.as_ref())
    }

    /// Searches for salts whose derived address satisfies the scheme's matcher.
    ///
    /// # Errors
    ///
    /// Fails before any work with `InvalidConfig`/`InvalidPattern` when the
    /// config or pattern is unusable, and aborts with
    /// `InternalInvariantViolation` if the run's bookkeeping goes wrong.
    pub fn mine(
        &self,
        config: &DeploymentConfig,
        pattern: Option<&Pattern>,
    ) -> Result<MiningOutput> {
        let mut engine_state = EngineState::Idle;

        config.validate()?;
        let matcher = config.matcher(pattern)?;
        let max_results = config.max_results as usize;
        let max_iterations = config.max_iterations;
        let workers = self.options.workers.max(1);
        let batch = self.options.batch_size.max(1);
        let seed = config.seed.unwrap_or_else(random_seed);

        let mut stream = SaltStream::new(seed);
        if let Some(header) = config.scheme.salt_header() {
            stream = stream.with_header(&header);
        }
        let deriver = config.scheme.deriver();
        let guard = config.scheme.guard();
        let mut pool_workers: Vec<Worker> = stream
            .substreams(workers)
            .into_iter()
            .enumerate()
            .map(|(id, stream)| Worker {
                id,
                stream,
                deriver,
                guard,
                matcher: matcher.clone(),
            })
            .collect();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("vanity-miner-{i}"))
            .build()?;
        let state = RunState::new(max_results, max_iterations);

        engine_state.advance(EngineState::Running)?;
        info!(
            "mining {} with {workers} workers, seed {seed:#x}, max {max_iterations} iterations, max {max_results} results",
            config.scheme
        );
        if let Some(pattern) = pattern {
            debug!(
                "pattern {pattern}: ~{:.0} salts per hit",
                pattern.expected_attempts()
            );
        }

        let started = Instant::now();
        let mut epoch = 0u64;
        let reason = loop {
            let open_slots = max_results.saturating_sub(state.accepted()?);
            let reports: Vec<Vec<MiningResult>> = pool.install(|| {
                pool_workers
                    .par_iter_mut()
                    .map(|worker| worker.run_epoch(&state, batch, open_slots))
                    .collect::<Result<_>>()
            })?;

            for (worker, found) in pool_workers.iter().zip(reports) {
                for result in found {
                    if !state.try_accept(result.clone())? {
                        break;
                    }
                    debug!("worker {} found {result}", worker.id);
                }
            }
            epoch += 1;

            if state.accepted()? >= max_results {
                break StopReason::ResultsFull;
            }
            if pool_workers.iter().all(|w| w.exhausted(max_iterations)) {
                break StopReason::IterationsExhausted;
            }
            debug!(
                "epoch {epoch} done, {} iterations so far",
                state.total_iterations()
            );
        };
        state.stop();
        engine_state.advance(EngineState::Stopped(reason))?;

        let elapsed = started.elapsed();
        let total_iterations = state.total_iterations();
        let results = state.into_results()?;
        if results.len() > max_results || total_iterations > max_iterations {
            return Err(MineError::InternalInvariantViolation(format!(
                "run ended with {} results and {total_iterations} iterations",
                results.len()
            )));
        }

        let output = MiningOutput {
            results,
            total_iterations,
            stop_reason: reason,
            seed,
            elapsed,
        };
        info!(
            "stopped ({reason:?}) after {total_iterations} iterations in {epoch} epochs: {} results in {elapsed:.2?} ({:.0} salts/s)",
            output.results.len(),
            output.rate()
        );
        Ok(output)
    }
}

/// Mines with default engine options.
pub fn mine(config: &DeploymentConfig, pattern: Option<&Pattern>) -> Result<MiningOutput> {
    MiningEngine::default().mine(config, pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::{
        Create2Params, Create3Params, EulerSwapParams, Scheme, V4HookParams, create3_address,
    };
    use crate::hash::keccak256;
    use crate::pattern::{PatternType, Permissions, matches_permissions};
    use crate::pool::{EULERSWAP_PERMISSIONS, tests::sample_params};
    use alloy_primitives::address;
    use std::collections::HashSet;

    const DEPLOYER: Address = address!("ba5ed099633d3b313e4d5f7bdc1305d3c28ba5ed");
    const CALLER: Address = address!("DeaDbeefdEAdbeefdEadbEEFdeadbeEFdEaDbeeF");

    fn engine(workers: usize, batch_size: u64) -> MiningEngine {
        MiningEngine::new(EngineOptions {
            workers,
            batch_size,
        })
    }

    fn create2(max_iterations: u64, max_results: u32) -> DeploymentConfig {
        DeploymentConfig::new(
            Scheme::Create2(Create2Params {
                deployer: DEPLOYER,
                init_code_hash: keccak256([0x00u8]),
            }),
            max_iterations,
            max_results,
        )
        .unwrap()
        .with_seed(1234)
    }

    fn pattern(bytes: &[u8], kind: PatternType) -> Pattern {
        Pattern::new(bytes, kind).unwrap()
    }

    #[test]
    fn same_seed_same_output() {
        let config = create2(50_000, 5);
        let prefix = pattern(&[0xab], PatternType::Prefix);

        let a = engine(4, 64).mine(&config, Some(&prefix)).unwrap();
        let b = engine(4, 64).mine(&config, Some(&prefix)).unwrap();

        assert_eq!(a.results, b.results);
        assert_eq!(a.total_iterations, b.total_iterations);
        assert_eq!(a.seed, 1234);
        assert!(!a.results.is_empty());
        for result in &a.results {
            assert!(prefix.matches(&result.computed_address));
            assert_eq!(config.scheme.derive(&result.salt), result.computed_address);
            assert_eq!(result.guarded_salt, None);
        }
    }

    #[test]
    fn result_cap_counts_only_evaluated_salts() {
        let config = create2(1_000, 5);
        let everything = pattern(&[], PatternType::Prefix);

        let output = engine(4, 16).mine(&config, Some(&everything)).unwrap();

        assert_eq!(output.stop_reason, StopReason::ResultsFull);
        assert_eq!(output.results.len(), 5);
        // every worker stops once its own hits fill the five open slots
        assert_eq!(output.total_iterations, 4 * 5);

        // results come from worker 0 first, in its local order
        let stream = SaltStream::new(1234);
        for (i, result) in output.results.iter().enumerate() {
            assert_eq!(result.salt, stream.salt_at(4 * i as u64));
        }
    }

    #[test]
    fn iteration_cap_is_exact() {
        let impossible = pattern(&[0xff; 20], PatternType::Prefix);
        let cases = [(1_000, 3, 64), (1_001, 3, 64), (7, 4, 1), (500, 1, 1000)];
        for (max_iterations, workers, batch) in cases {
            let config = create2(max_iterations, 1);
            let output = engine(workers, batch).mine(&config, Some(&impossible)).unwrap();
            assert_eq!(output.stop_reason, StopReason::IterationsExhausted);
            assert_eq!(output.total_iterations, max_iterations);
            assert!(output.results.is_empty());
        }
    }

    #[test]
    fn results_never_exceed_cap() {
        let config = create2(2_000, 3);
        let loose = pattern(&[0x0], PatternType::Contains);
        let output = engine(8, 32).mine(&config, Some(&loose)).unwrap();
        assert!(output.results.len() <= 3);
        assert!(output.total_iterations <= 2_000);
    }

    #[test]
    fn workers_evaluate_distinct_salts() {
        let config = create2(4_000, 4_000);
        let everything = pattern(&[], PatternType::Contains);
        let output = engine(5, 8).mine(&config, Some(&everything)).unwrap();

        assert_eq!(output.results.len(), 4_000);
        let unique: HashSet<B256> = output.results.iter().map(|r| r.salt).collect();
        assert_eq!(unique.len(), 4_000);
    }

    #[test]
    fn guarded_results_rederive() {
        let config = DeploymentConfig::new(
            Scheme::Create3(Create3Params {
                deployer: DEPLOYER,
                guard: SaltGuard::new(Some(CALLER), Some(130)),
            }),
            100_000,
            3,
        )
        .unwrap()
        .with_seed(1234);
        let prefix = pattern(&[0x27], PatternType::Prefix);

        let output = engine(2, 256).mine(&config, Some(&prefix)).unwrap();
        assert!(!output.results.is_empty());

        let guard = config.scheme.guard();
        for result in &output.results {
            let guarded = result.guarded_salt.expect("guard applied");
            assert_eq!(guard.guard(&result.salt), Some(guarded));
            assert_eq!(create3_address(DEPLOYER, guarded), result.computed_address);
            assert_eq!(config.scheme.derive(&result.deployed_salt()), result.computed_address);
            assert!(result.computed_address.starts_with(&[0x27]));
            assert_eq!(&result.salt[..20], CALLER.as_slice());
            assert_eq!(result.salt[20], 0x01);
        }
    }

    #[test]
    fn unguarded_create3_uses_raw_salt() {
        let config = DeploymentConfig::new(
            Scheme::Create3(Create3Params {
                deployer: DEPLOYER,
                guard: SaltGuard::default(),
            }),
            100_000,
            2,
        )
        .unwrap()
        .with_seed(99);
        let suffix = pattern(&[0xbe], PatternType::Suffix);

        let output = engine(3, 128).mine(&config, Some(&suffix)).unwrap();
        assert!(!output.results.is_empty());
        for result in &output.results {
            assert_eq!(result.guarded_salt, None);
            assert_eq!(create3_address(DEPLOYER, result.salt), result.computed_address);
            assert!(result.computed_address.ends_with(&[0xbe]));
        }
    }

    #[test]
    fn v4_hook_results_carry_exact_permissions() {
        let permissions: Permissions = "before-swap,after-add-liquidity,after-swap-return-delta"
            .parse()
            .unwrap();
        let config = DeploymentConfig::new(
            Scheme::V4Hook(V4HookParams {
                deployer: DEPLOYER,
                init_code_hash: keccak256([0x60u8, 0x80]),
                permissions,
            }),
            150_000,
            3,
        )
        .unwrap()
        .with_seed(7);

        let output = engine(4, 1024).mine(&config, None).unwrap();
        assert!(!output.results.is_empty());
        for result in &output.results {
            let address = result.computed_address;
            let low = u16::from_be_bytes([address[18], address[19]]);
            assert_eq!(low & crate::pattern::ALL_HOOK_MASK, permissions.to_flags());
            assert!(matches_permissions(&result.computed_address, &permissions));
        }
    }

    #[test]
    fn eulerswap_results_are_valid_pool_hooks() {
        let params = EulerSwapParams {
            factory: address!("0xFb9FE66472917F0F8966506A3bf831Ac0c10caD4"),
            eulerswap_impl: address!("0xF5d35536482f62c9031b4d6bD34724671BCE33d1"),
            pool: sample_params(),
        };
        let config = DeploymentConfig::new(Scheme::EulerSwap(params), 150_000, 1)
            .unwrap()
            .with_seed(2024);

        let output = engine(4, 1024).mine(&config, None).unwrap();
        assert_eq!(output.results.len(), 1);
        let result = &output.results[0];
        assert!(matches_permissions(&result.computed_address, &EULERSWAP_PERMISSIONS));
        assert_eq!(config.scheme.derive(&result.salt), result.computed_address);
    }

    #[test]
    fn random_seed_is_reported_and_reproducible() {
        let mut config = create2(3_000, 2);
        config.seed = None;
        let prefix = pattern(&[0x1], PatternType::Contains);

        let first = engine(2, 100).mine(&config, Some(&prefix)).unwrap();
        let replay = engine(2, 100)
            .mine(&config.clone().with_seed(first.seed), Some(&prefix))
            .unwrap();
        assert_eq!(first.results, replay.results);
        assert_eq!(first.total_iterations, replay.total_iterations);
    }

    #[test]
    fn invalid_inputs_fail_before_mining() {
        let mut config = create2(10, 1);
        config.max_iterations = 0;
        let prefix = pattern(&[0xab], PatternType::Prefix);
        assert!(matches!(
            engine(1, 1).mine(&config, Some(&prefix)),
            Err(MineError::InvalidConfig { .. })
        ));

        let config = create2(10, 1);
        assert!(matches!(
            engine(1, 1).mine(&config, None),
            Err(MineError::InvalidPattern(_))
        ));
    }

    #[test]
    fn capped_append_under_contention() {
        let state = RunState::new(10, u64::MAX);
        let result = MiningResult {
            computed_address: Address::ZERO,
            salt: B256::ZERO,
            guarded_salt: None,
        };

        let accepted = AtomicU64::new(0);
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..100 {
                        if state.try_accept(result.clone()).unwrap() {
                            accepted.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                });
            }
        });

        assert_eq!(accepted.load(Ordering::Relaxed), 10);
        assert_eq!(state.into_results().unwrap().len(), 10);
    }

    #[test]
    fn over_recording_aborts_the_run() {
        let state = RunState::new(1, 10);
        assert_eq!(state.record_iterations(10).unwrap(), 10);
        assert!(matches!(
            state.record_iterations(1),
            Err(MineError::InternalInvariantViolation(_))
        ));
        assert!(state.is_stopped());
    }

    #[test]
    fn engine_state_transitions() {
        let mut state = EngineState::Idle;
        assert!(state.advance(EngineState::Stopped(StopReason::ResultsFull)).is_err());
        state.advance(EngineState::Running).unwrap();
        state
            .advance(EngineState::Stopped(StopReason::IterationsExhausted))
            .unwrap();
        assert!(state.advance(EngineState::Running).is_err());
    }

    #[test]
    fn output_serializes_as_hex_strings() {
        let output = MiningOutput {
            results: vec![MiningResult {
                computed_address: address!("0x00000000000000000000000000000000000000ab"),
                salt: B256::repeat_byte(0x01),
                guarded_salt: None,
            }],
            total_iterations: 42,
            stop_reason: StopReason::ResultsFull,
            seed: u128::MAX,
            elapsed: Duration::from_millis(1500),
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(
            json["results"][0]["computed_address"],
            "0x00000000000000000000000000000000000000ab"
        );
        assert_eq!(json["results"][0]["salt"], format!("0x{}", "01".repeat(32)));
        assert!(json["results"][0].get("guarded_salt").is_none());
        assert_eq!(json["total_iterations"], 42);
        assert_eq!(json["stop_reason"], "results_full");
        assert_eq!(json["seed"], u128::MAX.to_string());
        assert_eq!(json["elapsed_ms"], 1500);
    }
}
