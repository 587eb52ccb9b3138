//! Configuration resolver.
//!
//! Reads `TVMRT_NUM_WORKERS` (primary) and `OMP_NUM_THREADS` (fallback,
//! consulted only on the parallel-dispatch path) to pick [`RuntimeMode`].
//! Parse-failure defaults are deliberately asymmetric between the two
//! call sites: 3 workers on the parallel-dispatch path, serial at the
//! top level. The original runtime exhibits exactly this asymmetry and
//! it's preserved here rather than smoothed over.

use std::env::VarError;

/// Name of the primary worker-count environment variable.
pub const PRIMARY_VAR: &str = "TVMRT_NUM_WORKERS";
/// Name of the fallback worker-count environment variable, consulted
/// only from the parallel-dispatch path.
pub const FALLBACK_VAR: &str = "OMP_NUM_THREADS";
/// Default worker count used when the parallel-dispatch path's fallback
/// variable is unset or unparsable.
pub const PARALLEL_DISPATCH_DEFAULT_WORKERS: usize = 3;

/// The resolved execution mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    /// No worker threads; drive the graph with [`crate::driver::run`]'s
    /// serial fallback.
    Serial,
    /// Spawn a scheduler thread plus this many worker threads.
    Parallel(usize),
}

/// Pure resolution logic, taking the two variable values as already-read
/// `Option<String>`s so it's trivially unit-testable without touching
/// real process environment.
///
/// - `TVMRT_NUM_WORKERS` unset, or `0`, or unparsable: [`RuntimeMode::Serial`].
/// - `TVMRT_NUM_WORKERS` a positive integer: [`RuntimeMode::Parallel`] with
///   that count.
/// - (The `OMP_NUM_THREADS` fallback belongs to the parallel-dispatch
///   path, not this top-level resolution -- see
///   [`resolve_parallel_dispatch_workers`].)
pub fn resolve(primary: Option<&str>) -> RuntimeMode {
    match primary.map(str::parse::<i64>) {
        Some(Ok(n)) if n > 0 => RuntimeMode::Parallel(n as usize),
        _ => RuntimeMode::Serial,
    }
}

/// Resolve from the real process environment.
pub fn resolve_from_env() -> RuntimeMode {
    let primary = std::env::var(PRIMARY_VAR);
    resolve(primary.as_deref().ok())
}

/// Worker count for the *parallel-dispatch* path: the
/// `OMP_NUM_THREADS`-aware resolution used from inside the
/// parallel-dispatch path specifically, with a default of `3` rather
/// than serial when both variables are absent or unparsable.
pub fn resolve_parallel_dispatch_workers(
    primary: Result<String, VarError>,
    fallback: Result<String, VarError>,
) -> usize {
    if let Ok(n) = primary.as_deref().unwrap_or("").parse::<i64>() {
        if n > 0 {
            return n as usize;
        }
    }
    if let Ok(n) = fallback.as_deref().unwrap_or("").parse::<i64>() {
        if n > 0 {
            return n as usize;
        }
    }
    PARALLEL_DISPATCH_DEFAULT_WORKERS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_is_serial() {
        assert_eq!(resolve(None), RuntimeMode::Serial);
    }

    #[test]
    fn zero_is_serial() {
        assert_eq!(resolve(Some("0")), RuntimeMode::Serial);
    }

    #[test]
    fn negative_is_serial() {
        assert_eq!(resolve(Some("-4")), RuntimeMode::Serial);
    }

    #[test]
    fn malformed_is_serial() {
        assert_eq!(resolve(Some("not-a-number")), RuntimeMode::Serial);
    }

    #[test]
    fn positive_is_parallel() {
        assert_eq!(resolve(Some("4")), RuntimeMode::Parallel(4));
    }

    #[test]
    fn parallel_dispatch_prefers_primary() {
        let workers = resolve_parallel_dispatch_workers(Ok("5".to_string()), Ok("8".to_string()));
        assert_eq!(workers, 5);
    }

    #[test]
    fn parallel_dispatch_falls_back_to_omp() {
        let workers = resolve_parallel_dispatch_workers(Err(VarError::NotPresent), Ok("8".to_string()));
        assert_eq!(workers, 8);
    }

    #[test]
    fn parallel_dispatch_defaults_to_three() {
        let workers =
            resolve_parallel_dispatch_workers(Err(VarError::NotPresent), Err(VarError::NotPresent));
        assert_eq!(workers, PARALLEL_DISPATCH_DEFAULT_WORKERS);
    }

    #[test]
    fn parallel_dispatch_defaults_to_three_on_malformed_both() {
        let workers = resolve_parallel_dispatch_workers(
            Ok("nope".to_string()),
            Ok("also-nope".to_string()),
        );
        assert_eq!(workers, PARALLEL_DISPATCH_DEFAULT_WORKERS);
    }
}
