use std::num::NonZeroUsize;
use std::thread;

/// Environment variable consulted when `--jobs` is not given.
pub const JOBS_ENV: &str = "SPYDER_INDEX_JOBS";

/// Resolve the worker count: `--jobs`, then `$SPYDER_INDEX_JOBS`, then CPU count.
pub fn resolve_jobs(cli_jobs: Option<usize>) -> usize {
    resolve_jobs_from_env(cli_jobs, |key| std::env::var(key).ok())
}

fn resolve_jobs_from_env<F>(cli_jobs: Option<usize>, get_env: F) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(jobs) = cli_jobs
        && jobs > 0
    {
        return jobs;
    }

    if let Some(jobs) = get_env(JOBS_ENV)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|jobs| *jobs > 0)
    {
        return jobs;
    }

    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
