//! Uniform sampling of distinct records.

use rand::Rng;
use thiserror::Error;

/// Number of records picked for a random team.
pub const DEFAULT_SAMPLE_SIZE: usize = 3;

/// Errors that can occur while sampling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SampleError {
    #[error("Cannot pick {requested} distinct records from {available} available")]
    InsufficientPopulation { requested: usize, available: usize },
}

/// Pick `count` distinct elements of `population` uniformly at random.
///
/// Draws a position in `1..=N`, shifts it to a zero-based index and keeps
/// the element unless an equal one was already picked. Fails up front when
/// the population does not hold `count` distinct elements.
pub fn sample_distinct<T, R>(
    rng: &mut R,
    population: &[T],
    count: usize,
) -> Result<Vec<T>, SampleError>
where
    T: PartialEq + Clone,
    R: Rng + ?Sized,
{
    let available = distinct_up_to(population, count);
    if available < count {
        return Err(SampleError::InsufficientPopulation {
            requested: count,
            available,
        });
    }

    let size = population.len();
    let mut picked: Vec<T> = Vec::with_capacity(count);
    while picked.len() < count {
        let index = rng.random_range(1..=size) - 1;
        let candidate = &population[index];
        if picked.contains(candidate) {
            continue;
        }
        picked.push(candidate.clone());
    }

    Ok(picked)
}

/// Count distinct elements, stopping once `limit` have been seen.
fn distinct_up_to<T: PartialEq>(population: &[T], limit: usize) -> usize {
    let mut seen: Vec<&T> = Vec::with_capacity(limit);
    for item in population {
        if seen.len() >= limit {
            break;
        }
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen.len()
}
