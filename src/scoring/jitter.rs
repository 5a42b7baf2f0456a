//! Deterministic presentation jitter
//!
//! Banded scores and display percentages carry a small offset so equal-band
//! applicants do not all see identical figures. The offset is drawn from a
//! PRNG seeded by a stable hash of the applicant's own inputs: the same
//! application always produces the same offset, and nothing downstream
//! depends on the specific value, only on its bounds.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed for the credit score offset, keyed by the estimator's inputs
fn score_seed(monthly_income: f64, debt_to_income: f64, age: u8, job_tenure_years: u8) -> u64 {
    let mut hasher = DefaultHasher::new();
    monthly_income.to_bits().hash(&mut hasher);
    debt_to_income.to_bits().hash(&mut hasher);
    age.hash(&mut hasher);
    job_tenure_years.hash(&mut hasher);
    hasher.finish()
}

/// Seed for the display score offset, keyed by the headline loan terms
fn display_seed(monthly_income: f64, loan_amount: f64, age: u8) -> u64 {
    let mut hasher = DefaultHasher::new();
    monthly_income.to_bits().hash(&mut hasher);
    loan_amount.to_bits().hash(&mut hasher);
    age.hash(&mut hasher);
    hasher.finish()
}

/// Credit score offset in [-10, 10] points
pub fn score_jitter(monthly_income: f64, debt_to_income: f64, age: u8, job_tenure_years: u8) -> i32 {
    let seed = score_seed(monthly_income, debt_to_income, age, job_tenure_years);
    let mut rng = StdRng::seed_from_u64(seed);
    rng.gen_range(-10..=10)
}

/// Display score offset in [-1.5, 1.5] percentage points
pub fn display_jitter(monthly_income: f64, loan_amount: f64, age: u8) -> f64 {
    let seed = display_seed(monthly_income, loan_amount, age);
    let mut rng = StdRng::seed_from_u64(seed);
    rng.gen_range(-1.5..=1.5)
}
