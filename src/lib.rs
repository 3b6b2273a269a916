//! # clt-demo
//!
//! Central Limit Theorem demonstration: draw `m` samples of size `n` from a
//! Binomial, Exponential or Uniform distribution, standardize each sample sum
//! with the distribution's theoretical moments, and compare the result with
//! N(0, 1).
//!
//! ```
//! use clt_demo::scenario::uniform;
//! use clt_demo::utils::create_rng;
//!
//! let mut rng = create_rng(Some(42));
//! let outcome = uniform(15.0, 35.0, 1000, 100, &mut rng).unwrap();
//! assert_eq!(outcome.standardized.len(), 1000);
//! assert_eq!(outcome.pooled.len(), 1000 * 100);
//! ```

pub mod commentary;
pub mod config;
pub mod constants;
pub mod datastructures;
pub mod distribution;
pub mod error;
pub mod histogram;
pub mod sampler;
pub mod scenario;
pub mod standardizer;
pub mod sweep;
pub mod utils;
pub mod visualization;

pub use distribution::Family;
pub use error::CltError;
pub use scenario::{run_scenario, SamplingParams, ScenarioOutcome};
