//! # Uniform Engine
//!
//! Seedable source of uniform draws in [0, 1), the foundation every sampling
//! routine in this crate is layered on.
//!
//! ## Design
//!
//! - **Reproducibility**: every engine carries the seed it was initialised
//!   with; two engines built from the same seed and driven through the same
//!   call sequence yield bit-identical draws.
//! - **Explicit ownership**: there is no process-wide generator. Callers
//!   construct an engine (or a [`Sampler`](crate::Sampler) session that owns
//!   one) and pass it by `&mut` to the routines that consume it.
//! - **Static dispatch**: samplers are generic over [`UniformSource`], so the
//!   hot loops never go through a vtable.
//! - **Sessions, not locks**: an engine is a single sequential stream. Work
//!   that runs concurrently derives an independent engine per session with
//!   [`UniformEngine::derive_session`] instead of sharing one behind a mutex.
//!
//! ## Usage Example
//!
//! ```rust
//! use sampler_engine::rng::{UniformEngine, UniformSource};
//!
//! let mut engine = UniformEngine::from_seed(12345);
//! let u = engine.next_uniform();
//! assert!((0.0..1.0).contains(&u));
//!
//! // Batch generation into a caller-owned buffer
//! let mut buffer = vec![0.0; 1000];
//! engine.fill_uniform(&mut buffer);
//! ```

mod engine;
mod source;

pub use engine::UniformEngine;
pub use source::UniformSource;
