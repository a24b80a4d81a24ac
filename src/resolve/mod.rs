//! Resolver module orchestrator following the RSB module specification.

mod core;

pub use self::core::{GAP_PX, ResolvedLayout, resolve};
