//! Business logic: provider selection and prompt construction.

pub mod prompt;
pub mod provider;

pub use prompt::{build_context_suffix, build_system_prompt, to_fixed_2, SYSTEM_PROMPT};
pub use provider::{resolve_provider, Provider, UpstreamAuth, UpstreamRequest};
