//! Application services — use-case orchestration over the core components.

pub mod smart_home;
