//! Batch iteration and frame streaming.

pub(crate) mod generate;
pub(crate) mod plan;
pub(crate) mod run;
