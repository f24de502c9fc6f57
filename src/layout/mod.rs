//! Slot placement and frame composition.

pub(crate) mod canvas;
pub(crate) mod grid;
