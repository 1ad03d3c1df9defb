//! Reference integrands with closed-form results.

pub mod integrands;
