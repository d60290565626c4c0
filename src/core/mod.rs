// Small shared helpers

pub mod math;
