mod calculation;

pub use calculation::plan;
