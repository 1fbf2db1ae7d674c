//! Criterion measurements for the gesturecrate benchmarks

pub mod mem;

/// A criterion measurement with a name for benchmark group titles
pub trait GestureMeasurement: criterion::measurement::Measurement {
    const NAME: &'static str;
}

impl GestureMeasurement for criterion::measurement::WallTime {
    const NAME: &'static str = "time";
}
