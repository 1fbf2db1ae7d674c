//! Allocator calls per iteration, growing reallocations included

use criterion::measurement::{Measurement, ValueFormatter};
use criterion::Throughput;
use stats_alloc::INSTRUMENTED_SYSTEM;

use crate::GestureMeasurement;

/// Number of `alloc` and `realloc` calls made during an iteration
pub struct Allocations;

impl GestureMeasurement for Allocations {
    const NAME: &'static str = "allocations";
}

fn allocator_calls() -> usize {
    let stats = INSTRUMENTED_SYSTEM.stats();
    stats.allocations + stats.reallocations
}

impl Measurement for Allocations {
    type Intermediate = usize;
    type Value = usize;

    fn start(&self) -> Self::Intermediate {
        allocator_calls()
    }

    fn end(&self, calls_before: Self::Intermediate) -> Self::Value {
        allocator_calls().saturating_sub(calls_before)
    }

    fn add(&self, &v1: &Self::Value, &v2: &Self::Value) -> Self::Value {
        v1 + v2
    }

    fn zero(&self) -> Self::Value {
        0
    }

    fn to_f64(&self, &value: &Self::Value) -> f64 {
        value as f64
    }

    fn formatter(&self) -> &dyn ValueFormatter {
        &CallCountFormatter
    }
}

/// Scales large counts to thousands or millions
struct CallCountFormatter;

impl ValueFormatter for CallCountFormatter {
    fn scale_values(&self, typical_value: f64, values: &mut [f64]) -> &'static str {
        let (factor, unit) = if typical_value >= 1e6 {
            (1e-6, "M allocations")
        } else if typical_value >= 1e3 {
            (1e-3, "k allocations")
        } else {
            (1.0, "allocations")
        };
        for value in values {
            *value *= factor;
        }
        unit
    }

    fn scale_throughputs(
        &self,
        _: f64,
        throughput: &Throughput,
        values: &mut [f64],
    ) -> &'static str {
        // per landmark frame when the bench reports frames as elements
        match *throughput {
            Throughput::Elements(frames) if frames > 0 => {
                for value in values {
                    *value /= frames as f64;
                }
                "allocations/frame"
            }
            _ => "allocations",
        }
    }

    fn scale_for_machines(&self, _: &mut [f64]) -> &'static str {
        "allocations"
    }
}
