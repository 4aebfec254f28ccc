//! Rule modules, one per workbook concern, run in a fixed order.
//!
//! Each module is a pure function of the [`RuleContext`] returning a
//! [`RuleResult`] with a delta of `0` or `-1` (aero may deduct per check).

pub(crate) mod aero;
pub(crate) mod attachments;
pub(crate) mod constraints;
pub(crate) mod cost;
pub(crate) mod fuel;
pub(crate) mod landing_gear;
pub(crate) mod mission;
pub(crate) mod stability;
pub(crate) mod thrust;

use super::{RuleContext, RuleResult};

pub(crate) type RuleFn = fn(&RuleContext<'_>) -> RuleResult;

pub(crate) const PIPELINE: [(&str, RuleFn); 9] = [
    ("aero", aero::run),
    ("mission", mission::run),
    ("thrust", thrust::run),
    ("constraints", constraints::run),
    ("attachments", attachments::run),
    ("stability", stability::run),
    ("fuel", fuel::run),
    ("cost", cost::run),
    ("landing_gear", landing_gear::run),
];

/// `|value - target| <= tolerance`; false for non-finite input.
pub(crate) fn within(value: f64, target: f64, tolerance: f64) -> bool {
    (value - target).abs() <= tolerance
}

/// `value >= minimum - tolerance`; false for non-finite input.
pub(crate) fn at_least(value: f64, minimum: f64, tolerance: f64) -> bool {
    value >= minimum - tolerance
}

pub(crate) fn between(value: f64, low: f64, high: f64) -> bool {
    value >= low && value <= high
}
