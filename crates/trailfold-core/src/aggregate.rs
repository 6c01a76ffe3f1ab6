// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The accumulate/finish protocol and the built-in aggregates.
use core::fmt;

use thiserror::Error;

use trailfold_graph::{PropertyValue, ValueKind};

use crate::offset::OffsetError;

/// Error returned when an aggregate call cannot complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// The aggregation offset did not land on a node.
    #[error(transparent)]
    Offset(#[from] OffsetError),
    /// The node at the offset lacks the property being aggregated.
    #[error("node at offset {offset} has no property {property:?}")]
    PropertyNotFound {
        /// Offset of the node that was inspected.
        offset: isize,
        /// Name of the missing property.
        property: String,
    },
    /// A numeric accumulator was handed a value with no numeric reading.
    #[error("cannot aggregate a {kind} value numerically")]
    NotNumeric {
        /// Kind of the offending value.
        kind: ValueKind,
    },
}

/// Folds a stream of values into one result.
///
/// `accumulate` may be called any number of times; `finish` consumes the
/// accumulator, so a finished accumulator cannot be refilled. The engine
/// obtains one fresh accumulator per bucket from a `FnMut() -> A`
/// factory, and the built-ins' `new` constructors are usable as factories
/// directly.
pub trait Accumulator<V> {
    /// The folded result type.
    type Output;

    /// Folds one value in.
    ///
    /// # Errors
    ///
    /// [`AggregateError`] when the value cannot be folded; for the numeric
    /// built-ins, a value with no numeric reading.
    fn accumulate(&mut self, value: V) -> Result<(), AggregateError>;

    /// Consumes the accumulator and yields the result.
    fn finish(self) -> Self::Output;
}

fn numeric(value: &PropertyValue) -> Result<f64, AggregateError> {
    let kind = value.kind();
    value.as_f64().ok_or(AggregateError::NotNumeric { kind })
}

/// Counts accumulated values, ignoring their content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Count {
    seen: u64,
}

impl Count {
    /// Creates a count at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V> Accumulator<V> for Count {
    type Output = u64;

    fn accumulate(&mut self, _value: V) -> Result<(), AggregateError> {
        self.seen += 1;
        Ok(())
    }

    fn finish(self) -> u64 {
        self.seen
    }
}

/// Numeric running total; integers widen to `f64`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sum {
    total: f64,
}

impl Sum {
    /// Creates a sum at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator<PropertyValue> for Sum {
    type Output = f64;

    fn accumulate(&mut self, value: PropertyValue) -> Result<(), AggregateError> {
        self.total += numeric(&value)?;
        Ok(())
    }

    fn finish(self) -> f64 {
        self.total
    }
}

/// Arithmetic mean of numeric values; `None` when nothing was
/// accumulated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Avg {
    total: f64,
    count: u64,
}

impl Avg {
    /// Creates an empty average.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator<PropertyValue> for Avg {
    type Output = Option<f64>;

    fn accumulate(&mut self, value: PropertyValue) -> Result<(), AggregateError> {
        self.total += numeric(&value)?;
        self.count += 1;
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn finish(self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.total / self.count as f64)
        }
    }
}

/// Smallest numeric value seen.
///
/// The first value seeds the running best; each later value replaces it
/// iff strictly smaller under `<`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Min {
    best: Option<f64>,
}

impl Min {
    /// Creates an unseeded minimum.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator<PropertyValue> for Min {
    type Output = Option<f64>;

    fn accumulate(&mut self, value: PropertyValue) -> Result<(), AggregateError> {
        let candidate = numeric(&value)?;
        if self.best.is_none_or(|best| candidate < best) {
            self.best = Some(candidate);
        }
        Ok(())
    }

    fn finish(self) -> Option<f64> {
        self.best
    }
}

/// Largest numeric value seen.
///
/// The first value seeds the running best; each later value replaces it
/// iff strictly larger under `>`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Max {
    best: Option<f64>,
}

impl Max {
    /// Creates an unseeded maximum.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator<PropertyValue> for Max {
    type Output = Option<f64>;

    fn accumulate(&mut self, value: PropertyValue) -> Result<(), AggregateError> {
        let candidate = numeric(&value)?;
        if self.best.is_none_or(|best| candidate > best) {
            self.best = Some(candidate);
        }
        Ok(())
    }

    fn finish(self) -> Option<f64> {
        self.best
    }
}

/// Concatenates rendered values in encounter order, interleaved with a
/// separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    separator: String,
    parts: Vec<String>,
}

impl Join {
    /// Creates a joiner over `separator`.
    #[must_use]
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            parts: Vec::new(),
        }
    }
}

impl<V: fmt::Display> Accumulator<V> for Join {
    type Output = String;

    fn accumulate(&mut self, value: V) -> Result<(), AggregateError> {
        self.parts.push(value.to_string());
        Ok(())
    }

    fn finish(self) -> String {
        self.parts.join(&self.separator)
    }
}

/// Collects every accumulated value verbatim, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collect<V> {
    values: Vec<V>,
}

impl<V> Collect<V> {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }
}

impl<V> Default for Collect<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Accumulator<V> for Collect<V> {
    type Output = Vec<V>;

    fn accumulate(&mut self, value: V) -> Result<(), AggregateError> {
        self.values.push(value);
        Ok(())
    }

    fn finish(self) -> Vec<V> {
        self.values
    }
}
