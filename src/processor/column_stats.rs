//! Per-column online statistics.
//!
//! Everything here merges associatively, so per-partition results can be
//! combined in any order and grouping and agree up to floating-point
//! rounding.

use crate::processor::classifier::Cell;

/// Welford running mean and sum of squared deviations
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Welford {
    n: u64,
    mean: f64,
    m2: f64,
}

impl Welford {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, x: f64) {
        self.n += 1;
        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        let delta2 = x - self.mean;
        self.m2 += delta * delta2;
    }

    /// Folds `other` in as if its observations had been added to `self`.
    pub fn merge(&mut self, other: &Welford) {
        if other.n == 0 {
            return;
        }
        if self.n == 0 {
            *self = *other;
            return;
        }

        let n = self.n as f64;
        let other_n = other.n as f64;
        let total = n + other_n;
        let delta = other.mean - self.mean;

        self.mean = (self.mean * n + other.mean * other_n) / total;
        self.m2 = self.m2 + other.m2 + delta * delta * n * other_n / total;
        self.n += other.n;
    }

    pub fn count(&self) -> u64 {
        self.n
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance, `0` for fewer than two observations
    pub fn variance(&self) -> f64 {
        if self.n > 1 {
            self.m2 / (self.n - 1) as f64
        } else {
            0.0
        }
    }

    pub fn stddev(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// Neumaier compensated sum.
///
/// Keeps the low-order bits a plain `f64` accumulator drops when adding many
/// values of differing magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    pub fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.compensation += (self.sum - t) + x;
        } else {
            self.compensation += (x - t) + self.sum;
        }
        self.sum = t;
    }

    pub fn merge(&mut self, other: &CompensatedSum) {
        self.add(other.sum);
        self.compensation += other.compensation;
    }

    pub fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

/// Statistics for one column
///
/// `count + null_count + non_numeric_count` always equals the number of
/// cells recorded, see [`ColumnStatistics::observed`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStatistics {
    pub count: u64,
    pub null_count: u64,
    pub non_numeric_count: u64,
    sum: CompensatedSum,
    min: f64,
    max: f64,
    welford: Welford,
}

impl Default for ColumnStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnStatistics {
    pub fn new() -> Self {
        ColumnStatistics {
            count: 0,
            null_count: 0,
            non_numeric_count: 0,
            sum: CompensatedSum::default(),
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            welford: Welford::new(),
        }
    }

    /// Records a classified cell
    pub fn record(&mut self, cell: Cell) {
        match cell {
            Cell::Null => self.record_null(),
            Cell::Numeric(x) => self.add_numeric(x),
            Cell::Text => self.record_non_numeric(),
        }
    }

    pub fn record_null(&mut self) {
        self.null_count += 1;
    }

    pub fn record_non_numeric(&mut self) {
        self.non_numeric_count += 1;
    }

    pub fn add_numeric(&mut self, x: f64) {
        self.count += 1;
        self.sum.add(x);
        if x < self.min {
            self.min = x;
        }
        if x > self.max {
            self.max = x;
        }
        self.welford.add(x);
    }

    /// Merges `other` into `self`.
    ///
    /// Min/max of a side without numeric cells are ignored.
    pub fn merge(&mut self, other: &ColumnStatistics) {
        self.count += other.count;
        self.null_count += other.null_count;
        self.non_numeric_count += other.non_numeric_count;
        self.sum.merge(&other.sum);
        if other.count > 0 {
            if other.min < self.min {
                self.min = other.min;
            }
            if other.max > self.max {
                self.max = other.max;
            }
        }
        self.welford.merge(&other.welford);
    }

    /// Number of cells recorded, whatever their class
    pub fn observed(&self) -> u64 {
        self.count + self.null_count + self.non_numeric_count
    }

    pub fn has_numeric(&self) -> bool {
        self.count > 0
    }

    pub fn sum(&self) -> f64 {
        self.sum.value()
    }

    /// Smallest numeric value, `None` without numeric cells
    pub fn min(&self) -> Option<f64> {
        self.has_numeric().then_some(self.min)
    }

    /// Largest numeric value, `None` without numeric cells
    pub fn max(&self) -> Option<f64> {
        self.has_numeric().then_some(self.max)
    }

    /// Raw minimum, `+inf` without numeric cells
    pub fn min_raw(&self) -> f64 {
        self.min
    }

    /// Raw maximum, `-inf` without numeric cells
    pub fn max_raw(&self) -> f64 {
        self.max
    }

    pub fn mean(&self) -> f64 {
        self.welford.mean()
    }

    pub fn variance(&self) -> f64 {
        self.welford.variance()
    }

    pub fn stddev(&self) -> f64 {
        self.welford.stddev()
    }

    pub fn welford(&self) -> &Welford {
        &self.welford
    }
}
