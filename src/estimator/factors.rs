use std::fmt;

/// Comparison used to match an input value against an adjustment bucket.
///
/// Bounds are kept exactly as the demo heuristic defines them: `LessThan(30.0)`
/// does not match 30, `Between` is inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeOp {
    LessThan(f64),
    LessEqual(f64),
    GreaterThan(f64),
    GreaterEqual(f64),
    Between(f64, f64),
}

impl RangeOp {
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            RangeOp::LessThan(n) => value < n,
            RangeOp::LessEqual(n) => value <= n,
            RangeOp::GreaterThan(n) => value > n,
            RangeOp::GreaterEqual(n) => value >= n,
            RangeOp::Between(low, high) => value >= low && value <= high,
        }
    }
}

impl fmt::Display for RangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeOp::LessThan(n) => write!(f, "<{}", n),
            RangeOp::LessEqual(n) => write!(f, "<={}", n),
            RangeOp::GreaterThan(n) => write!(f, ">{}", n),
            RangeOp::GreaterEqual(n) => write!(f, ">={}", n),
            RangeOp::Between(low, high) => write!(f, "{}-{}", low, high),
        }
    }
}

/// A range and the points it adds to (or removes from) the score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub range: RangeOp,
    pub points: f64,
}

pub const AGE_BUCKETS: &[Bucket] = &[
    Bucket { range: RangeOp::Between(30.0, 50.0), points: 20.0 },
    Bucket { range: RangeOp::LessThan(25.0), points: -10.0 },
];

pub const DTI_BUCKETS: &[Bucket] = &[
    Bucket { range: RangeOp::LessThan(30.0), points: 20.0 },
    Bucket { range: RangeOp::GreaterThan(50.0), points: -25.0 },
];

pub const UTILIZATION_BUCKETS: &[Bucket] = &[
    Bucket { range: RangeOp::LessThan(30.0), points: 25.0 },
    Bucket { range: RangeOp::GreaterThan(70.0), points: -20.0 },
];

pub const ACTIVE_LOAN_BUCKETS: &[Bucket] = &[
    Bucket { range: RangeOp::LessEqual(2.0), points: 10.0 },
    Bucket { range: RangeOp::GreaterEqual(5.0), points: -15.0 },
];

pub const HISTORY_BUCKETS: &[Bucket] = &[
    Bucket { range: RangeOp::GreaterThan(7.0), points: 25.0 },
    Bucket { range: RangeOp::LessThan(2.0), points: -20.0 },
];

/// Points per missed payment. No floor; only the final clamp limits it.
pub const MISSED_PAYMENT_POINTS: f64 = -20.0;

pub struct BucketResult {
    pub points: f64,
    pub matched_range: Option<RangeOp>,
}

/// First matching bucket wins. A value that matches nothing is neutral.
pub fn apply_buckets(value: f64, buckets: &[Bucket]) -> BucketResult {
    for bucket in buckets {
        if bucket.range.matches(value) {
            return BucketResult {
                points: bucket.points,
                matched_range: Some(bucket.range),
            };
        }
    }
    BucketResult {
        points: 0.0,
        matched_range: None,
    }
}
