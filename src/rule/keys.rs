use smallvec::SmallVec;

use crate::pattern::CompiledSegment;

/// Ordering weight of one segment. Literals sort before variables at the
/// same position; longer literals and lighter converters sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weight {
    pub is_variable: bool,
    pub weight: i64,
}

impl Weight {
    pub fn of(segment: &CompiledSegment) -> Self {
        match segment {
            CompiledSegment::Literal(text) => Weight {
                is_variable: false,
                weight: -(text.chars().count() as i64),
            },
            CompiledSegment::Variable { converter, .. } => Weight {
                is_variable: true,
                weight: i64::from(converter.weight()),
            },
        }
    }
}

pub type Weights = SmallVec<[Weight; 8]>;

/// Match-order key: literal-only rules first, then rules with more
/// segments, then segment weights in order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchKey {
    pub has_variables: bool,
    pub neg_segment_count: i64,
    pub weights: Weights,
}

impl MatchKey {
    pub fn from_weights(weights: Weights) -> Self {
        Self {
            has_variables: weights.iter().any(|w| w.is_variable),
            neg_segment_count: -(weights.len() as i64),
            weights,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuildKey(pub i64);

impl BuildKey {
    pub fn from_weights(weights: &[Weight]) -> Self {
        BuildKey(-(weights.iter().filter(|w| w.is_variable).count() as i64))
    }
}
