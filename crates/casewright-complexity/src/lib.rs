//! Complexity estimation.
//!
//! Pure and additive:
//! - total validation points: ≤3 → 1, ≤7 → 2, else 3
//! - components: ≤1 → 1, ≤3 → 2, else 3
//! - any integration point: +2
//! - any security point: +2
//! - data points / 2 (integer division)
//!
//! Score ≤5 is Low, ≤9 Medium, otherwise High.

use casewright_schema::validation::{ComplexityLevel, ValidationCategory, ValidationPoints};
use serde::{Deserialize, Serialize};

/// Points contributed by each input, kept for reporting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityBreakdown {
    pub validation: u32,
    pub components: u32,
    pub integration: u32,
    pub security: u32,
    pub data: u32,
}

impl ComplexityBreakdown {
    pub fn score(&self) -> u32 {
        self.validation + self.components + self.integration + self.security + self.data
    }

    pub fn level(&self) -> ComplexityLevel {
        level_for_score(self.score())
    }
}

pub fn level_for_score(score: u32) -> ComplexityLevel {
    match score {
        0..=5 => ComplexityLevel::Low,
        6..=9 => ComplexityLevel::Medium,
        _ => ComplexityLevel::High,
    }
}

pub fn breakdown(points: &ValidationPoints, component_count: usize) -> ComplexityBreakdown {
    let validation = match points.total() {
        0..=3 => 1,
        4..=7 => 2,
        _ => 3,
    };
    let components = match component_count {
        0..=1 => 1,
        2..=3 => 2,
        _ => 3,
    };
    let bonus = |cat| if points.has(cat) { 2 } else { 0 };
    let data = u32::try_from(points.count(ValidationCategory::Data) / 2).unwrap_or(u32::MAX / 2);

    ComplexityBreakdown {
        validation,
        components,
        integration: bonus(ValidationCategory::Integration),
        security: bonus(ValidationCategory::Security),
        data,
    }
}

pub fn estimate(points: &ValidationPoints, component_count: usize) -> ComplexityLevel {
    breakdown(points, component_count).level()
}
