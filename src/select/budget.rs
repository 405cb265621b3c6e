// src/select/budget.rs
//! Cost estimation and budget accounting.

use std::collections::BTreeMap;

use crate::config::SelectionConfig;
use crate::source::extension_of;
use crate::tokens::Tokenizer;

/// Characters-per-unit used when exact tokenization is unavailable.
const FALLBACK_MULTIPLIER: f64 = 0.25;

/// How many units forwarding a file costs.
#[derive(Debug, Clone, PartialEq)]
pub enum CostModel {
    /// `ceil(chars × multiplier)` with a per-extension multiplier.
    PerLanguage {
        multipliers: BTreeMap<String, f64>,
        default: f64,
    },
    /// `ceil(chars × multiplier)` for every file.
    Flat(f64),
    /// Exact `cl100k_base` token count.
    Tokenizer,
}

impl CostModel {
    /// Estimated cost of forwarding `content` stored at `path`.
    #[must_use]
    pub fn cost(&self, path: &str, content: &str) -> i64 {
        match self {
            Self::PerLanguage {
                multipliers,
                default,
            } => {
                let m = multipliers
                    .get(&extension_of(path))
                    .copied()
                    .unwrap_or(*default);
                scaled(content, m)
            }
            Self::Flat(m) => scaled(content, *m),
            Self::Tokenizer => Tokenizer::try_count(content).map_or_else(
                || scaled(content, FALLBACK_MULTIPLIER),
                |n| i64::try_from(n).unwrap_or(i64::MAX),
            ),
        }
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn scaled(content: &str, multiplier: f64) -> i64 {
    let chars = content.chars().count() as f64;
    (chars * multiplier).ceil() as i64
}

/// Upper bound on the total cost one selection may forward.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub max_total_units: i64,
    pub cost: CostModel,
}

impl Budget {
    #[must_use]
    pub fn new(max_total_units: i64, cost: CostModel) -> Self {
        Self {
            max_total_units,
            cost,
        }
    }

    #[must_use]
    pub fn session(&self) -> BudgetSession {
        BudgetSession {
            limit: self.max_total_units,
            used: 0,
        }
    }
}

/// Monotonic consumption of one budget.
#[derive(Debug, Clone, Copy)]
pub struct BudgetSession {
    limit: i64,
    used: i64,
}

impl BudgetSession {
    #[must_use]
    pub fn remaining(&self) -> i64 {
        (self.limit - self.used).max(0)
    }

    #[must_use]
    pub fn used(&self) -> i64 {
        self.used
    }

    #[must_use]
    pub fn fits(&self, cost: i64) -> bool {
        cost <= self.remaining()
    }

    /// Consumes `cost` if it fits; returns whether it did.
    pub fn try_consume(&mut self, cost: i64) -> bool {
        if self.fits(cost) {
            self.used += cost;
            true
        } else {
            false
        }
    }

    /// Records a cost unconditionally. Used only by the fallback pick.
    pub fn force(&mut self, cost: i64) {
        self.used = self.used.saturating_add(cost);
    }
}

impl SelectionConfig {
    /// The cost model these settings describe.
    #[must_use]
    pub fn cost_model(&self) -> CostModel {
        if self.exact_tokens && Tokenizer::is_available() {
            CostModel::Tokenizer
        } else {
            if self.exact_tokens {
                tracing::warn!("tokenizer unavailable; estimating cost per language");
            }
            CostModel::PerLanguage {
                multipliers: self.multipliers.clone(),
                default: self.default_multiplier,
            }
        }
    }

    #[must_use]
    pub fn budget(&self) -> Budget {
        Budget::new(self.budget, self.cost_model())
    }
}
