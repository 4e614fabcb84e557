//! Quality-assignment strategies.
//!
//! Every budgeted strategy starts all tiles at quality 0, charges the baseline
//! cost, then raises tiles one level at a time in gaze order while the
//! marginal cost fits in what is left of the budget. The strategies differ
//! only in how many upgrades a scan may make and which tiles it may touch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::FrameCosts;
use crate::orientation::TILE_COUNT;

/// Selection algorithm, chosen per run by the operator or config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Operator key presets; no output without a key press.
    #[default]
    Interactive,
    /// Every tile at the highest quality, ignoring the budget.
    AlwaysBest,
    /// The most-faced tile at the highest quality, the rest at the lowest.
    FrontTileBest,
    /// One upgrade per scan, always restarting from the most-faced tile.
    Greedy,
    /// Every affordable tile upgraded once per scan.
    Uniform,
    /// Uniform over visible tiles first, then over the hidden ones.
    Hybrid,
}

impl Algorithm {
    /// All algorithms, in declaration order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Interactive,
        Algorithm::AlwaysBest,
        Algorithm::FrontTileBest,
        Algorithm::Greedy,
        Algorithm::Uniform,
        Algorithm::Hybrid,
    ];

    /// Lowercase name used on the command line and in logs.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Interactive => "interactive",
            Algorithm::AlwaysBest => "always-best",
            Algorithm::FrontTileBest => "front-tile-best",
            Algorithm::Greedy => "greedy",
            Algorithm::Uniform => "uniform",
            Algorithm::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name().replace('-', "") == wanted)
            .ok_or_else(|| format!("unknown algorithm: {s}"))
    }
}

/// How a candidate upgrade is compared against the budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fit {
    /// `spent + cost <= budget`.
    AtMost,
    /// `spent + cost < budget`.
    Below,
}

/// Running per-tile assignment and its total cost.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Allocation<'a> {
    costs: FrameCosts<'a>,
    budget: f64,
    pub(crate) qualities: [usize; TILE_COUNT],
    pub(crate) spent: f64,
}

impl<'a> Allocation<'a> {
    /// All tiles at quality 0, baseline already charged.
    pub(crate) fn baseline(costs: FrameCosts<'a>, budget: f64) -> Self {
        Self {
            costs,
            budget,
            qualities: [0; TILE_COUNT],
            spent: costs.baseline(),
        }
    }

    fn try_upgrade(&mut self, tile: usize, fit: Fit) -> bool {
        let quality = self.qualities[tile];
        if quality + 1 >= self.costs.quality_count() {
            return false;
        }
        let next = self.spent + self.costs.marginal_cost(tile, quality);
        let fits = match fit {
            Fit::AtMost => next <= self.budget,
            Fit::Below => next < self.budget,
        };
        if fits {
            self.qualities[tile] += 1;
            self.spent = next;
        }
        fits
    }

    /// One scan over `order`. Returns whether anything was upgraded.
    fn scan(
        &mut self,
        order: &[usize; TILE_COUNT],
        fit: Fit,
        first_only: bool,
        eligible: impl Fn(usize) -> bool,
    ) -> bool {
        let mut upgraded = false;
        for &tile in order {
            if eligible(tile) && self.try_upgrade(tile, fit) {
                upgraded = true;
                if first_only {
                    break;
                }
            }
        }
        upgraded
    }
}

/// Raise the first affordable tile in gaze order, then rescan from the top.
pub(crate) fn greedy<'a>(
    costs: FrameCosts<'a>,
    order: &[usize; TILE_COUNT],
    budget: f64,
) -> Allocation<'a> {
    let mut alloc = Allocation::baseline(costs, budget);
    while alloc.scan(order, Fit::AtMost, true, |_| true) {}
    alloc
}

/// Raise every affordable tile once per scan until a scan changes nothing.
pub(crate) fn uniform<'a>(
    costs: FrameCosts<'a>,
    order: &[usize; TILE_COUNT],
    budget: f64,
) -> Allocation<'a> {
    let mut alloc = Allocation::baseline(costs, budget);
    while alloc.scan(order, Fit::AtMost, false, |_| true) {}
    alloc
}

/// Uniform scans restricted to visible tiles; hidden tiles only get budget
/// once no visible tile can be raised.
pub(crate) fn hybrid<'a>(
    costs: FrameCosts<'a>,
    order: &[usize; TILE_COUNT],
    visibility: &[bool; TILE_COUNT],
    budget: f64,
) -> Allocation<'a> {
    let mut alloc = Allocation::baseline(costs, budget);
    loop {
        let progressed = alloc.scan(order, Fit::AtMost, false, |t| visibility[t])
            // Hidden tiles must leave some budget unspent.
            || alloc.scan(order, Fit::Below, false, |t| !visibility[t]);
        if !progressed {
            break;
        }
    }
    alloc
}

/// The most-faced tile at `max_quality`, everything else at 0.
pub(crate) fn front_tile_best(order: &[usize; TILE_COUNT], max_quality: usize) -> [usize; TILE_COUNT] {
    let mut qualities = [0; TILE_COUNT];
    qualities[order[0]] = max_quality;
    qualities
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRONT_ORDER: [usize; TILE_COUNT] = [0, 1, 3, 2];
    const SIZES: [f64; 3] = [10.0, 15.0, 23.0];

    fn equal_costs() -> FrameCosts<'static> {
        FrameCosts::new([&SIZES, &SIZES, &SIZES, &SIZES])
    }

    #[test]
    fn test_algorithm_parse_and_display() {
        for a in Algorithm::ALL {
            assert_eq!(a.name().parse::<Algorithm>(), Ok(a));
        }
        assert_eq!("FrontTileBest".parse(), Ok(Algorithm::FrontTileBest));
        assert_eq!("always_best".parse(), Ok(Algorithm::AlwaysBest));
        assert!("random".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::Hybrid.to_string(), "hybrid");
    }

    #[test]
    fn test_uniform_spreads_first_level() {
        let alloc = uniform(equal_costs(), &FRONT_ORDER, 53.0);
        assert_eq!(alloc.qualities, [1, 1, 0, 0]);
        assert_eq!(alloc.spent, 50.0);
    }

    #[test]
    fn test_greedy_concentrates_on_front() {
        let alloc = greedy(equal_costs(), &FRONT_ORDER, 53.0);
        assert_eq!(alloc.qualities, [2, 0, 0, 0]);
        assert_eq!(alloc.spent, 53.0);
    }

    #[test]
    fn test_greedy_moves_on_when_front_maxed() {
        let alloc = greedy(equal_costs(), &FRONT_ORDER, 60.0);
        // Front to 2 (53), then right to 1 (58); nothing else fits.
        assert_eq!(alloc.qualities, [2, 1, 0, 0]);
        assert_eq!(alloc.spent, 58.0);
    }

    #[test]
    fn test_hybrid_prefers_visible_tiles() {
        let visibility = [true, false, false, false];
        let alloc = hybrid(equal_costs(), &FRONT_ORDER, &visibility, 53.0);
        assert_eq!(alloc.qualities, [2, 0, 0, 0]);
        assert_eq!(alloc.spent, 53.0);
    }

    #[test]
    fn test_hybrid_hidden_tiles_need_strict_headroom() {
        let visibility = [true, false, false, false];
        // Front maxes at 53; a hidden upgrade to 58 must stay strictly below.
        let exact = hybrid(equal_costs(), &FRONT_ORDER, &visibility, 58.0);
        assert_eq!(exact.qualities, [2, 0, 0, 0]);
        let roomy = hybrid(equal_costs(), &FRONT_ORDER, &visibility, 58.5);
        assert_eq!(roomy.qualities, [2, 1, 0, 0]);
    }

    #[test]
    fn test_baseline_over_budget_stays_at_zero() {
        for alloc in [
            greedy(equal_costs(), &FRONT_ORDER, 10.0),
            uniform(equal_costs(), &FRONT_ORDER, 10.0),
            hybrid(equal_costs(), &FRONT_ORDER, &[true; TILE_COUNT], 10.0),
        ] {
            assert_eq!(alloc.qualities, [0; TILE_COUNT]);
            assert_eq!(alloc.spent, 40.0);
        }
    }

    #[test]
    fn test_unlimited_budget_reaches_max_everywhere() {
        let alloc = uniform(equal_costs(), &FRONT_ORDER, f64::MAX);
        assert_eq!(alloc.qualities, [2; TILE_COUNT]);
        assert_eq!(alloc.spent, 92.0);
    }

    #[test]
    fn test_zero_marginal_cost_upgrades_at_exact_budget() {
        let flat = [10.0, 10.0];
        let costs = FrameCosts::new([&flat, &flat, &flat, &flat]);
        let alloc = greedy(costs, &FRONT_ORDER, 40.0);
        assert_eq!(alloc.qualities, [1; TILE_COUNT]);
    }

    #[test]
    fn test_single_quality_level() {
        let one = [7.0];
        let costs = FrameCosts::new([&one, &one, &one, &one]);
        assert_eq!(uniform(costs, &FRONT_ORDER, 1e9).qualities, [0; TILE_COUNT]);
        assert_eq!(front_tile_best(&[2, 0, 1, 3], 0), [0; TILE_COUNT]);
    }

    #[test]
    fn test_front_tile_best_uses_order_head() {
        assert_eq!(front_tile_best(&[3, 0, 2, 1], 4), [0, 0, 0, 4]);
    }
}
