//! Pluggable policies: what a click is worth, and what counts as cheating.

use std::collections::VecDeque;

use super::config::{CheatPolicy, ClickValuePolicy, GameConfig};

// ── Click value ─────────────────────────────────────────────────

pub trait ClickValueStrategy {
    /// Bonus a fresh session starts with.
    fn initial_bonus(&self) -> u64;
    /// Clicks earned by one manual click with the given accumulated bonus.
    fn click_value(&self, bonus: u64) -> u64;
}

/// `1 + bonus` per click; upgrades add to the bonus.
pub struct AdditiveClicks;

impl ClickValueStrategy for AdditiveClicks {
    fn initial_bonus(&self) -> u64 {
        0
    }

    fn click_value(&self, bonus: u64) -> u64 {
        bonus.saturating_add(1)
    }
}

/// `1 * multiplier` per click; the multiplier starts at 1 and upgrades add to it.
pub struct MultiplicativeClicks;

impl ClickValueStrategy for MultiplicativeClicks {
    fn initial_bonus(&self) -> u64 {
        1
    }

    fn click_value(&self, bonus: u64) -> u64 {
        bonus.max(1)
    }
}

pub fn click_value_strategy(policy: ClickValuePolicy) -> Box<dyn ClickValueStrategy> {
    match policy {
        ClickValuePolicy::Additive => Box::new(AdditiveClicks),
        ClickValuePolicy::Multiplicative => Box::new(MultiplicativeClicks),
    }
}

// ── Cheat detection ─────────────────────────────────────────────

/// Why a session was terminated.
#[derive(Clone, Debug, PartialEq)]
pub enum CheatReason {
    /// The browser reported the click as synthesized by script.
    Untrusted,
    /// Too many windows of near-identical click intervals.
    TooRegular { strikes: u32 },
    /// A single click came faster than any human can click.
    TooFast { clicks_per_sec: f64 },
}

impl CheatReason {
    pub fn describe(&self) -> String {
        match self {
            CheatReason::Untrusted => "click was not made by a real user".into(),
            CheatReason::TooRegular { strikes } => {
                format!("clicking too regularly ({} strikes)", strikes)
            }
            CheatReason::TooFast { clicks_per_sec } if clicks_per_sec.is_finite() => {
                format!("clicking too fast ({:.0} clicks/s)", clicks_per_sec)
            }
            CheatReason::TooFast { .. } => "two clicks in the same millisecond".into(),
        }
    }
}

/// What the heuristic concluded about one click.
#[derive(Clone, Debug, PartialEq)]
pub enum Verdict {
    Clean,
    /// Suspicious but not yet conclusive; the caller records a strike.
    Strike,
    Cheating(CheatReason),
}

/// Timing facts about the click being judged.
pub struct ClickSample<'a> {
    /// Milliseconds since the previous click; `None` for the first click.
    pub elapsed_ms: Option<u64>,
    /// Recent inter-click intervals, oldest first, including this one.
    pub intervals: &'a VecDeque<u64>,
    /// Capacity of `intervals`; the window is only judged when full.
    pub capacity: usize,
    /// Strikes recorded before this click.
    pub strikes: u32,
}

pub trait CheatHeuristic {
    fn assess(&self, sample: &ClickSample) -> Verdict;
}

/// Flags a full window of intervals that all sit within `tolerance_ms` of
/// their mean. Each such window is a strike; more than `threshold` strikes
/// is cheating.
pub struct RegularityWindow {
    pub tolerance_ms: f64,
    pub threshold: u32,
}

impl CheatHeuristic for RegularityWindow {
    fn assess(&self, sample: &ClickSample) -> Verdict {
        if !is_regular(sample.intervals, sample.capacity, self.tolerance_ms) {
            return Verdict::Clean;
        }
        let strikes = sample.strikes.saturating_add(1);
        if strikes > self.threshold {
            Verdict::Cheating(CheatReason::TooRegular { strikes })
        } else {
            Verdict::Strike
        }
    }
}

/// Flags a single click whose instantaneous rate `1000 / elapsed_ms`
/// exceeds `ceiling` clicks per second.
pub struct VelocityCeiling {
    pub ceiling: f64,
}

impl CheatHeuristic for VelocityCeiling {
    fn assess(&self, sample: &ClickSample) -> Verdict {
        let Some(elapsed) = sample.elapsed_ms else {
            return Verdict::Clean;
        };
        let clicks_per_sec = if elapsed == 0 {
            f64::INFINITY
        } else {
            1000.0 / elapsed as f64
        };
        if clicks_per_sec > self.ceiling {
            Verdict::Cheating(CheatReason::TooFast { clicks_per_sec })
        } else {
            Verdict::Clean
        }
    }
}

pub fn cheat_heuristic(config: &GameConfig) -> Box<dyn CheatHeuristic> {
    match config.cheat_heuristic {
        CheatPolicy::Regularity => Box::new(RegularityWindow {
            tolerance_ms: config.regularity_tolerance_ms,
            threshold: config.regularity_threshold,
        }),
        CheatPolicy::Velocity => Box::new(VelocityCeiling {
            ceiling: config.velocity_ceiling,
        }),
    }
}

/// Zero tolerance: any synthesized click is cheating.
pub fn trust_check(trusted: bool) -> Verdict {
    if trusted {
        Verdict::Clean
    } else {
        Verdict::Cheating(CheatReason::Untrusted)
    }
}

/// True when the window is full and every interval is within `tolerance_ms`
/// of the window's mean.
pub fn is_regular(intervals: &VecDeque<u64>, capacity: usize, tolerance_ms: f64) -> bool {
    if capacity == 0 || intervals.len() < capacity {
        return false;
    }
    let mean = intervals.iter().map(|&i| i as f64).sum::<f64>() / intervals.len() as f64;
    intervals
        .iter()
        .all(|&i| (i as f64 - mean).abs() <= tolerance_ms)
}
