//! Ranking of candidates by vote over several criteria.
//!
//! Every candidate provides one cost per criterion. On each criterion, the
//! cheapest candidate gets a first place vote and the runner-up a second
//! place vote.
use crate::error::{Result, ViewnixError};
use std::cmp::Ordering;
use std::io::BufRead;

/// Votes received by one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Votes {
    /// Index of the candidate.
    pub candidate: usize,
    /// Number of first place votes.
    pub first: usize,
    /// Number of second place votes.
    pub second: usize,
}

/// Read one cost per line, taking the first value of each of the first
/// `lines` lines.
///
/// # Errors
///
/// - `ViewnixError::InvalidInput` if there are fewer lines or a line does
/// not start with a number.
pub fn read_costs<R: BufRead>(reader: R, lines: usize) -> Result<Vec<f64>> {
    let mut costs = Vec::with_capacity(lines);
    for (i, line) in reader.lines().take(lines).enumerate() {
        let line = line?;
        let cost = line
            .split_whitespace()
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| ViewnixError::InvalidInput(format!("no cost in line {}", i + 1)))?;
        costs.push(cost);
    }
    if costs.len() < lines {
        return Err(ViewnixError::InvalidInput(format!(
            "expected {} lines, found {}",
            lines,
            costs.len()
        )));
    }
    Ok(costs)
}

/// Count the votes of each candidate, `costs[candidate][criterion]`.
/// Only the criteria provided by every candidate are considered. Equal
/// costs keep the candidate order.
pub fn tally_votes(costs: &[Vec<f64>]) -> Vec<Votes> {
    let mut votes: Vec<Votes> = (0..costs.len())
        .map(|candidate| Votes {
            candidate,
            ..Votes::default()
        })
        .collect();
    let criteria = costs.iter().map(Vec::len).min().unwrap_or(0);
    let mut order: Vec<usize> = Vec::with_capacity(costs.len());
    for c in 0..criteria {
        order.clear();
        order.extend(0..costs.len());
        order.sort_by(|&a, &b| {
            costs[a][c]
                .partial_cmp(&costs[b][c])
                .unwrap_or(Ordering::Equal)
        });
        if let Some(&winner) = order.first() {
            votes[winner].first += 1;
        }
        if let Some(&runner_up) = order.get(1) {
            votes[runner_up].second += 1;
        }
    }
    votes
}

/// Sort candidates by first place votes, then by second place votes, best
/// first. Ties keep the candidate order.
pub fn ranking(mut votes: Vec<Votes>) -> Vec<Votes> {
    votes.sort_by(|a, b| b.first.cmp(&a.first).then(b.second.cmp(&a.second)));
    votes
}

/// Index of the smallest RMS value, the first one on ties. NaN values are
/// never selected. Returns `None` if there is no candidate.
pub fn best_by_rms(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b <= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}
