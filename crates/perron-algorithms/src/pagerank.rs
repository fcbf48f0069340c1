//! Damped power-iteration PageRank.
//!
//! The damping factor is the probability of following an outgoing edge; with
//! probability `1 - damping_factor` the walk teleports to a uniformly random
//! vertex. Scores are normalized: every vertex starts at `1/N`, and under
//! [`DanglingPolicy::Redistribute`] the score vector keeps summing to 1 after
//! each sweep.

use super::common::GraphView;
use crate::{Error, Result};
use rayon::prelude::*;

/// Treatment of the score mass held by vertices with no outgoing edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DanglingPolicy {
    /// Spread each dangling vertex's mass uniformly over all vertices every
    /// sweep. Total mass stays 1.
    #[default]
    Redistribute,
    /// Let dangling mass leak out of the system. Scores then sum to less
    /// than 1 whenever the graph has dangling vertices.
    Drop,
}

/// PageRank configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankConfig {
    /// Probability of following an outgoing edge, in `[0, 1)`.
    /// Teleportation probability is `1 - damping_factor`.
    pub damping_factor: f64,
    /// Upper bound on sweeps when the tolerance is never reached
    pub max_iterations: usize,
    /// Convergence threshold on the largest absolute per-vertex change
    /// between consecutive sweeps
    pub tolerance: f64,
    /// Dangling-vertex treatment
    pub dangling: DanglingPolicy,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            max_iterations: 200,
            tolerance: 1e-10,
            dangling: DanglingPolicy::Redistribute,
        }
    }
}

impl PageRankConfig {
    /// Reject configurations the iteration cannot run with.
    pub fn validate(&self) -> Result<()> {
        // NaN fails the range check and is rejected with it
        if !(self.damping_factor >= 0.0 && self.damping_factor < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "damping factor must lie in [0, 1), got {}",
                self.damping_factor
            )));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "tolerance must be finite and positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidParameter(
                "max iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of a PageRank run over a [`GraphView`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankRun {
    /// Score per vertex, aligned with the view's dense indices
    pub scores: Vec<f64>,
    /// Number of sweeps performed
    pub iterations: usize,
    /// Whether the tolerance was met before the iteration cap
    pub converged: bool,
}

/// Calculate PageRank for the graph view with sequential sweeps.
///
/// Iterates `new(v) = (1 - d)/N + dangling_share + d * sum(old(u) / out(u))`
/// over the in-neighbors `u` of each vertex until the largest per-vertex
/// change drops below `config.tolerance` or `config.max_iterations` sweeps
/// have run. Hitting the cap is not an error; the current estimate comes
/// back with `converged` set to false.
///
/// An empty view yields an empty, converged result. The configuration is
/// validated before the empty-graph check, so a bad damping factor fails
/// even when there is nothing to rank.
pub fn page_rank(view: &GraphView, config: PageRankConfig) -> Result<PageRankRun> {
    power_iteration(view, &config, sweep)
}

/// Same iteration as [`page_rank`] with each sweep's per-vertex updates
/// spread over the rayon thread pool. Produces scores identical to the
/// sequential version.
pub fn page_rank_parallel(view: &GraphView, config: PageRankConfig) -> Result<PageRankRun> {
    power_iteration(view, &config, sweep_parallel)
}

fn power_iteration<F>(view: &GraphView, config: &PageRankConfig, sweep: F) -> Result<PageRankRun>
where
    F: Fn(&GraphView, &PageRankConfig, &[f64], &mut [f64]) -> f64,
{
    config.validate()?;

    let n = view.vertex_count;
    if n == 0 {
        return Ok(PageRankRun {
            scores: Vec::new(),
            iterations: 0,
            converged: true,
        });
    }

    let mut scores = vec![1.0 / n as f64; n];
    let mut next = vec![0.0; n];

    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..config.max_iterations {
        let max_delta = sweep(view, config, &scores, &mut next);
        std::mem::swap(&mut scores, &mut next);
        iterations += 1;

        if max_delta < config.tolerance {
            converged = true;
            break;
        }
    }

    Ok(PageRankRun {
        scores,
        iterations,
        converged,
    })
}

/// Score mass sitting on vertices with no outgoing edges.
///
/// Summed in index order by both sweep variants so that serial and parallel
/// runs agree bit for bit.
fn dangling_mass(view: &GraphView, scores: &[f64]) -> f64 {
    (0..view.vertex_count)
        .filter(|&u| view.out_degree(u) == 0)
        .map(|u| scores[u])
        .sum()
}

fn dangling_share(view: &GraphView, config: &PageRankConfig, scores: &[f64]) -> f64 {
    match config.dangling {
        DanglingPolicy::Redistribute => {
            config.damping_factor * dangling_mass(view, scores) / view.vertex_count as f64
        }
        DanglingPolicy::Drop => 0.0,
    }
}

/// One sweep: fill `next` from `scores`, returning the largest absolute
/// per-vertex change.
fn sweep(view: &GraphView, config: &PageRankConfig, scores: &[f64], next: &mut [f64]) -> f64 {
    let n = view.vertex_count;
    let d = config.damping_factor;
    let base = (1.0 - d) / n as f64;
    let shared = dangling_share(view, config, scores);

    let mut max_delta = 0.0_f64;
    for v in 0..n {
        let mut incoming = 0.0;
        for &u in view.predecessors(v) {
            // u has at least the edge into v, so out_degree(u) >= 1
            incoming += scores[u] / view.out_degree(u) as f64;
        }
        next[v] = base + shared + d * incoming;
        max_delta = max_delta.max((next[v] - scores[v]).abs());
    }
    max_delta
}

fn sweep_parallel(
    view: &GraphView,
    config: &PageRankConfig,
    scores: &[f64],
    next: &mut [f64],
) -> f64 {
    let d = config.damping_factor;
    let base = (1.0 - d) / view.vertex_count as f64;
    let shared = dangling_share(view, config, scores);

    next.par_iter_mut()
        .enumerate()
        .map(|(v, slot)| {
            let mut incoming = 0.0;
            for &u in view.predecessors(v) {
                incoming += scores[u] / view.out_degree(u) as f64;
            }
            *slot = base + shared + d * incoming;
            (*slot - scores[v]).abs()
        })
        .reduce(|| 0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn view_from_edges(vertices: &[i64], edges: &[(i64, i64)]) -> GraphView {
        let vertex_to_index: HashMap<i64, usize> =
            vertices.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        let mut outgoing = vec![Vec::new(); vertices.len()];
        let mut incoming = vec![Vec::new(); vertices.len()];
        for &(s, t) in edges {
            let si = vertex_to_index[&s];
            let ti = vertex_to_index[&t];
            outgoing[si].push(ti);
            incoming[ti].push(si);
        }
        GraphView::from_adjacency_list(
            vertices.len(),
            vertices.to_vec(),
            vertex_to_index,
            outgoing,
            incoming,
        )
    }

    fn sum(scores: &[f64]) -> f64 {
        scores.iter().sum()
    }

    #[test]
    fn test_rejects_damping_outside_range() {
        let cases = [1.0, 1.5, -0.1, f64::NAN];
        for damping in cases {
            let config = PageRankConfig {
                damping_factor: damping,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(Error::InvalidParameter(_))),
                "damping {damping} should be rejected"
            );
        }
        let zero = PageRankConfig {
            damping_factor: 0.0,
            ..Default::default()
        };
        assert!(zero.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_tolerance_and_cap() {
        for tolerance in [0.0, -1e-3, f64::NAN, f64::INFINITY] {
            let config = PageRankConfig {
                tolerance,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(Error::InvalidParameter(_))),
                "tolerance {tolerance} should be rejected"
            );
        }
        let config = PageRankConfig {
            max_iterations: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_empty_view_yields_empty_converged_run() {
        let view = view_from_edges(&[], &[]);
        let run = page_rank(&view, PageRankConfig::default()).unwrap();
        assert!(run.scores.is_empty());
        assert_eq!(run.iterations, 0);
        assert!(run.converged);
    }

    #[test]
    fn test_invalid_damping_fails_even_on_empty_view() {
        let view = view_from_edges(&[], &[]);
        let config = PageRankConfig {
            damping_factor: 1.0,
            ..Default::default()
        };
        assert!(page_rank(&view, config).is_err());
    }

    #[test]
    fn test_self_loop_converges_to_one() {
        let view = view_from_edges(&[1], &[(1, 1)]);
        let run = page_rank(&view, PageRankConfig::default()).unwrap();
        assert!(run.converged);
        assert_eq!(run.iterations, 1);
        assert!((run.scores[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_two_cycle_splits_evenly() {
        let view = view_from_edges(&[1, 2], &[(1, 2), (2, 1)]);
        let run = page_rank(&view, PageRankConfig::default()).unwrap();
        assert!(run.converged);
        assert!((run.scores[0] - 0.5).abs() < 1e-6);
        assert!((run.scores[1] - 0.5).abs() < 1e-6);
        assert!((sum(&run.scores) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_three_cycle_equalizes() {
        let view = view_from_edges(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);
        let run = page_rank(&view, PageRankConfig::default()).unwrap();
        assert!(run.converged);
        for score in &run.scores {
            assert!((score - 1.0 / 3.0).abs() < 1e-6);
        }
        assert!((sum(&run.scores) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_redistribution_preserves_total_mass() {
        // 3 is dangling
        let view = view_from_edges(&[1, 2, 3], &[(1, 2), (2, 3)]);
        let run = page_rank(&view, PageRankConfig::default()).unwrap();
        assert!(run.converged);
        assert!((sum(&run.scores) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_drop_policy_leaks_dangling_mass() {
        let view = view_from_edges(&[1, 2, 3], &[(1, 2), (2, 3)]);
        let config = PageRankConfig {
            dangling: DanglingPolicy::Drop,
            ..Default::default()
        };
        let run = page_rank(&view, config).unwrap();
        assert!(run.converged);

        // Fixpoint by hand: s1 = t, s2 = t + d*s1, s3 = t + d*s2
        // with t = 0.15/3 = 0.05 and d = 0.85
        assert!((run.scores[0] - 0.05).abs() < 1e-9);
        assert!((run.scores[1] - 0.0925).abs() < 1e-9);
        assert!((run.scores[2] - 0.128625).abs() < 1e-9);
        assert!(sum(&run.scores) < 1.0 - 1e-3);
    }

    #[test]
    fn test_lone_vertex_under_each_policy() {
        let view = view_from_edges(&[42], &[]);

        let kept = page_rank(&view, PageRankConfig::default()).unwrap();
        assert!((kept.scores[0] - 1.0).abs() < 1e-12);

        let dropped = page_rank(
            &view,
            PageRankConfig {
                dangling: DanglingPolicy::Drop,
                ..Default::default()
            },
        )
        .unwrap();
        assert!((dropped.scores[0] - 0.15).abs() < 1e-12);
        assert_eq!(dropped.iterations, 2);
    }

    #[test]
    fn test_parallel_edges_dilute_per_edge_contribution() {
        // 1 emits three edges, two of them to 2; everything flows back to 1
        let view = view_from_edges(&[1, 2, 3], &[(1, 2), (1, 2), (1, 3), (2, 1), (3, 1)]);
        let run = page_rank(&view, PageRankConfig::default()).unwrap();
        assert!(run.converged);

        let (s1, s2, s3) = (run.scores[0], run.scores[1], run.scores[2]);
        // 2 receives two thirds of 1's followed mass, 3 one third
        assert!((s2 - s3 - 0.85 * s1 / 3.0).abs() < 1e-9);
        assert!(s2 > s3 + 0.1);
    }

    #[test]
    fn test_identical_runs_are_deterministic() {
        let view = view_from_edges(&[5, 6, 7, 8], &[(5, 6), (6, 7), (7, 5), (5, 7), (8, 5)]);
        let a = page_rank(&view, PageRankConfig::default()).unwrap();
        let b = page_rank(&view, PageRankConfig::default()).unwrap();
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_parallel_matches_serial_exactly() {
        // 6 is dangling so both policies take distinct paths
        let view = view_from_edges(
            &[1, 2, 3, 4, 5, 6],
            &[(1, 2), (2, 3), (3, 1), (1, 3), (4, 1), (4, 2), (5, 4), (5, 6)],
        );
        for dangling in [DanglingPolicy::Redistribute, DanglingPolicy::Drop] {
            let config = PageRankConfig {
                dangling,
                ..Default::default()
            };
            let serial = page_rank(&view, config.clone()).unwrap();
            let parallel = page_rank_parallel(&view, config).unwrap();
            assert_eq!(serial.scores, parallel.scores);
            assert_eq!(serial.iterations, parallel.iterations);
            assert_eq!(serial.converged, parallel.converged);
        }
    }

    #[test]
    fn test_iteration_cap_returns_estimate() {
        let view = view_from_edges(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1), (1, 3)]);
        let capped = PageRankConfig {
            max_iterations: 3,
            tolerance: 1e-15,
            ..Default::default()
        };
        let run = page_rank(&view, capped).unwrap();
        assert!(!run.converged);
        assert_eq!(run.iterations, 3);
        assert!(run.scores.iter().all(|s| s.is_finite()));

        let generous = PageRankConfig::default();
        let run = page_rank(&view, generous).unwrap();
        assert!(run.converged);
        assert!(run.iterations < 200);
    }

    #[test]
    fn test_max_change_shrinks_monotonically_on_cycle() {
        // Complete directed triangle, perturbed start so the deltas are
        // nonzero; each sweep scales the delta vector by exactly d/2
        let view = view_from_edges(
            &[1, 2, 3],
            &[(1, 2), (2, 1), (2, 3), (3, 2), (1, 3), (3, 1)],
        );
        let config = PageRankConfig::default();

        let mut scores = vec![0.6, 0.3, 0.1];
        let mut next = vec![0.0; 3];
        let mut deltas = Vec::new();
        for _ in 0..30 {
            deltas.push(sweep(&view, &config, &scores, &mut next));
            std::mem::swap(&mut scores, &mut next);
        }
        for pair in deltas.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-15);
        }
        assert!(deltas[29] < deltas[0]);
    }

    #[test]
    fn test_mass_stays_normalized_each_sweep() {
        // 4 is dangling; redistribution keeps every intermediate vector
        // summing to 1
        let view = view_from_edges(&[1, 2, 3, 4], &[(1, 2), (2, 3), (3, 1), (1, 4)]);
        let config = PageRankConfig::default();

        let mut scores = vec![0.25; 4];
        let mut next = vec![0.0; 4];
        for _ in 0..20 {
            sweep(&view, &config, &scores, &mut next);
            std::mem::swap(&mut scores, &mut next);
            assert!((sum(&scores) - 1.0).abs() < 1e-12);
        }
    }
}
