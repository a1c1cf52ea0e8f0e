//! Solver statistics collection and reporting.
//!
//! Workers share one collector. Counters are atomic; phase records and the
//! improvement history sit behind mutexes and are tagged with the worker
//! that produced them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use matchforge_core::HardSoftScore;

/// Statistics for a single phase run by one worker.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseStatistics {
    /// Worker that ran the phase.
    pub worker: usize,
    /// Index of this phase within the worker's pipeline (0-based).
    pub phase_index: usize,
    /// Type name of the phase (e.g., "ConstructionHeuristic", "LocalSearch").
    pub phase_type: String,
    pub duration: Duration,
    pub step_count: u64,
    pub moves_evaluated: u64,
    pub moves_accepted: u64,
    pub starting_score: Option<HardSoftScore>,
    pub ending_score: Option<HardSoftScore>,
}

impl PhaseStatistics {
    /// Creates empty phase statistics.
    pub fn new(worker: usize, phase_index: usize, phase_type: impl Into<String>) -> Self {
        Self {
            worker,
            phase_index,
            phase_type: phase_type.into(),
            duration: Duration::ZERO,
            step_count: 0,
            moves_evaluated: 0,
            moves_accepted: 0,
            starting_score: None,
            ending_score: None,
        }
    }

    /// Returns the acceptance rate (accepted / evaluated).
    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }

    /// Returns the average time per step.
    pub fn avg_time_per_step(&self) -> Duration {
        if self.step_count == 0 {
            Duration::ZERO
        } else {
            self.duration.div_f64(self.step_count as f64)
        }
    }
}

/// Record of a new best score found by a worker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreImprovement {
    pub worker: usize,
    /// Time since solving started when the improvement occurred.
    pub time_offset: Duration,
    /// Global step count when the improvement occurred.
    pub step_count: u64,
    pub score: HardSoftScore,
}

/// Complete statistics for a solve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverStatistics {
    pub total_duration: Duration,
    pub total_step_count: u64,
    pub total_moves_evaluated: u64,
    pub total_moves_accepted: u64,
    pub score_calculation_count: u64,
    pub phase_statistics: Vec<PhaseStatistics>,
    pub score_history: Vec<ScoreImprovement>,
}

impl SolverStatistics {
    /// Creates empty solver statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the overall acceptance rate.
    pub fn acceptance_rate(&self) -> f64 {
        if self.total_moves_evaluated == 0 {
            0.0
        } else {
            self.total_moves_accepted as f64 / self.total_moves_evaluated as f64
        }
    }

    /// Returns the number of phase records across all workers.
    pub fn phase_count(&self) -> usize {
        self.phase_statistics.len()
    }

    /// Best score reported by any worker.
    pub fn best_score(&self) -> Option<HardSoftScore> {
        self.score_history.iter().map(|s| s.score).max()
    }

    /// Returns the number of score improvements recorded.
    pub fn improvement_count(&self) -> usize {
        self.score_history.len()
    }

    /// Improvements reported by one worker, in the order they were found.
    pub fn improvements_of(&self, worker: usize) -> impl Iterator<Item = &ScoreImprovement> {
        self.score_history.iter().filter(move |s| s.worker == worker)
    }

    /// Moves evaluated per second over the whole solve.
    pub fn moves_per_second(&self) -> f64 {
        let secs = self.total_duration.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.total_moves_evaluated as f64 / secs
        }
    }
}

/// Thread-safe collector for solver statistics.
///
/// Record into it while solving, then call `into_statistics()` (or
/// `snapshot()` while workers still hold a reference).
#[derive(Debug)]
pub struct StatisticsCollector {
    start_time: Instant,
    moves_evaluated: AtomicU64,
    moves_accepted: AtomicU64,
    step_count: AtomicU64,
    score_calculations: AtomicU64,
    phases: Mutex<Vec<PhaseStatistics>>,
    score_history: Mutex<Vec<ScoreImprovement>>,
}

/// Locks a mutex, recovering the data if a panicking worker poisoned it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl StatisticsCollector {
    /// Creates a new statistics collector.
    ///
    /// The start time is recorded when this is called.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            moves_evaluated: AtomicU64::new(0),
            moves_accepted: AtomicU64::new(0),
            step_count: AtomicU64::new(0),
            score_calculations: AtomicU64::new(0),
            phases: Mutex::new(Vec::new()),
            score_history: Mutex::new(Vec::new()),
        }
    }

    pub fn record_move_evaluated(&self) {
        self.moves_evaluated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_move_accepted(&self) {
        self.moves_accepted.fetch_add(1, Ordering::Relaxed);
    }

    /// Records both evaluation and acceptance for a move.
    pub fn record_move(&self, accepted: bool) {
        self.record_move_evaluated();
        if accepted {
            self.record_move_accepted();
        }
    }

    pub fn record_step(&self) {
        self.step_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds `count` score calculations performed by a worker.
    pub fn record_score_calculations(&self, count: u64) {
        self.score_calculations.fetch_add(count, Ordering::Relaxed);
    }

    /// Records a new best score for `worker`.
    pub fn record_improvement(&self, worker: usize, score: HardSoftScore) {
        let improvement = ScoreImprovement {
            worker,
            time_offset: self.start_time.elapsed(),
            step_count: self.step_count.load(Ordering::Relaxed),
            score,
        };
        lock(&self.score_history).push(improvement);
    }

    /// Starts a new phase for `worker` and returns its record index.
    pub fn start_phase(&self, worker: usize, phase_index: usize, phase_type: impl Into<String>) -> usize {
        let mut phases = lock(&self.phases);
        let index = phases.len();
        phases.push(PhaseStatistics::new(worker, phase_index, phase_type));
        index
    }

    /// Fills in the phase record returned by `start_phase`.
    #[allow(clippy::too_many_arguments)]
    pub fn end_phase(
        &self,
        record: usize,
        duration: Duration,
        step_count: u64,
        moves_evaluated: u64,
        moves_accepted: u64,
        starting_score: Option<HardSoftScore>,
        ending_score: Option<HardSoftScore>,
    ) {
        if let Some(phase) = lock(&self.phases).get_mut(record) {
            phase.duration = duration;
            phase.step_count = step_count;
            phase.moves_evaluated = moves_evaluated;
            phase.moves_accepted = moves_accepted;
            phase.starting_score = starting_score;
            phase.ending_score = ending_score;
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn current_step_count(&self) -> u64 {
        self.step_count.load(Ordering::Relaxed)
    }

    pub fn current_moves_evaluated(&self) -> u64 {
        self.moves_evaluated.load(Ordering::Relaxed)
    }

    pub fn current_moves_accepted(&self) -> u64 {
        self.moves_accepted.load(Ordering::Relaxed)
    }

    pub fn current_score_calculations(&self) -> u64 {
        self.score_calculations.load(Ordering::Relaxed)
    }

    /// Converts this collector into final statistics.
    pub fn into_statistics(self) -> SolverStatistics {
        let total_duration = self.start_time.elapsed();
        SolverStatistics {
            total_duration,
            total_step_count: self.step_count.into_inner(),
            total_moves_evaluated: self.moves_evaluated.into_inner(),
            total_moves_accepted: self.moves_accepted.into_inner(),
            score_calculation_count: self.score_calculations.into_inner(),
            phase_statistics: self
                .phases
                .into_inner()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
            score_history: self
                .score_history
                .into_inner()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        }
    }

    /// Takes a snapshot of current statistics without consuming the collector.
    pub fn snapshot(&self) -> SolverStatistics {
        SolverStatistics {
            total_duration: self.start_time.elapsed(),
            total_step_count: self.current_step_count(),
            total_moves_evaluated: self.current_moves_evaluated(),
            total_moves_accepted: self.current_moves_accepted(),
            score_calculation_count: self.current_score_calculations(),
            phase_statistics: lock(&self.phases).clone(),
            score_history: lock(&self.score_history).clone(),
        }
    }
}

impl Default for StatisticsCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_statistics_rates() {
        let mut phase = PhaseStatistics::new(0, 1, "LocalSearch");
        assert_eq!(phase.acceptance_rate(), 0.0);
        assert_eq!(phase.avg_time_per_step(), Duration::ZERO);

        phase.moves_evaluated = 200;
        phase.moves_accepted = 50;
        phase.step_count = 4;
        phase.duration = Duration::from_millis(100);
        assert!((phase.acceptance_rate() - 0.25).abs() < f64::EPSILON);
        assert_eq!(phase.avg_time_per_step(), Duration::from_millis(25));
    }

    #[test]
    fn test_collector_phases_per_worker() {
        let collector = StatisticsCollector::new();

        let a = collector.start_phase(0, 0, "ConstructionHeuristic");
        let b = collector.start_phase(1, 0, "ConstructionHeuristic");
        let c = collector.start_phase(0, 1, "LocalSearch");
        assert_eq!((a, b, c), (0, 1, 2));

        collector.end_phase(a, Duration::from_millis(5), 10, 0, 0, None, Some(HardSoftScore::of(-3, -120)));
        collector.end_phase(
            c,
            Duration::from_millis(200),
            20,
            100,
            50,
            Some(HardSoftScore::of(-3, -120)),
            Some(HardSoftScore::of(0, -95)),
        );

        let stats = collector.into_statistics();
        assert_eq!(stats.phase_count(), 3);

        let ls = &stats.phase_statistics[2];
        assert_eq!(ls.worker, 0);
        assert_eq!(ls.phase_index, 1);
        assert_eq!(ls.phase_type, "LocalSearch");
        assert!((ls.acceptance_rate() - 0.5).abs() < f64::EPSILON);

        // Worker 1's record was never ended.
        assert_eq!(stats.phase_statistics[1].ending_score, None);
    }

    #[test]
    fn test_best_score_across_workers() {
        let collector = StatisticsCollector::new();
        collector.record_improvement(0, HardSoftScore::of(-2, -100));
        collector.record_improvement(1, HardSoftScore::of(0, -98));
        collector.record_improvement(0, HardSoftScore::of(0, -110));

        let stats = collector.snapshot();
        assert_eq!(stats.improvement_count(), 3);
        assert_eq!(stats.best_score(), Some(HardSoftScore::of(0, -98)));
        assert_eq!(stats.improvements_of(0).count(), 2);
    }

    #[test]
    fn test_collector_snapshot() {
        let collector = StatisticsCollector::new();

        collector.record_step();
        collector.record_step();

        let snapshot = collector.snapshot();
        assert_eq!(snapshot.total_step_count, 2);

        collector.record_step();
        assert_eq!(collector.current_step_count(), 3);
    }

    #[test]
    fn test_collector_thread_safety() {
        let collector = StatisticsCollector::new();

        rayon::scope(|s| {
            for worker in 0..4 {
                let collector = &collector;
                s.spawn(move |_| {
                    for _ in 0..1000 {
                        collector.record_move(true);
                        collector.record_step();
                    }
                    collector.record_score_calculations(10);
                    collector.record_improvement(worker, HardSoftScore::of_soft(-(worker as i64)));
                });
            }
        });

        assert_eq!(collector.current_moves_evaluated(), 4000);
        assert_eq!(collector.current_moves_accepted(), 4000);
        assert_eq!(collector.current_step_count(), 4000);
        assert_eq!(collector.current_score_calculations(), 40);

        let stats = collector.into_statistics();
        assert_eq!(stats.best_score(), Some(HardSoftScore::ZERO));
        assert!((stats.acceptance_rate() - 1.0).abs() < f64::EPSILON);
    }
}
