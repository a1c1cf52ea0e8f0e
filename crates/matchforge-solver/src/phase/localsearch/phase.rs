//! Local search phase implementation.

use std::fmt::{self, Debug};

use tracing::{debug, trace};

use matchforge_core::Result;
use matchforge_scoring::ScoreDirector;

use crate::heuristic::{RandomMoveSelector, ScheduleMove};
use crate::phase::localsearch::{AcceptedCountForager, Acceptor, LocalSearchForager};
use crate::phase::{Phase, PhaseReport};
use crate::scope::SolverScope;
use crate::termination::{OrTermination, Termination};

/// Local search phase that improves an existing solution.
///
/// This phase iteratively:
/// 1. Draws a batch of candidate moves
/// 2. Scores each move and undoes it
/// 3. Accepts or rejects it through the acceptor
/// 4. Applies the best accepted move collected by the forager
///
/// The solve deadline is checked before every move evaluation.
pub struct LocalSearchPhase<D: ScoreDirector> {
    move_selector: RandomMoveSelector,
    acceptor: Box<dyn Acceptor>,
    forager: AcceptedCountForager,
    termination: OrTermination<D>,
    moves: Vec<ScheduleMove>,
}

impl<D: ScoreDirector> LocalSearchPhase<D> {
    pub fn new(
        move_selector: RandomMoveSelector,
        acceptor: Box<dyn Acceptor>,
        forager: AcceptedCountForager,
        termination: OrTermination<D>,
    ) -> Self {
        let moves = Vec::with_capacity(move_selector.batch_size());
        Self {
            move_selector,
            acceptor,
            forager,
            termination,
            moves,
        }
    }
}

impl<D: ScoreDirector> Debug for LocalSearchPhase<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSearchPhase")
            .field("move_selector", &self.move_selector)
            .field("acceptor", &self.acceptor)
            .field("forager", &self.forager)
            .field("termination", &self.termination)
            .finish()
    }
}

impl<D: ScoreDirector> Phase<D> for LocalSearchPhase<D> {
    fn solve(&mut self, solver_scope: &mut SolverScope<'_, D>) -> Result<PhaseReport> {
        let mut report = PhaseReport::default();
        let mut last_step_score = solver_scope.score();
        self.acceptor.phase_started(&last_step_score);

        'steps: loop {
            if solver_scope.should_terminate() || self.termination.is_terminated(solver_scope) {
                break;
            }

            self.forager.step_started();
            let model = solver_scope.model();
            let (solution, rng) = solver_scope.solution_and_rng();
            self.move_selector
                .select_moves(model, solution, rng, &mut self.moves);

            for &m in &self.moves {
                if solver_scope.is_past_deadline() {
                    break 'steps;
                }
                if !m.is_doable(solver_scope.score_director()) {
                    continue;
                }

                let move_score = m.evaluate(solver_scope.score_director_mut());
                let accepted = self.acceptor.is_accepted(&last_step_score, &move_score);
                solver_scope.record_move(accepted);
                report.moves_evaluated += 1;
                trace!(
                    worker = solver_scope.worker(),
                    kind = m.kind(),
                    score = %move_score,
                    accepted,
                    "Move evaluated"
                );

                if accepted {
                    report.moves_accepted += 1;
                    self.forager.add_move(m, move_score);
                    if self.forager.is_quit_early() {
                        break;
                    }
                }
            }

            if let Some((selected, selected_score)) = self.forager.pick_move() {
                let score = selected.do_move(solver_scope.score_director_mut());
                debug_assert_eq!(score, selected_score);
                last_step_score = score;
            }
            self.acceptor.step_ended(&last_step_score);
            solver_scope.increment_step_count();
            report.steps += 1;
            solver_scope.assert_score()?;
            solver_scope.update_best_solution();
        }

        self.acceptor.phase_ended();
        debug!(
            worker = solver_scope.worker(),
            steps = report.steps,
            moves_evaluated = report.moves_evaluated,
            best_score = ?solver_scope.best_score(),
            "Local search phase ended"
        );
        Ok(report)
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }
}
