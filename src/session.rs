use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::{ClipCatalog, clip_path};
use crate::dance::DanceType;

/// Result of submitting an answer for the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The placeholder option was submitted. The round is still open.
    NoSelection,
    /// The round was already answered; nothing changed.
    AlreadyAnswered,
    Correct { dance: DanceType },
    Wrong {
        expected: DanceType,
        given: DanceType,
    },
}

/// Result of trying to move on to the next round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// The current round has not been answered yet; nothing changed.
    AwaitingAnswer { round: usize },
    InProgress { round: usize },
    Finished { correct: usize, total: usize },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("round count must be between 1 and {max} but was {requested}")]
    InvalidRoundCount { requested: usize, max: usize },
    #[error("no clip available for {dance}")]
    EmptyPool { dance: DanceType },
}

/// One answered round, kept for the end-of-quiz summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    pub round: usize,
    pub dance: DanceType,
    pub clip: String,
    pub answer: DanceType,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub correct: usize,
    pub total: usize,
    pub rounds: Vec<RoundRecord>,
}

/// State of one playthrough: the clip chosen per dance type, the order the
/// dance types are played in, and the score so far.
///
/// `round` is 1-based and stays within `1..=total_rounds`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    selections: BTreeMap<DanceType, String>,
    order: Vec<DanceType>,
    round: usize,
    total_rounds: usize,
    correct: usize,
    answered: bool,
    finished: bool,
    history: Vec<RoundRecord>,
}

impl Session {
    /// Starts a session that plays every dance type once.
    pub fn new<R: Rng + ?Sized>(rng: &mut R, catalog: &ClipCatalog) -> Result<Self, SessionError> {
        Self::with_rounds(rng, catalog, DanceType::ALL.len())
    }

    /// Starts a session with `total_rounds` rounds, taken from the front of a
    /// shuffled order of all dance types.
    ///
    /// # Errors
    /// * Returns [`SessionError::InvalidRoundCount`] unless `1 <= total_rounds <= 6`.
    /// * Returns [`SessionError::EmptyPool`] if a dance type has no clips.
    pub fn with_rounds<R: Rng + ?Sized>(
        rng: &mut R,
        catalog: &ClipCatalog,
        total_rounds: usize,
    ) -> Result<Self, SessionError> {
        let max = DanceType::ALL.len();
        if total_rounds == 0 || total_rounds > max {
            return Err(SessionError::InvalidRoundCount {
                requested: total_rounds,
                max,
            });
        }

        let mut selections = BTreeMap::new();
        for dance in DanceType::ALL {
            let clip = catalog
                .pool(dance)
                .choose(rng)
                .ok_or(SessionError::EmptyPool { dance })?;
            selections.insert(dance, clip.clone());
        }

        let mut order = DanceType::ALL.to_vec();
        order.shuffle(rng);

        tracing::debug!(?order, total_rounds, "started quiz session");

        Ok(Self {
            selections,
            order,
            round: 1,
            total_rounds,
            correct: 0,
            answered: false,
            finished: false,
            history: Vec::with_capacity(total_rounds),
        })
    }

    /// Throws the current state away and starts over with the same round count.
    pub fn replay<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        catalog: &ClipCatalog,
    ) -> Result<(), SessionError> {
        *self = Self::with_rounds(rng, catalog, self.total_rounds)?;
        Ok(())
    }

    /// Checks `candidate` against the current round. `None` is the placeholder
    /// option and leaves the round open.
    pub fn submit_answer(&mut self, candidate: Option<DanceType>) -> AnswerOutcome {
        if self.answered {
            return AnswerOutcome::AlreadyAnswered;
        }

        let Some(given) = candidate else {
            return AnswerOutcome::NoSelection;
        };

        let expected = self.current_dance();
        let correct = given == expected;

        if correct {
            self.correct += 1;
        }
        self.answered = true;
        self.history.push(RoundRecord {
            round: self.round,
            dance: expected,
            clip: self.current_clip().to_string(),
            answer: given,
            correct,
        });

        tracing::debug!(round = self.round, %expected, %given, correct, "answer submitted");

        if correct {
            AnswerOutcome::Correct { dance: expected }
        } else {
            AnswerOutcome::Wrong { expected, given }
        }
    }

    pub fn advance_round(&mut self) -> RoundState {
        if self.finished {
            return self.finished_state();
        }

        if !self.answered {
            return RoundState::AwaitingAnswer { round: self.round };
        }

        if self.round < self.total_rounds {
            self.round += 1;
            self.answered = false;
            tracing::debug!(round = self.round, "advanced to next round");
            RoundState::InProgress { round: self.round }
        } else {
            self.finished = true;
            tracing::info!(
                correct = self.correct,
                total = self.total_rounds,
                "quiz session finished"
            );
            self.finished_state()
        }
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn total_rounds(&self) -> usize {
        self.total_rounds
    }

    pub fn correct_count(&self) -> usize {
        self.correct
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Presentation order of all dance types for this session.
    pub fn order(&self) -> &[DanceType] {
        &self.order
    }

    pub fn current_dance(&self) -> DanceType {
        self.order[self.round - 1]
    }

    pub fn selected_clip(&self, dance: DanceType) -> &str {
        self.selections
            .get(&dance)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn current_clip(&self) -> &str {
        self.selected_clip(self.current_dance())
    }

    /// Path the audio surface should load for the current round.
    pub fn current_clip_path(&self, base_dir: &str) -> String {
        clip_path(base_dir, self.current_clip())
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            correct: self.correct,
            total: self.total_rounds,
            rounds: self.history.clone(),
        }
    }

    fn finished_state(&self) -> RoundState {
        RoundState::Finished {
            correct: self.correct,
            total: self.total_rounds,
        }
    }
}

impl SessionSummary {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 * 100.0 / self.total as f64
        }
    }
}

impl fmt::Display for AnswerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerOutcome::NoSelection => f.write_str("Please choose a dance type first."),
            AnswerOutcome::AlreadyAnswered => {
                f.write_str("You already answered this round. Go on to the next clip.")
            }
            AnswerOutcome::Correct { dance } => write!(f, "Correct! This was a {}.", dance),
            AnswerOutcome::Wrong { expected, .. } => {
                write!(f, "Not quite. This was a {}.", expected)
            }
        }
    }
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundState::AwaitingAnswer { .. } => {
                f.write_str("Please answer this round before moving on.")
            }
            RoundState::InProgress { round } => write!(f, "Round {}", round),
            RoundState::Finished { correct, total } => {
                write!(f, "Quiz finished: {} of {} correct.", correct, total)
            }
        }
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} correct ({:.0}%)",
            self.correct,
            self.total,
            self.percentage()
        )
    }
}
