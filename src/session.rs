//! Interactive session: the turn-by-turn state machine.
//!
//! The controller owns the only mutable state in the process (the
//! nutrient accumulator and the current phase) and drives it through a
//! single `handle_line` entry point. It returns structured [`Turn`]
//! values; all printing belongs to the binary. Refresh is an ordinary
//! iteration of the options phase, never recursion.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::engine::ranker::{Ranker, ScoredItem};
use crate::engine::sampler::{self, Sampler};
use crate::types::{NutrientKind, Nutrients};

/// Where the session currently is.
#[derive(Debug, Clone, PartialEq)]
enum Phase {
    AwaitingQuery,
    ShowingOptions {
        query: String,
        ranked: Vec<ScoredItem>,
        displayed: Vec<ScoredItem>,
    },
    Finished,
}

/// Accumulated nutrients against their targets. Zero-initialized; only
/// a confirmed selection mutates it.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub consumed: Nutrients,
    pub targets: Nutrients,
}

impl SessionState {
    pub fn new(targets: Nutrients) -> Self {
        Self {
            consumed: Nutrients::default(),
            targets,
        }
    }

    /// Commit one selected item's nutrients into the accumulator.
    pub fn record(&mut self, nutrients: &Nutrients) {
        self.consumed.add(nutrients);
    }

    /// Per-nutrient progress report with directional advice where the
    /// accumulated value differs from the target.
    pub fn report(&self) -> Vec<NutrientReport> {
        NutrientKind::ALL
            .iter()
            .map(|&kind| {
                let consumed = self.consumed.get(kind);
                let target = self.targets.get(kind);
                let advice = if consumed < target {
                    Some(Advice::Increase)
                } else if consumed > target {
                    Some(Advice::Decrease)
                } else {
                    None
                };
                NutrientReport {
                    kind,
                    consumed,
                    target,
                    advice,
                }
            })
            .collect()
    }
}

/// Direction to adjust a nutrient relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Advice {
    Increase,
    Decrease,
}

/// One line of the cumulative report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientReport {
    pub kind: NutrientKind,
    pub consumed: f64,
    pub target: f64,
    pub advice: Option<Advice>,
}

/// An option as shown to the user: 1-based display number plus the row's
/// description.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedOption {
    pub number: usize,
    pub description: String,
}

/// What a turn produced; the binary renders these.
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    /// Ranked options to display, in sampled order, for the given query.
    Options {
        query: String,
        options: Vec<DisplayedOption>,
    },
    /// The query matched nothing (including stopword-only queries).
    NoMatch,
    /// An item was selected and its nutrients recorded.
    Selected { description: String },
    /// The current options were discarded; back to the query prompt.
    NewSearch,
    /// The cumulative report, one entry per nutrient.
    Report(Vec<NutrientReport>),
    /// Unrecognized or out-of-range choice; same prompt re-issues.
    Invalid { max_choice: usize },
    /// Session over.
    Quit,
}

/// The session controller: catalog + ranker + sampler plus the mutable
/// phase and accumulator.
pub struct Session<'a> {
    catalog: &'a Catalog,
    ranker: Ranker<'a>,
    sampler: Sampler,
    state: SessionState,
    phase: Phase,
}

impl<'a> Session<'a> {
    pub fn new(catalog: &'a Catalog, ranker: Ranker<'a>, sampler: Sampler) -> Self {
        Self {
            catalog,
            ranker,
            sampler,
            state: SessionState::new(Nutrients::daily_targets()),
            phase: Phase::AwaitingQuery,
        }
    }

    /// Whether the next line is a free-text query (as opposed to an
    /// option choice). Lets the binary pick the right prompt.
    pub fn awaiting_query(&self) -> bool {
        matches!(self.phase, Phase::AwaitingQuery)
    }

    /// Whether the session reached its terminal state.
    pub fn finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    /// Read-only view of the accumulator, mainly for tests.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Advance the state machine by one line of user input.
    pub fn handle_line(&mut self, line: &str) -> Turn {
        let input = line.trim();
        match self.phase {
            Phase::AwaitingQuery => self.handle_query(input),
            Phase::ShowingOptions { .. } => self.handle_choice(input),
            Phase::Finished => Turn::Quit,
        }
    }

    fn handle_query(&mut self, input: &str) -> Turn {
        if input.eq_ignore_ascii_case("exit") {
            self.phase = Phase::Finished;
            return Turn::Quit;
        }
        if input.eq_ignore_ascii_case("calculate") {
            // Reporting never transitions state.
            return Turn::Report(self.state.report());
        }

        let ranked = self.ranker.rank(input);
        if ranked.is_empty() {
            return Turn::NoMatch;
        }

        let displayed = self.sampler.sample(&ranked);
        let options = self.displayed_options(&displayed);
        let query = input.to_string();
        self.phase = Phase::ShowingOptions {
            query: query.clone(),
            ranked,
            displayed,
        };
        Turn::Options { query, options }
    }

    fn handle_choice(&mut self, input: &str) -> Turn {
        let (query, ranked, displayed) = match &self.phase {
            Phase::ShowingOptions {
                query,
                ranked,
                displayed,
            } => (query.clone(), ranked.clone(), displayed.clone()),
            _ => unreachable!("handle_choice outside ShowingOptions"),
        };

        if input.eq_ignore_ascii_case("q") {
            self.phase = Phase::Finished;
            return Turn::Quit;
        }
        if input.eq_ignore_ascii_case("n") {
            self.phase = Phase::AwaitingQuery;
            return Turn::NewSearch;
        }
        if input.eq_ignore_ascii_case("r") {
            // Same ranked set, fresh display order.
            let redrawn = self.sampler.sample(&ranked);
            let options = self.displayed_options(&redrawn);
            self.phase = Phase::ShowingOptions {
                query: query.clone(),
                ranked,
                displayed: redrawn,
            };
            return Turn::Options { query, options };
        }

        let chosen = input
            .parse::<usize>()
            .ok()
            .and_then(|choice| sampler::choose(&displayed, choice))
            .and_then(|item| self.catalog.get(item.row));
        match chosen {
            Some(row) => {
                let nutrients = row.nutrients;
                let description = row.description.clone();
                self.state.record(&nutrients);
                self.phase = Phase::AwaitingQuery;
                Turn::Selected { description }
            }
            None => Turn::Invalid {
                max_choice: displayed.len(),
            },
        }
    }

    fn displayed_options(&self, displayed: &[ScoredItem]) -> Vec<DisplayedOption> {
        displayed
            .iter()
            .filter_map(|item| self.catalog.get(item.row))
            .enumerate()
            .map(|(i, row)| DisplayedOption {
                number: i + 1,
                description: row.description.clone(),
            })
            .collect()
    }
}
