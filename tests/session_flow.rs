//! Sampler, state machine, accumulator, and report tests.

use nutrisearch::engine::sampler::{self, Sampler};
use nutrisearch::{
    Advice, Catalog, CatalogItem, NutrientKind, Nutrients, Ranker, ScoredItem, Session,
    SessionState, Tokenizer, Turn, VectorSpace,
};

// ==================== Helpers ====================

fn item(id: usize, description: &str, nutrients: Nutrients) -> CatalogItem {
    CatalogItem {
        id,
        description: description.to_string(),
        nutrients,
    }
}

fn protein(grams: f64) -> Nutrients {
    Nutrients {
        protein: grams,
        ..Nutrients::default()
    }
}

/// Catalog where each row is reachable through a unique keyword, so a
/// query displays exactly one option and "1" selects it.
fn keyword_catalog() -> Catalog {
    Catalog::from_items(vec![
        item(0, "Apple pie slice", protein(10.0)),
        item(1, "Beef jerky strip", protein(15.0)),
        item(2, "Cheddar cheese cube", protein(7.0)),
    ])
    .unwrap()
}

fn ranked(rows: &[usize]) -> Vec<ScoredItem> {
    rows.iter()
        .enumerate()
        .map(|(i, &row)| ScoredItem {
            row,
            score: 1.0 - i as f32 * 0.1,
        })
        .collect()
}

// ==================== Sampler Tests ====================

#[test]
fn test_sampler_is_a_permutation() {
    let mut s = Sampler::with_seed(7);
    let input = ranked(&[0, 1, 2, 3, 4]);
    let display = s.sample(&input);

    assert_eq!(display.len(), input.len());
    let mut display_rows: Vec<usize> = display.iter().map(|r| r.row).collect();
    display_rows.sort_unstable();
    assert_eq!(display_rows, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_sampler_refresh_covers_same_set() {
    // A refresh must never introduce an item absent from the original
    // ranking, however many times it redraws.
    let mut s = Sampler::with_seed(11);
    let input = ranked(&[3, 8, 1, 9]);
    let original: Vec<usize> = {
        let mut rows: Vec<usize> = input.iter().map(|r| r.row).collect();
        rows.sort_unstable();
        rows
    };

    for _ in 0..50 {
        let mut redraw: Vec<usize> = s.sample(&input).iter().map(|r| r.row).collect();
        redraw.sort_unstable();
        assert_eq!(redraw, original);
    }
}

#[test]
fn test_sampler_seeded_is_reproducible() {
    let input = ranked(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    let a: Vec<usize> = Sampler::with_seed(42)
        .sample(&input)
        .iter()
        .map(|r| r.row)
        .collect();
    let b: Vec<usize> = Sampler::with_seed(42)
        .sample(&input)
        .iter()
        .map(|r| r.row)
        .collect();
    assert_eq!(a, b, "Same seed must draw the same permutation");
}

#[test]
fn test_choose_maps_one_based_index() {
    let display = ranked(&[4, 2, 7]);
    assert_eq!(sampler::choose(&display, 1).map(|r| r.row), Some(4));
    assert_eq!(sampler::choose(&display, 3).map(|r| r.row), Some(7));
}

#[test]
fn test_choose_rejects_out_of_range() {
    let display = ranked(&[4, 2]);
    assert!(sampler::choose(&display, 0).is_none());
    assert!(sampler::choose(&display, 3).is_none());
}

// ==================== Accumulator & Report Tests ====================

#[test]
fn test_accumulator_additivity_order_independent() {
    let profiles = [
        Nutrients {
            carbohydrate: 20.0,
            fiber: 3.0,
            protein: 10.0,
            cholesterol: 15.0,
        },
        Nutrients {
            carbohydrate: 5.5,
            fiber: 0.5,
            protein: 22.0,
            cholesterol: 80.0,
        },
        protein(4.0),
    ];

    let mut forward = SessionState::new(Nutrients::daily_targets());
    for p in &profiles {
        forward.record(p);
    }
    let mut reverse = SessionState::new(Nutrients::daily_targets());
    for p in profiles.iter().rev() {
        reverse.record(p);
    }

    assert_eq!(forward.consumed, reverse.consumed);
    assert_eq!(forward.consumed.carbohydrate, 25.5);
    assert_eq!(forward.consumed.protein, 36.0);
}

#[test]
fn test_report_advice_directions() {
    let mut state = SessionState::new(Nutrients::daily_targets());
    // Protein target is 50: exactly meeting it earns no advice.
    state.record(&protein(50.0));
    state.record(&Nutrients {
        cholesterol: 400.0,
        ..Nutrients::default()
    });

    let report = state.report();
    let by_kind = |kind: NutrientKind| report.iter().find(|r| r.kind == kind).unwrap();

    assert_eq!(by_kind(NutrientKind::Protein).advice, None);
    assert_eq!(
        by_kind(NutrientKind::Carbohydrate).advice,
        Some(Advice::Increase)
    );
    assert_eq!(
        by_kind(NutrientKind::Cholesterol).advice,
        Some(Advice::Decrease)
    );
}

// ==================== Session State Machine Tests ====================

fn options_of(turn: &Turn) -> Vec<String> {
    match turn {
        Turn::Options { options, .. } => options.iter().map(|o| o.description.clone()).collect(),
        other => panic!("expected Turn::Options, got {other:?}"),
    }
}

#[test]
fn test_session_query_select_accumulate() {
    let catalog = keyword_catalog();
    let tokenizer = Tokenizer::new();
    let space = VectorSpace::build(&catalog, &tokenizer).unwrap();
    let mut session = Session::new(
        &catalog,
        Ranker::new(&space, &tokenizer),
        Sampler::with_seed(1),
    );

    let turn = session.handle_line("apple");
    assert_eq!(options_of(&turn), vec!["Apple pie slice".to_string()]);
    assert!(!session.awaiting_query());

    let turn = session.handle_line("1");
    assert_eq!(
        turn,
        Turn::Selected {
            description: "Apple pie slice".to_string()
        }
    );
    assert!(session.awaiting_query());
    assert_eq!(session.state().consumed.protein, 10.0);
}

#[test]
fn test_session_two_selections_report_increase() {
    // Selecting protein 10 then protein 15 against the default target of
    // 50 reports 25 accumulated and advises an increase.
    let catalog = keyword_catalog();
    let tokenizer = Tokenizer::new();
    let space = VectorSpace::build(&catalog, &tokenizer).unwrap();
    let mut session = Session::new(
        &catalog,
        Ranker::new(&space, &tokenizer),
        Sampler::with_seed(1),
    );

    session.handle_line("apple");
    session.handle_line("1");
    session.handle_line("jerky");
    session.handle_line("1");

    let turn = session.handle_line("calculate");
    let report = match turn {
        Turn::Report(report) => report,
        other => panic!("expected Turn::Report, got {other:?}"),
    };
    let line = report
        .iter()
        .find(|r| r.kind == NutrientKind::Protein)
        .unwrap();
    assert_eq!(line.consumed, 25.0);
    assert_eq!(line.target, 50.0);
    assert_eq!(line.advice, Some(Advice::Increase));
    // Reporting never transitions state.
    assert!(session.awaiting_query());
}

#[test]
fn test_session_invalid_choice_leaves_state_untouched() {
    let catalog = Catalog::from_items(vec![
        item(0, "Chicken breast", protein(30.0)),
        item(1, "Chicken soup", protein(8.0)),
    ])
    .unwrap();
    let tokenizer = Tokenizer::new();
    let space = VectorSpace::build(&catalog, &tokenizer).unwrap();
    let mut session = Session::new(
        &catalog,
        Ranker::new(&space, &tokenizer),
        Sampler::with_seed(3),
    );

    let first = options_of(&session.handle_line("chicken"));
    assert_eq!(first.len(), 2);

    // Out-of-range and non-numeric input both re-prompt without touching
    // the accumulator or the displayed set.
    assert_eq!(session.handle_line("3"), Turn::Invalid { max_choice: 2 });
    assert_eq!(session.handle_line("soup?"), Turn::Invalid { max_choice: 2 });
    assert_eq!(session.state().consumed, Nutrients::default());
    assert!(!session.awaiting_query());

    // A valid selection still works afterwards.
    assert!(matches!(session.handle_line("1"), Turn::Selected { .. }));
    assert!(session.state().consumed.protein > 0.0);
}

#[test]
fn test_session_refresh_redraws_same_options() {
    let catalog = Catalog::from_items(vec![
        item(0, "Chicken breast", protein(30.0)),
        item(1, "Chicken soup", protein(8.0)),
        item(2, "Chicken thigh", protein(24.0)),
        item(3, "Chicken wing", protein(12.0)),
    ])
    .unwrap();
    let tokenizer = Tokenizer::new();
    let space = VectorSpace::build(&catalog, &tokenizer).unwrap();
    let mut session = Session::new(
        &catalog,
        Ranker::new(&space, &tokenizer),
        Sampler::with_seed(5),
    );

    let mut first = options_of(&session.handle_line("chicken"));
    first.sort();

    for _ in 0..20 {
        let turn = session.handle_line("r");
        let mut redrawn = options_of(&turn);
        redrawn.sort();
        assert_eq!(
            redrawn, first,
            "Refresh must redraw the same candidates, never new ones"
        );
        assert!(!session.awaiting_query());
    }
}

#[test]
fn test_session_new_search_discards_options() {
    let catalog = keyword_catalog();
    let tokenizer = Tokenizer::new();
    let space = VectorSpace::build(&catalog, &tokenizer).unwrap();
    let mut session = Session::new(
        &catalog,
        Ranker::new(&space, &tokenizer),
        Sampler::with_seed(1),
    );

    session.handle_line("cheese");
    assert_eq!(session.handle_line("N"), Turn::NewSearch);
    assert!(session.awaiting_query());
    assert_eq!(session.state().consumed, Nutrients::default());
}

#[test]
fn test_session_no_match_stays_at_query_prompt() {
    let catalog = keyword_catalog();
    let tokenizer = Tokenizer::new();
    let space = VectorSpace::build(&catalog, &tokenizer).unwrap();
    let mut session = Session::new(
        &catalog,
        Ranker::new(&space, &tokenizer),
        Sampler::with_seed(1),
    );

    assert_eq!(session.handle_line("zucchini"), Turn::NoMatch);
    assert!(session.awaiting_query());

    // A query of nothing but stop words normalizes to empty and is also
    // a no-match, not an error.
    assert_eq!(session.handle_line("the and of"), Turn::NoMatch);
    assert!(session.awaiting_query());
}

#[test]
fn test_session_quit_commands() {
    let catalog = keyword_catalog();
    let tokenizer = Tokenizer::new();
    let space = VectorSpace::build(&catalog, &tokenizer).unwrap();

    // "exit" from the query prompt.
    let mut session = Session::new(
        &catalog,
        Ranker::new(&space, &tokenizer),
        Sampler::with_seed(1),
    );
    assert_eq!(session.handle_line("EXIT"), Turn::Quit);
    assert!(session.finished());

    // "q" from the options prompt, case-insensitive.
    let mut session = Session::new(
        &catalog,
        Ranker::new(&space, &tokenizer),
        Sampler::with_seed(1),
    );
    session.handle_line("apple");
    assert_eq!(session.handle_line("Q"), Turn::Quit);
    assert!(session.finished());
}

#[test]
fn test_session_commands_case_insensitive() {
    let catalog = keyword_catalog();
    let tokenizer = Tokenizer::new();
    let space = VectorSpace::build(&catalog, &tokenizer).unwrap();
    let mut session = Session::new(
        &catalog,
        Ranker::new(&space, &tokenizer),
        Sampler::with_seed(1),
    );

    session.handle_line("apple");
    assert!(matches!(session.handle_line("R"), Turn::Options { .. }));
    assert!(matches!(session.handle_line("n"), Turn::NewSearch));

    assert!(matches!(session.handle_line("CALCULATE"), Turn::Report(_)));
}

#[test]
fn test_session_fresh_report_is_all_increase() {
    let catalog = keyword_catalog();
    let tokenizer = Tokenizer::new();
    let space = VectorSpace::build(&catalog, &tokenizer).unwrap();
    let mut session = Session::new(
        &catalog,
        Ranker::new(&space, &tokenizer),
        Sampler::with_seed(1),
    );

    let report = match session.handle_line("calculate") {
        Turn::Report(report) => report,
        other => panic!("expected Turn::Report, got {other:?}"),
    };
    assert_eq!(report.len(), NutrientKind::ALL.len());
    for line in &report {
        assert_eq!(line.consumed, 0.0);
        assert_eq!(line.advice, Some(Advice::Increase));
    }
}
