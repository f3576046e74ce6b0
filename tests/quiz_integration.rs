use dancequiz::{AnswerOutcome, DanceType, RoundState, Session, demo_catalog};
use rand::SeedableRng;

fn other_than(dance: DanceType) -> DanceType {
    DanceType::ALL
        .into_iter()
        .find(|candidate| *candidate != dance)
        .expect("there is more than one dance type")
}

#[test]
fn deterministic_session_from_seed() {
    let catalog = demo_catalog();

    let first = Session::new(&mut rand::rngs::StdRng::seed_from_u64(99), &catalog)
        .expect("session should start");
    let second = Session::new(&mut rand::rngs::StdRng::seed_from_u64(99), &catalog)
        .expect("session should start");

    assert_eq!(first.order(), second.order());
    for dance in DanceType::ALL {
        assert_eq!(first.selected_clip(dance), second.selected_clip(dance));
    }
}

#[test]
fn five_rounds_with_one_miss_scores_four() {
    let catalog = demo_catalog();
    let mut rng = rand::rngs::StdRng::seed_from_u64(5);
    let mut session = Session::with_rounds(&mut rng, &catalog, 5).expect("session should start");

    let mut states = Vec::new();
    for round in 1..=5 {
        let dance = session.current_dance();
        let outcome = if round == 3 {
            session.submit_answer(Some(other_than(dance)))
        } else {
            session.submit_answer(Some(dance))
        };

        if round == 3 {
            assert!(matches!(outcome, AnswerOutcome::Wrong { expected, .. } if expected == dance));
        } else {
            assert_eq!(outcome, AnswerOutcome::Correct { dance });
        }

        states.push(session.advance_round());
    }

    assert_eq!(
        states.last(),
        Some(&RoundState::Finished {
            correct: 4,
            total: 5
        })
    );
    assert!(
        states[..4]
            .iter()
            .all(|state| matches!(state, RoundState::InProgress { .. }))
    );
}

#[test]
fn invalid_actions_leave_state_untouched() {
    let catalog = demo_catalog();
    let mut rng = rand::rngs::StdRng::seed_from_u64(12);
    let mut session = Session::new(&mut rng, &catalog).expect("session should start");
    let before = session.clone();

    assert_eq!(session.submit_answer(None), AnswerOutcome::NoSelection);
    assert_eq!(
        session.advance_round(),
        RoundState::AwaitingAnswer { round: 1 }
    );
    assert_eq!(session, before);
}

#[test]
fn rounds_visit_distinct_dances() {
    let catalog = demo_catalog();
    let mut rng = rand::rngs::StdRng::seed_from_u64(31);
    let mut session = Session::new(&mut rng, &catalog).expect("session should start");

    let mut visited = Vec::new();
    loop {
        let dance = session.current_dance();
        visited.push(dance);
        session.submit_answer(Some(dance));
        if let RoundState::Finished { correct, total } = session.advance_round() {
            assert_eq!(correct, total);
            break;
        }
    }

    visited.sort();
    assert_eq!(visited, DanceType::ALL.to_vec());
}
