use decision_dice::presentation::FaceSymbol;
use decision_dice::sequencer::RollSequencer;
use decision_dice::{CustomSidesOutcome, DecisionState, DieSelection};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Play a whole roll the way the UI driver does, minus the timers.
fn roll(state: &mut DecisionState, sequencer: &mut RollSequencer, rng: &mut StdRng) -> u32 {
    let sides = state.begin_roll().unwrap();
    let mut frame = sequencer.start(sides, rng).unwrap();
    let ticket = sequencer.ticket();
    loop {
        assert!(state.is_rolling() || frame.committed().is_some());
        match frame.committed() {
            Some(face) => state.commit_roll(face),
            None => {
                if let Some(symbol) = frame.symbol {
                    state.show_symbol(symbol);
                }
            }
        }
        match sequencer.advance(ticket, rng) {
            Some(next) => frame = next,
            None => break,
        }
    }
    state.result().unwrap()
}

#[test]
fn d6_without_labels_shows_no_decision() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut sequencer = RollSequencer::new();
    let mut state = DecisionState::new();
    state.select_die(DieSelection::D6);

    for _ in 0..50 {
        let face = roll(&mut state, &mut sequencer, &mut rng);
        assert!((1..=6).contains(&face));
        assert!(!state.is_rolling());
        assert_eq!(state.decision(), None);
        assert!(matches!(state.display(), FaceSymbol::Glyph(_)));
    }
}

#[test]
fn labelled_face_is_echoed() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut sequencer = RollSequencer::new();
    let mut state = DecisionState::new();
    state.select_die(DieSelection::D6);
    state.set_label(2, "Go to the gym".to_string());

    let mut hit = false;
    for _ in 0..500 {
        if roll(&mut state, &mut sequencer, &mut rng) == 3 {
            hit = true;
            break;
        }
        assert_eq!(state.decision(), None);
    }
    assert!(hit, "never rolled a 3");
    assert_eq!(state.decision(), Some("Go to the gym"));
    assert_eq!(state.display(), FaceSymbol::Glyph('⚂'));
}

#[test]
fn oversized_custom_input_is_capped() {
    let mut state = DecisionState::new();
    state.select_die(DieSelection::Custom);

    let outcome = state.set_custom_sides(Some(150));
    assert_eq!(outcome, CustomSidesOutcome::Capped { requested: 150 });
    assert!(outcome.warning().is_some());
    assert_eq!(state.custom_sides(), 100);
    assert_eq!(state.selection(), DieSelection::Custom);
    assert_eq!(state.labels().len(), 100);
}

#[test]
fn cleared_custom_input_falls_back_to_two() {
    let mut state = DecisionState::new();
    state.select_die(DieSelection::Custom);
    state.set_custom_sides(None);
    assert_eq!(state.custom_sides(), 2);
    assert_eq!(state.selection(), DieSelection::Custom);
    assert_eq!(state.effective_sides(), 2);
}

#[test]
fn custom_input_switches_away_from_fixed_die() {
    let mut state = DecisionState::new();
    state.select_die(DieSelection::D20);
    assert_eq!(state.set_custom_sides(Some(37)), CustomSidesOutcome::Applied(37));
    assert_eq!(state.selection(), DieSelection::Custom);
    assert_eq!(state.effective_sides(), 37);
}

#[test]
fn selecting_the_same_die_twice_changes_nothing() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut sequencer = RollSequencer::new();
    let mut state = DecisionState::new();

    state.select_die(DieSelection::D10);
    state.set_label(9, "Ten".to_string());
    roll(&mut state, &mut sequencer, &mut rng);
    let snapshot = state.clone();

    state.select_die(DieSelection::D10);
    assert_eq!(state, snapshot);
}

#[test]
fn every_roll_lands_in_range() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut sequencer = RollSequencer::new();
    let mut state = DecisionState::new();

    for die in DieSelection::ALL {
        state.select_die(die);
        let sides = state.effective_sides();
        for _ in 0..20 {
            let face = roll(&mut state, &mut sequencer, &mut rng);
            assert!((1..=sides).contains(&face));
            assert!(!state.is_rolling());
        }
    }

    state.set_custom_sides(Some(100));
    for _ in 0..20 {
        let face = roll(&mut state, &mut sequencer, &mut rng);
        assert!((1..=100).contains(&face));
        assert!(matches!(state.display(), FaceSymbol::Numeral(n) if n == face));
    }
}
