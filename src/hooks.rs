use std::cell::RefCell;
use std::rc::Rc;

use decision_dice::sequencer::{Frame, RollSequencer};
use decision_dice::{DecisionState, RollError};
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use log::{debug, info, warn};
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::effects::{find_visual_target, play_frame};

/// A message that disappears on its own.
#[derive(Clone)]
pub struct TransientMessage {
    /// The message currently shown, if any.
    pub text: Option<String>,
    /// Show a message, replacing the current one and restarting its timer.
    pub show: Callback<String>,
}

/// Custom hook for a message that clears itself after `duration_ms`.
#[hook]
pub fn use_transient_message(duration_ms: u32) -> TransientMessage {
    let text_handle: UseStateHandle<Option<String>> = use_state(|| None::<String>);
    let timer = use_mut_ref(|| None::<Timeout>);

    let show = {
        let text_setter = text_handle.clone();
        Callback::from(move |message: String| {
            text_setter.set(Some(message));
            let text_clearer = text_setter.clone();
            // Replacing the handle cancels any pending dismissal.
            *timer.borrow_mut() = Some(Timeout::new(duration_ms, move || {
                text_clearer.set(None);
            }));
        })
    };

    TransientMessage {
        text: (*text_handle).clone(),
        show,
    }
}

/// Custom hook returning the callback that rolls the die.
///
/// The roll mutates `state` in place and emits `on_change` whenever the view
/// needs to catch up.
#[hook]
pub fn use_roll_driver(
    state: Rc<RefCell<DecisionState>>,
    on_change: Callback<()>,
) -> Callback<()> {
    let sequencer = use_mut_ref(RollSequencer::new);

    Callback::from(move |_| {
        start_roll(state.clone(), sequencer.clone(), on_change.clone());
    })
}

fn start_roll(
    state: Rc<RefCell<DecisionState>>,
    sequencer: Rc<RefCell<RollSequencer>>,
    on_change: Callback<()>,
) {
    let sides = match state.borrow_mut().begin_roll() {
        Ok(sides) => sides,
        Err(e) => {
            debug!("Roll request ignored: {}", e);
            return;
        }
    };
    on_change.emit(());

    let element = match find_visual_target() {
        Some(element) => element,
        None => {
            warn!("{}, abandoning roll", RollError::TargetMissing);
            state.borrow_mut().abort_roll();
            on_change.emit(());
            return;
        }
    };

    let started = sequencer.borrow_mut().start(sides, &mut rand::rng());
    let first = match started {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Could not start roll: {}", e);
            state.borrow_mut().abort_roll();
            on_change.emit(());
            return;
        }
    };
    let ticket = sequencer.borrow().ticket();

    wasm_bindgen_futures::spawn_local(drive_roll(
        element, first, ticket, state, sequencer, on_change,
    ));
}

/// Play frames until the sequencer runs out or the ticket goes stale.
async fn drive_roll(
    element: HtmlElement,
    first: Frame,
    ticket: u64,
    state: Rc<RefCell<DecisionState>>,
    sequencer: Rc<RefCell<RollSequencer>>,
    on_change: Callback<()>,
) {
    let started_at = js_sys::Date::now();
    let mut frame = first;
    loop {
        play_frame(&element, &frame);
        apply_frame(&state, &frame, started_at);
        on_change.emit(());

        TimeoutFuture::new(frame.duration_ms).await;

        let next = sequencer.borrow_mut().advance(ticket, &mut rand::rng());
        match next {
            Some(next) => frame = next,
            None => break,
        }
    }
}

fn apply_frame(state: &RefCell<DecisionState>, frame: &Frame, started_at: f64) {
    let mut state = state.borrow_mut();
    if let Some(face) = frame.committed() {
        state.commit_roll(face);
        info!(
            "Roll settled after {:.0} ms",
            js_sys::Date::now() - started_at
        );
    } else if let Some(symbol) = frame.symbol {
        state.show_symbol(symbol);
    }
}
