//! Main module for the Decision Dice application using Yew.
//! Wires UI components, state hooks, and side-effect logic.

use decision_dice::config::WARNING_DISPLAY_MS;
use decision_dice::{DecisionState, DieSelection};
use yew::prelude::*;

mod components;
mod effects;
mod hooks;
mod utils;

use components::{
    render_outcome, ChoicesList, CustomSidesInput, DieSelect, InfoModal, WarningToast,
};
use hooks::{use_roll_driver, use_transient_message};

/// Primary application component wiring state, effects, and UI elements.
#[function_component(Main)]
fn main_component() -> Html {
    // Shared with the roll driver, which mutates it from timer callbacks.
    let state = use_mut_ref(DecisionState::new);
    let refresh = use_force_update();
    let warning = use_transient_message(WARNING_DISPLAY_MS);
    let info_visible = use_state(|| false);

    let on_change = {
        let refresh = refresh.clone();
        Callback::from(move |_: ()| refresh.force_update())
    };
    let roll = use_roll_driver(state.clone(), on_change.clone());

    let on_die_change = {
        let state = state.clone();
        let on_change = on_change.clone();
        Callback::from(move |die: DieSelection| {
            if state.borrow_mut().select_die(die) {
                on_change.emit(());
            }
        })
    };

    let on_custom_sides = {
        let state = state.clone();
        let on_change = on_change.clone();
        let show_warning = warning.show.clone();
        Callback::from(move |value: Option<i64>| {
            let outcome = state.borrow_mut().set_custom_sides(value);
            if let Some(message) = outcome.warning() {
                show_warning.emit(message);
            }
            on_change.emit(());
        })
    };

    let on_label_change = {
        let state = state.clone();
        let on_change = on_change.clone();
        Callback::from(move |(idx, text): (usize, String)| {
            state.borrow_mut().set_label(idx, text);
            on_change.emit(());
        })
    };

    let open_info = {
        let info_visible = info_visible.clone();
        Callback::from(move |_: MouseEvent| info_visible.set(true))
    };
    let close_info = {
        let info_visible = info_visible.clone();
        Callback::from(move |_: ()| info_visible.set(false))
    };

    // Render from a snapshot so no borrow is held while callbacks run.
    let view = state.borrow().clone();
    let sides = view.effective_sides();
    let rolling = view.is_rolling();

    html! {
        <div class="app-container">
            <h2 class="app-title">{ "Decision Maker Deluxe" }</h2>
            <WarningToast message={warning.text.clone()} />

            <div class="layout-grid">
                <div class="grid-column-main">
                    <div class="config-card">
                        <h3>{ "Configure Your Destiny" }</h3>
                        <div class="form-row">
                            <DieSelect
                                selected={view.selection()}
                                disabled={rolling}
                                onchange={on_die_change}
                            />
                            if view.selection() == DieSelection::Custom {
                                <CustomSidesInput
                                    value={view.custom_sides()}
                                    disabled={rolling}
                                    oninput={on_custom_sides}
                                />
                            }
                            <button class="info-button"
                                title="How random results can help"
                                onclick={open_info}
                            >
                                { "ⓘ" }
                            </button>
                        </div>
                    </div>

                    <div class="roll-section">
                        <div class="animated-dice-container">
                            <div class="animated-dice-visual">{ view.display().to_string() }</div>
                        </div>
                        <button class="roll-button"
                            disabled={rolling}
                            onclick={roll.reform(|_: MouseEvent| ())}
                        >
                            { if rolling { "Rolling...".to_string() } else { format!("Roll D{}!", sides) } }
                        </button>

                        if let Some(result) = view.result() {
                            { render_outcome(result, view.decision()) }
                        }
                    </div>
                </div>

                <div class="grid-column-choices">
                    <ChoicesList
                        labels={view.labels().to_vec()}
                        disabled={rolling}
                        onchange={on_label_change}
                    />
                </div>
            </div>

            <InfoModal open={*info_visible} on_close={close_info} />
        </div>
    }
}

/// App wrapper hosting the main component.
#[function_component]
pub fn App() -> Html {
    html! {
        <Main />
    }
}

/// Entry point: installs the panic hook and renders the App component.
fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
