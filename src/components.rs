//! Pure Yew view components for the Decision Dice UI.
//!
//! These render from props only; all state lives in `main.rs`.

use crate::utils::parse_custom_sides;
use decision_dice::config::{MAX_CUSTOM_SIDES, MIN_SIDES};
use decision_dice::DieSelection;
use log::debug;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Drop-down for the die type.
#[derive(Properties, PartialEq)]
pub struct DieSelectProps {
    pub selected: DieSelection,
    pub disabled: bool,
    pub onchange: Callback<DieSelection>,
}

#[function_component(DieSelect)]
pub fn die_select(props: &DieSelectProps) -> Html {
    let onchange = {
        let cb = props.onchange.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<DieSelection>() {
                Ok(die) => cb.emit(die),
                Err(err) => debug!("{}", err),
            }
        })
    };

    html! {
        <div class="form-group">
            <label for="die_type">{ "Dice Type:" }</label>
            <select id="die_type"
                class="dice-select"
                disabled={props.disabled}
                {onchange}
            >
                { DieSelection::ALL.iter().map(|die| html! {
                    <option value={die.key()} selected={*die == props.selected}>
                        { die.label() }
                    </option>
                }).collect::<Html>() }
            </select>
        </div>
    }
}

/// Numeric input for the custom side count. Only rendered for custom dice.
#[derive(Properties, PartialEq)]
pub struct CustomSidesInputProps {
    pub value: u32,
    pub disabled: bool,
    /// Receives `None` when the field is cleared.
    pub oninput: Callback<Option<i64>>,
}

#[function_component(CustomSidesInput)]
pub fn custom_sides_input(props: &CustomSidesInputProps) -> Html {
    let oninput = {
        let cb = props.oninput.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            match parse_custom_sides(&input.value()) {
                Ok(value) => cb.emit(value),
                Err(err) => debug!("{}", err),
            }
        })
    };

    html! {
        <div class="form-group">
            <label for="custom_sides">
                { format!("Custom Sides ({}-{}):", MIN_SIDES, MAX_CUSTOM_SIDES) }
            </label>
            <input type="number"
                id="custom_sides"
                min={MIN_SIDES.to_string()}
                max={MAX_CUSTOM_SIDES.to_string()}
                placeholder="Sides"
                value={props.value.to_string()}
                disabled={props.disabled}
                {oninput}
            />
        </div>
    }
}

/// One text input per face.
#[derive(Properties, PartialEq)]
pub struct ChoicesListProps {
    pub labels: Vec<String>,
    pub disabled: bool,
    pub onchange: Callback<(usize, String)>,
}

#[function_component(ChoicesList)]
pub fn choices_list(props: &ChoicesListProps) -> Html {
    html! {
        <div class="choices-card">
            <h3>{ "Define Your Choices (Optional)" }</h3>
            <p class="hint">{ format!("Enter up to {} choices.", props.labels.len()) }</p>
            <div class="choices-list-container">
                { props.labels.iter().enumerate().map(|(idx, label)| {
                    let cb = props.onchange.clone();
                    let oninput = Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        cb.emit((idx, input.value()));
                    });
                    html! {
                        <input type="text"
                            key={idx}
                            class="choice-input"
                            placeholder={format!("Choice {}", idx + 1)}
                            value={label.clone()}
                            disabled={props.disabled}
                            {oninput}
                        />
                    }
                }).collect::<Html>() }
            </div>
        </div>
    }
}

/// Renders the outcome card for a committed roll.
///
/// The label line only appears when the face has non-blank text.
pub fn render_outcome(result: u32, decision: Option<&str>) -> Html {
    html! {
        <div class="result-card">
            <h4>{ "Outcome:" }</h4>
            <p class="result-number">
                { "You rolled a " }<strong>{ result }</strong>
            </p>
            if let Some(decision) = decision {
                <p class="result-decision-text">
                    <strong>{ "Your Decided Choice: " }</strong>
                    <kbd>{ decision }</kbd>
                </p>
            }
        </div>
    }
}

/// Modal explaining why a random pick helps.
#[derive(Properties, PartialEq)]
pub struct InfoModalProps {
    pub open: bool,
    pub on_close: Callback<()>,
}

#[function_component(InfoModal)]
pub fn info_modal(props: &InfoModalProps) -> Html {
    if !props.open {
        return html! {};
    }
    let close = props.on_close.reform(|_: MouseEvent| ());
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="modal-backdrop" onclick={close.clone()}>
            <div class="info-modal" role="dialog" onclick={keep_open}>
                <h3>{ "How This Helps Your Decisions" }</h3>
                <p>
                    { "Letting a die pick for you sounds odd, but the point is not the pick itself. \
                       It is how you react to it." }
                </p>
                <ul>
                    <li>
                        <strong>{ "Relief or excitement? " }</strong>
                        { "The outcome probably matches what you already wanted." }
                    </li>
                    <li>
                        <strong>{ "Disappointment? " }</strong>
                        { "You may be leaning away from that option, or toward another one." }
                    </li>
                </ul>
                <p>
                    { "The die does not decide for you. It surfaces the preference you had all along, \
                       so you can choose with more confidence." }
                </p>
                <button class="btn-primary" onclick={close}>{ "Got it!" }</button>
            </div>
        </div>
    }
}

/// Short-lived warning banner.
#[derive(Properties, PartialEq)]
pub struct WarningToastProps {
    pub message: Option<String>,
}

#[function_component(WarningToast)]
pub fn warning_toast(props: &WarningToastProps) -> Html {
    match &props.message {
        Some(message) => html! {
            <div class="warning-toast" role="alert">{ message }</div>
        },
        None => html! {},
    }
}
