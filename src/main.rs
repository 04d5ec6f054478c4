//! Main module for the raffle wheel application using Yew.
//! Wires UI components, state hooks, and side-effect logic.

use gloo_timers::callback::Timeout;
use log::warn;
use raffle_wheel::wheel::{DrawOutcome, SpinPlan, Wheel};
use raffle_wheel::{parse_entries, EntryKind};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

mod components;
mod config;
mod utils;

use components::{
    render_result_banner, render_spin_hint, ErrorToast, SpinButton, WheelView, WinnerModal,
};
use config::{DEFAULT_EVENT_TITLE, ERROR_TOAST_MS, WINNER_REVEAL_DELAY_MS};
use utils::read_file_bytes;

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Bump the shared version counter to re-render after mutating a wheel
/// behind its `Rc<RefCell<_>>`.
fn bump_version(version: &UseStateHandle<usize>) {
    version.set(version.wrapping_add(1));
}

/// Show a transient error toast that dismisses itself after a few seconds.
/// Replacing the stored handle cancels any earlier pending dismissal.
fn show_error(
    error_message: &UseStateHandle<Option<String>>,
    toast_timer: &UseStateHandle<Option<Timeout>>,
    message: String,
) {
    warn!("{}", message);
    error_message.set(Some(message));
    let error_message = error_message.clone();
    let handle = Timeout::new(ERROR_TOAST_MS, move || error_message.set(None));
    toast_timer.set(Some(handle));
}

/// Build the upload handler for one wheel. A failed parse never touches the
/// wheel's previously loaded list.
fn make_upload_callback(
    kind: EntryKind,
    wheel: Rc<RefCell<Wheel>>,
    wheel_version: UseStateHandle<usize>,
    error_message: UseStateHandle<Option<String>>,
    toast_timer: UseStateHandle<Option<Timeout>>,
) -> Callback<File> {
    Callback::from(move |file: File| {
        let wheel = wheel.clone();
        let wheel_version = wheel_version.clone();
        let error_message = error_message.clone();
        let toast_timer = toast_timer.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match read_file_bytes(&file).await {
                Ok(bytes) => match parse_entries(&bytes, kind) {
                    Ok(entries) => {
                        wheel.borrow_mut().set_entries(entries);
                        error_message.set(None);
                        bump_version(&wheel_version);
                    }
                    Err(err) => show_error(&error_message, &toast_timer, err.to_string()),
                },
                Err(message) => show_error(&error_message, &toast_timer, message),
            }
        });
    })
}

fn make_clear_callback(
    wheel: Rc<RefCell<Wheel>>,
    wheel_version: UseStateHandle<usize>,
) -> Callback<()> {
    Callback::from(move |_| {
        wheel.borrow_mut().clear_entries();
        bump_version(&wheel_version);
    })
}

/// Register the one-shot continuation that lands a wheel when its animation
/// finishes, merges the outcome, and publishes the pair once both wheels
/// have resolved.
#[allow(clippy::too_many_arguments)]
fn schedule_completion(
    kind: EntryKind,
    plan: SpinPlan,
    wheel: Rc<RefCell<Wheel>>,
    draw_acc: Rc<RefCell<DrawOutcome>>,
    draw: UseStateHandle<DrawOutcome>,
    is_spinning: UseStateHandle<bool>,
    show_winner: UseStateHandle<bool>,
    reveal_timer: UseStateHandle<Option<Timeout>>,
) -> Timeout {
    Timeout::new(plan.duration_ms, move || {
        let outcome = wheel.borrow_mut().complete_spin(&plan);
        let outcome = match outcome {
            Some(outcome) => outcome,
            None => return,
        };

        // Merge against the shared accumulator, not a render snapshot, so
        // the completion orders of the two wheels are interchangeable.
        let merged = draw_acc.borrow().merged(kind, outcome.entry);
        *draw_acc.borrow_mut() = merged.clone();

        if merged.is_complete() {
            is_spinning.set(false);
            let show_winner = show_winner.clone();
            let handle = Timeout::new(WINNER_REVEAL_DELAY_MS, move || show_winner.set(true));
            reveal_timer.set(Some(handle));
        }
        draw.set(merged);
    })
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    let participant_wheel = use_mut_ref(Wheel::new);
    let prize_wheel = use_mut_ref(Wheel::new);
    // Version counter triggers a re-render whenever a wheel's entry list
    // changes behind its RefCell.
    let wheel_version = use_state(|| 0usize);

    // Per-wheel animation target: (cumulative rotation, transition ms).
    let participant_anim = use_state(|| (0.0f64, 0u32));
    let prize_anim = use_state(|| (0.0f64, 0u32));

    // Shared accumulator the two completion callbacks merge into, plus the
    // rendered copy of it.
    let draw_acc = use_mut_ref(DrawOutcome::default);
    let draw = use_state(DrawOutcome::default);

    let is_spinning = use_state(|| false);
    let show_winner = use_state(|| false);
    let error_message = use_state(|| None::<String>);
    let event_title = use_state(|| DEFAULT_EVENT_TITLE.to_string());

    // Live timer handles; dropping one cancels the pending callback.
    let participant_timer = use_state(|| None::<Timeout>);
    let prize_timer = use_state(|| None::<Timeout>);
    let toast_timer = use_state(|| None::<Timeout>);
    let reveal_timer = use_state(|| None::<Timeout>);

    let on_upload_participants = make_upload_callback(
        EntryKind::Participants,
        participant_wheel.clone(),
        wheel_version.clone(),
        error_message.clone(),
        toast_timer.clone(),
    );
    let on_upload_prizes = make_upload_callback(
        EntryKind::Prizes,
        prize_wheel.clone(),
        wheel_version.clone(),
        error_message.clone(),
        toast_timer.clone(),
    );
    let on_clear_participants =
        make_clear_callback(participant_wheel.clone(), wheel_version.clone());
    let on_clear_prizes = make_clear_callback(prize_wheel.clone(), wheel_version.clone());

    let on_spin = {
        let participant_wheel = participant_wheel.clone();
        let prize_wheel = prize_wheel.clone();
        let participant_anim = participant_anim.clone();
        let prize_anim = prize_anim.clone();
        let participant_timer = participant_timer.clone();
        let prize_timer = prize_timer.clone();
        let draw_acc = draw_acc.clone();
        let draw = draw.clone();
        let is_spinning = is_spinning.clone();
        let show_winner = show_winner.clone();
        let reveal_timer = reveal_timer.clone();
        Callback::from(move |_: MouseEvent| {
            if *is_spinning
                || !participant_wheel.borrow().has_entries()
                || !prize_wheel.borrow().has_entries()
            {
                return;
            }

            is_spinning.set(true);
            show_winner.set(false);
            *draw_acc.borrow_mut() = DrawOutcome::default();
            draw.set(DrawOutcome::default());

            // Target angles are drawn here, at the caller boundary, so the
            // resolution math inside the wheel stays deterministic.
            let mut rng = rand::rng();

            use rand::Rng;
            let participant_target = rng.random_range(0.0..360.0);
            let prize_target = rng.random_range(0.0..360.0);

            if let Some(plan) = participant_wheel.borrow_mut().begin_spin(participant_target) {
                participant_anim.set((plan.final_rotation, plan.duration_ms));
                let handle = schedule_completion(
                    EntryKind::Participants,
                    plan,
                    participant_wheel.clone(),
                    draw_acc.clone(),
                    draw.clone(),
                    is_spinning.clone(),
                    show_winner.clone(),
                    reveal_timer.clone(),
                );
                participant_timer.set(Some(handle));
            }
            if let Some(plan) = prize_wheel.borrow_mut().begin_spin(prize_target) {
                prize_anim.set((plan.final_rotation, plan.duration_ms));
                let handle = schedule_completion(
                    EntryKind::Prizes,
                    plan,
                    prize_wheel.clone(),
                    draw_acc.clone(),
                    draw.clone(),
                    is_spinning.clone(),
                    show_winner.clone(),
                    reveal_timer.clone(),
                );
                prize_timer.set(Some(handle));
            }
        })
    };

    let on_close_modal = {
        let show_winner = show_winner.clone();
        Callback::from(move |_| show_winner.set(false))
    };

    let on_title_input = {
        let event_title = event_title.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            event_title.set(input.value());
        })
    };

    // Reading the counter ties this render to wheel mutations.
    let _ = *wheel_version;
    let participants = participant_wheel.borrow().entries().to_vec();
    let prizes = prize_wheel.borrow().entries().to_vec();
    let participant_count = participants.len();
    let prize_count = prizes.len();
    let can_spin = participant_count > 0 && prize_count > 0 && !*is_spinning;
    let (participant_rotation, participant_duration) = *participant_anim;
    let (prize_rotation, prize_duration) = *prize_anim;

    html! {
        <div class="app">
            <header class="header">
                <input
                    class="title-input"
                    value={(*event_title).clone()}
                    oninput={on_title_input}
                />
            </header>

            <ErrorToast message={(*error_message).clone()} />

            <main class="stage">
                <p class="counts">
                    { format!("{} participants | {} prizes", participant_count, prize_count) }
                </p>

                <div class="wheels-row">
                    <section class="wheel-column">
                        <h3>{ "Participants" }</h3>
                        <WheelView
                            kind={EntryKind::Participants}
                            entries={participants}
                            rotation={participant_rotation}
                            duration_ms={participant_duration}
                            spinning={*is_spinning}
                            on_upload={on_upload_participants}
                            on_clear={on_clear_participants}
                        />
                    </section>

                    <div class="spin-column">
                        <SpinButton
                            disabled={!can_spin}
                            spinning={*is_spinning}
                            onclick={on_spin}
                        />
                        if !can_spin && !*is_spinning {
                            { render_spin_hint(participant_count, prize_count) }
                        }
                    </div>

                    <section class="wheel-column">
                        <h3>{ "Prizes" }</h3>
                        <WheelView
                            kind={EntryKind::Prizes}
                            entries={prizes}
                            rotation={prize_rotation}
                            duration_ms={prize_duration}
                            spinning={*is_spinning}
                            on_upload={on_upload_prizes}
                            on_clear={on_clear_prizes}
                        />
                    </section>
                </div>

                if !*show_winner {
                    { render_result_banner(&draw) }
                }
            </main>

            <footer class="footer">
                <p>{ format!("{} Raffle", *event_title) }</p>
            </footer>

            <WinnerModal
                open={*show_winner}
                draw={(*draw).clone()}
                on_close={on_close_modal}
            />
        </div>
    }
}

/// Entry point: installs the panic hook and mounts the Yew renderer.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
