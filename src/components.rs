//! Pure Yew view components for the raffle UI.
//!
//! Stateless components that render from props; all application state lives
//! in the root component and the core `Wheel` machines.

use raffle_wheel::wheel::{segment_angle, DrawOutcome};
use raffle_wheel::{Entry, EntryKind};
use web_sys::{DragEvent, Event, File, HtmlElement, HtmlInputElement};
use yew::prelude::*;

use crate::config::{HUB_RADIUS, POINTER_COLOR, SPIN_EASING, WHEEL_SIZE};
use crate::utils::{label_font_size, polar_point, segment_color, segment_path, truncate_label};

/// One wheel: either the upload drop zone (no data yet) or the spinnable
/// SVG wheel with its pointer, clear button, and count badge.
#[derive(Properties, PartialEq)]
pub struct WheelViewProps {
    pub kind: EntryKind,
    pub entries: Vec<Entry>,
    /// Cumulative rotation the rotor should rest at or animate toward.
    pub rotation: f64,
    /// Transition duration for the current animation target.
    pub duration_ms: u32,
    pub spinning: bool,
    pub on_upload: Callback<File>,
    pub on_clear: Callback<()>,
}

#[function_component(WheelView)]
pub fn wheel_view(props: &WheelViewProps) -> Html {
    let input_ref = use_node_ref();
    let drag_over = use_state(|| false);

    let on_file_change = {
        let on_upload = props.on_upload.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|list| list.get(0)) {
                on_upload.emit(file);
            }
            // Reset so selecting the same file again re-fires the event.
            input.set_value("");
        })
    };

    let on_drag_over = {
        let drag_over = drag_over.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            drag_over.set(true);
        })
    };

    let on_drag_leave = {
        let drag_over = drag_over.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            drag_over.set(false);
        })
    };

    let on_drop = {
        let drag_over = drag_over.clone();
        let on_upload = props.on_upload.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            drag_over.set(false);
            let file = e
                .data_transfer()
                .and_then(|transfer| transfer.files())
                .and_then(|list| list.get(0));
            if let Some(file) = file {
                if file.name().ends_with(".csv") {
                    on_upload.emit(file);
                }
            }
        })
    };

    let open_picker = {
        let input_ref = input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = input_ref.cast::<HtmlElement>() {
                input.click();
            }
        })
    };

    let file_input = html! {
        <input
            ref={input_ref.clone()}
            type="file"
            accept=".csv"
            class="hidden-input"
            onchange={on_file_change}
        />
    };

    if props.entries.is_empty() {
        let zone_class = if *drag_over {
            "upload-zone drag-over"
        } else {
            "upload-zone"
        };
        return html! {
            <div class="wheel-slot">
                { file_input }
                <div
                    class={zone_class}
                    onclick={open_picker}
                    ondragover={on_drag_over}
                    ondragleave={on_drag_leave}
                    ondrop={on_drop}
                >
                    <p class="upload-label">{ format!("Upload {}", props.kind.label()) }</p>
                    <p class="upload-hint">{ "Click or drag a CSV file here" }</p>
                </div>
            </div>
        };
    }

    let on_clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| on_clear.emit(()))
    };

    let rotor_style = format!(
        "transform: rotate({}deg); transition: transform {}ms {};",
        props.rotation, props.duration_ms, SPIN_EASING
    );

    html! {
        <div class="wheel-slot">
            { file_input }
            if !props.spinning {
                <button class="clear-button" title="Remove data" onclick={on_clear}>
                    { "✕" }
                </button>
            }
            <div class="pointer">
                <svg width="30" height="40" viewBox="0 0 30 40">
                    <path
                        d="M15 40 L0 10 L15 0 L30 10 Z"
                        fill={POINTER_COLOR}
                        stroke="#ffffff"
                        stroke-width="2"
                    />
                </svg>
            </div>
            <div class="wheel-rotor" style={rotor_style}>
                { render_wheel_face(&props.entries) }
            </div>
            <div class="count-badge">
                { format!("{} {}", props.entries.len(), props.kind.label().to_lowercase()) }
            </div>
        </div>
    }
}

fn render_wheel_face(entries: &[Entry]) -> Html {
    let size = WHEEL_SIZE as f64;
    let center = size / 2.0;
    let radius = center - 10.0;
    let seg = segment_angle(entries.len());
    let font_size = label_font_size(entries.len());

    html! {
        <svg
            class="wheel-face"
            width={WHEEL_SIZE.to_string()}
            height={WHEEL_SIZE.to_string()}
            viewBox={format!("0 0 {} {}", WHEEL_SIZE, WHEEL_SIZE)}
        >
            {
                if entries.len() == 1 {
                    // A 360° arc collapses in SVG path syntax; the single
                    // segment is a full disc.
                    html! {
                        <circle
                            cx={center.to_string()}
                            cy={center.to_string()}
                            r={radius.to_string()}
                            fill={segment_color(0)}
                        />
                    }
                } else {
                    entries.iter().enumerate().map(|(index, _)| {
                        let start = index as f64 * seg - 90.0;
                        html! {
                            <path
                                d={segment_path(center, center, radius, start, start + seg)}
                                fill={segment_color(index)}
                                stroke="rgba(255, 255, 255, 0.1)"
                                stroke-width="1"
                            />
                        }
                    }).collect::<Html>()
                }
            }
            {
                entries.iter().enumerate().map(|(index, entry)| {
                    let mid = index as f64 * seg - 90.0 + seg / 2.0;
                    let (x, y) = polar_point(center, center, radius - 15.0, mid);
                    html! {
                        <text
                            x={format!("{x:.2}")}
                            y={format!("{y:.2}")}
                            transform={format!("rotate({mid:.2} {x:.2} {y:.2})")}
                            text-anchor="end"
                            dominant-baseline="middle"
                            fill="#ffffff"
                            font-weight="bold"
                            font-size={format!("{font_size}")}
                        >
                            { truncate_label(&entry.name) }
                        </text>
                    }
                }).collect::<Html>()
            }
            <circle
                cx={center.to_string()}
                cy={center.to_string()}
                r={HUB_RADIUS.to_string()}
                class="wheel-hub"
            />
            <circle
                cx={center.to_string()}
                cy={center.to_string()}
                r={(radius + 5.0).to_string()}
                class="wheel-rim"
                fill="none"
            />
        </svg>
    }
}

#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub disabled: bool,
    pub spinning: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    html! {
        <button class="spin-button" disabled={props.disabled} onclick={props.onclick.clone()}>
            { if props.spinning { "Spinning..." } else { "SPIN" } }
        </button>
    }
}

/// Tells the user which upload is still missing before a spin is possible.
pub fn render_spin_hint(participants: usize, prizes: usize) -> Html {
    let hint = match (participants, prizes) {
        (0, 0) => "Upload both CSV files to start",
        (0, _) => "Upload the participants CSV",
        (_, 0) => "Upload the prizes CSV",
        _ => return html! {},
    };
    html! { <p class="spin-hint">{ hint }</p> }
}

/// Inline pairing shown once both wheels have resolved.
pub fn render_result_banner(draw: &DrawOutcome) -> Html {
    match draw.pair() {
        Some((participant, prize)) => html! {
            <div class="result-banner">
                <p class="result-caption">{ "Result" }</p>
                <p class="result-line">
                    <span class="highlight">{ &participant.name }</span>
                    { " wins " }
                    <span class="highlight">{ &prize.name }</span>
                </p>
            </div>
        },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct WinnerModalProps {
    pub open: bool,
    pub draw: DrawOutcome,
    pub on_close: Callback<()>,
}

#[function_component(WinnerModal)]
pub fn winner_modal(props: &WinnerModalProps) -> Html {
    let (participant, prize) = match (props.open, props.draw.pair()) {
        (true, Some(pair)) => pair,
        _ => return html! {},
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-backdrop" onclick={on_close.clone()}>
            <div class="modal" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <h2>{ "We have a winner!" }</h2>
                if let Some(url) = &participant.image_url {
                    <img class="winner-image" src={url.clone()} alt={participant.name.clone()} />
                }
                <p class="winner-name">{ &participant.name }</p>
                <p class="winner-prize">{ format!("wins {}", prize.name) }</p>
                <button class="modal-close" onclick={on_close}>{ "Close" }</button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorToastProps {
    pub message: Option<String>,
}

#[function_component(ErrorToast)]
pub fn error_toast(props: &ErrorToastProps) -> Html {
    match &props.message {
        Some(message) => html! { <div class="error-toast">{ message }</div> },
        None => html! {},
    }
}
