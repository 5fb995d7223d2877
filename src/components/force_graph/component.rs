//! Leptos component wrapping the network canvas.
//!
//! Owns the canvas element and its mouse, wheel and keyboard handlers for
//! clicking, node dragging, panning and zooming. An animation loop runs via
//! `requestAnimationFrame`, stepping the simulation and the renderer each
//! frame. Canvas events go through the [`Session`]; the commands it returns
//! are applied to the canvas state before the panel is refreshed.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Canvas;
use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use super::render;
use super::scale::ScaleConfig;
use super::state::ForceGraphState;
use super::theme::Theme;
use crate::config::PhysicsConfig;
use crate::network::{PanelAction, PanelView, Session, ViewCommand, ViewEvent};

/// Fixed simulation step per animation frame, in seconds.
const FRAME_DT: f64 = 0.016;

/// Bundles graph simulation state with visual configuration.
struct GraphContext {
	state: ForceGraphState,
	scale: ScaleConfig,
	theme: Theme,
}

type SharedContext = Rc<RefCell<Option<GraphContext>>>;
type SharedClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn apply(context: &RefCell<Option<GraphContext>>, commands: Vec<ViewCommand>) {
	if let Some(c) = context.borrow_mut().as_mut() {
		for command in commands {
			c.state.apply(command);
		}
	}
}

fn refresh_panel(session: &RefCell<Session>, panel: RwSignal<PanelView>) {
	let view = session.borrow().panel();
	if panel.with_untracked(|current| *current != view) {
		panel.set(view);
	}
}

/// Runs a canvas event through the session and applies what comes back.
fn raise(
	session: &RefCell<Session>,
	context: &RefCell<Option<GraphContext>>,
	panel: RwSignal<PanelView>,
	event: ViewEvent,
) {
	let commands = session.borrow_mut().handle_event(event);
	apply(context, commands);
	refresh_panel(session, panel);
}

fn pointer_position(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 600.0))
}

/// Renders the session's graph on a canvas sized to its parent container.
///
/// Panel actions written to `actions` are dispatched to the session and the
/// resulting commands applied here; `panel` always holds the current panel.
#[component]
pub fn ForceGraphCanvas(
	session: Rc<RefCell<Session>>,
	panel: RwSignal<PanelView>,
	actions: RwSignal<Option<PanelAction>>,
	physics: PhysicsConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: SharedClosure = Rc::new(RefCell::new(None));
	let resize_cb: SharedClosure = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init, session_init) =
		(context.clone(), animate.clone(), resize_cb.clone(), session.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					error!("incentive-graph: unexpected canvas context type");
					return;
				}
			},
			_ => {
				error!("incentive-graph: canvas 2d context unavailable");
				return;
			}
		};

		*context_init.borrow_mut() = Some(GraphContext {
			state: ForceGraphState::new(session_init.borrow().store(), w, h, &physics),
			scale: ScaleConfig::default(),
			theme: Theme::default(),
		});

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = parent_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(c) = context_resize.borrow_mut().as_mut() {
				c.state.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner, session_anim) =
			(context_init.clone(), animate_init.clone(), session_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let event = match context_anim.borrow_mut().as_mut() {
				Some(c) => {
					let event = c.state.tick(FRAME_DT);
					render::render(&c.state, &ctx, &c.scale, &c.theme);
					event
				}
				None => None,
			};
			if let Some(event) = event {
				raise(&session_anim, &context_anim, panel, event);
			}
			let window: Option<Window> = web_sys::window();
			if let (Some(window), Some(cb)) = (window, animate_inner.borrow().as_ref()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let (session_act, context_act) = (session.clone(), context.clone());
	Effect::new(move |_| {
		let Some(action) = actions.get() else {
			return;
		};
		let commands = session_act.borrow_mut().dispatch(action);
		apply(&context_act, commands);
		refresh_panel(&session_act, panel);
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(c) = context_md.borrow_mut().as_mut() {
			c.state.pointer_down(x, y, &c.scale);
		}
	};

	let (context_mm, session_mm) = (context.clone(), session.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let event = match context_mm.borrow_mut().as_mut() {
			Some(c) => c.state.pointer_move(x, y, &c.scale),
			None => None,
		};
		if let Some(event) = event {
			raise(&session_mm, &context_mm, panel, event);
		}
	};

	let (context_mu, session_mu) = (context.clone(), session.clone());
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let event = match context_mu.borrow_mut().as_mut() {
			Some(c) => c.state.pointer_up(x, y, &c.scale, &c.theme),
			None => None,
		};
		if let Some(event) = event {
			raise(&session_mu, &context_mu, panel, event);
		}
	};

	let (context_ml, session_ml) = (context.clone(), session);
	let on_mouseleave = move |_: MouseEvent| {
		let event = match context_ml.borrow_mut().as_mut() {
			Some(c) => c.state.pointer_leave(),
			None => None,
		};
		if let Some(event) = event {
			raise(&session_ml, &context_ml, panel, event);
		}
	};

	let context_kd = context.clone();
	let on_keydown = move |ev: KeyboardEvent| {
		let handled = match context_kd.borrow_mut().as_mut() {
			Some(c) => c.state.key_navigate(&ev.key()),
			None => false,
		};
		if handled {
			ev.prevent_default();
		}
	};

	let context_wh = context;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(c) = context_wh.borrow_mut().as_mut() {
			c.state.zoom_at(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="network-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:keydown=on_keydown
			tabindex="0"
			style="display: block; cursor: grab;"
		/>
	}
}
