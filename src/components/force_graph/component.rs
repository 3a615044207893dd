use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use super::render::{Palette, Scene};
use super::state::ForceGraphState;
use super::types::{EdgeTypes, Graph};
use crate::config::{ChartConfig, SimulationConfig};

/// Cancellable `requestAnimationFrame` subscription.
///
/// Clones share the same switch, so a clone handed to `on_cleanup` can stop
/// the loop started through another.
#[derive(Clone, Debug, Default)]
pub struct TickLoop {
	running: Arc<AtomicBool>,
}

impl TickLoop {
	/// Calls `on_frame` once per animation frame until [`TickLoop::stop`].
	pub fn start(&self, mut on_frame: impl FnMut() + 'static) {
		self.running.store(true, Ordering::Relaxed);
		let running = self.running.clone();
		let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
		let frame_inner = frame.clone();

		*frame.borrow_mut() = Some(Closure::new(move || {
			if !running.load(Ordering::Relaxed) {
				// release the self-reference; the closure is freed once it returns
				let _ = frame_inner.borrow_mut().take();
				log::debug!("tick loop stopped");
				return;
			}
			on_frame();
			if let Some(ref cb) = *frame_inner.borrow() {
				request_frame(cb);
			}
		}));
		if let Some(ref cb) = *frame.borrow() {
			request_frame(cb);
		}
	}

	/// Ends the loop before its next frame.
	pub fn stop(&self) {
		self.running.store(false, Ordering::Relaxed);
	}

	/// Whether frames are still being scheduled.
	pub fn is_running(&self) -> bool {
		self.running.load(Ordering::Relaxed)
	}
}

fn request_frame(cb: &Closure<dyn FnMut()>) {
	if let Some(window) = web_sys::window() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Interactive SVG force layout of `graph`, with one arrow marker per edge type.
#[component]
pub fn ForceGraphSvg(
	/// Graph to lay out; its node positions are seeded if unset.
	graph: Graph,
	/// Edge types of `graph`, in color order.
	types: EdgeTypes,
	/// Drawing settings.
	#[prop(default = ChartConfig::default())]
	config: ChartConfig,
	/// Layout settings.
	#[prop(default = SimulationConfig::default())]
	simulation: SimulationConfig,
) -> impl IntoView {
	let initial = Scene::build(&graph, &types, &Palette, &config);
	let state = Rc::new(RefCell::new(ForceGraphState::new(
		graph,
		simulation,
		config.viewport,
	)));
	let scene = RwSignal::new(initial.clone());

	let tick_loop = TickLoop::default();
	let (state_tick, tick_loop_init) = (state.clone(), tick_loop.clone());
	Effect::new(move |_| {
		if tick_loop_init.is_running() {
			return;
		}
		let state_tick = state_tick.clone();
		tick_loop_init.start(move || {
			let mut s = state_tick.borrow_mut();
			if s.step() {
				scene.update(|sc| sc.sync(s.simulation.graph()));
			}
		});
	});
	on_cleanup(move || tick_loop.stop());

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let mut s = state_mm.borrow_mut();
		if !s.is_dragging() {
			return;
		}
		let Some(svg) = ev
			.current_target()
			.and_then(|t| t.dyn_into::<Element>().ok())
		else {
			return;
		};
		let rect = svg.get_bounding_client_rect();
		let (x, y) = s.viewport.client_to_graph(
			(rect.left(), rect.top(), rect.width(), rect.height()),
			(ev.client_x() as f64, ev.client_y() as f64),
		);
		s.drag_to(x, y);
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| state_mu.borrow_mut().end_drag();
	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| state_ml.borrow_mut().end_drag();

	let markers = initial
		.markers
		.iter()
		.map(|marker| {
			view! {
				<marker
					id=marker.id.clone()
					viewBox="0 -5 10 10"
					refX=config.marker_ref_x.to_string()
					refY="-0.5"
					markerWidth=config.marker_size.to_string()
					markerHeight=config.marker_size.to_string()
					orient="auto"
				>
					<path fill=marker.color d="M0,-5L10,0L0,5" />
				</marker>
			}
		})
		.collect_view();

	let links = initial
		.links
		.iter()
		.enumerate()
		.map(|(i, link)| {
			view! {
				<path
					stroke=link.stroke
					marker-end=link.marker_end.clone()
					d=move || scene.with(|s| s.links.get(i).map(|l| l.d.clone()).unwrap_or_default())
				/>
			}
		})
		.collect_view();

	let (radius, label_x) = (config.node_radius.to_string(), config.label_offset.to_string());
	let nodes = initial
		.nodes
		.iter()
		.enumerate()
		.map(|(i, glyph)| {
			let (idx, label) = (glyph.node, glyph.label.clone());
			let state_md = state.clone();
			let on_mousedown = move |ev: MouseEvent| {
				ev.prevent_default();
				ev.stop_propagation();
				state_md.borrow_mut().begin_drag(idx);
			};
			view! {
				<g
					transform=move || scene.with(|s| s.nodes.get(i).map(|n| n.transform.clone()).unwrap_or_default())
					on:mousedown=on_mousedown
					style="cursor: grab;"
				>
					<circle stroke="white" stroke-width="1.5" r=radius.clone() />
					<text
						x=label_x.clone()
						y="0.31em"
						fill="none"
						stroke="white"
						stroke-width="3"
					>
						{label.clone()}
					</text>
					<text x=label_x.clone() y="0.31em">
						{label}
					</text>
				</g>
			}
		})
		.collect_view();

	view! {
		<svg
			class="force-graph-svg"
			viewBox=initial.view_box.clone()
			style=format!("font: {}; display: block; max-width: 100%; height: auto;", config.font)
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
		>
			<defs>{markers}</defs>
			<g fill="none" stroke-width=config.link_width.to_string()>
				{links}
			</g>
			<g fill="currentColor" stroke-linecap="round" stroke-linejoin="round">
				{nodes}
			</g>
		</svg>
	}
}
