use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;
use log::{error, info};

use crate::components::force_graph::{BuildOutput, ForceGraphSvg, load_graph};
use crate::config::ChartConfig;
use crate::error::LoadError;

const LOAD_FAILED_HEADING: &str = "Could not draw the graph";
const LOAD_FAILED_DETAIL: &str = "The edge list failed to load:";

fn chart_view(out: BuildOutput, config: ChartConfig) -> impl IntoView {
	let empty = out.graph.is_empty();
	view! {
		<Show when=move || empty>
			<p class="graph-status">"The edge list has no usable edges."</p>
		</Show>
		<ForceGraphSvg graph=out.graph types=out.types config=config />
	}
}

/// Default Home Page: fetches the edge list once, then draws it.
///
/// The resource comes from `?data=<url>` when present.
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let config = match query.with_untracked(|q| q.get("data")) {
		Some(url) => ChartConfig::default().with_data_url(url),
		None => ChartConfig::default(),
	};

	let loaded: RwSignal<Option<Result<BuildOutput, LoadError>>> = RwSignal::new(None);
	let url = config.data_url.clone();
	spawn_local(async move {
		let result = load_graph(&url).await;
		match &result {
			Ok(out) => info!(
				"graph ready: {} nodes, {} edges",
				out.graph.nodes.len(),
				out.graph.edges.len()
			),
			Err(err) => error!("could not load graph: {}", err),
		}
		loaded.set(Some(result));
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>{LOAD_FAILED_HEADING}</h1>

				<p>{LOAD_FAILED_DETAIL}</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="graph-page">
				<Show when=move || loaded.with(Option::is_none)>
					<p class="graph-status">"Loading edge list..."</p>
				</Show>
				{move || {
					loaded.get().map(|result| result.map(|out| chart_view(out, config.clone())))
				}}
			</div>
		</ErrorBoundary>
	}
}
