//! The detail panel beside the canvas.
//!
//! Renders whatever [`PanelView`] the session produced. Every link and button
//! writes its [`PanelAction`] to the shared `actions` signal; the canvas
//! component dispatches it.

use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::network::panel::{
	ClusterLink, EvidenceView, ItemView, NO_CONNECTIONS, Relation, RelatedItem, StepNavigation,
};
use crate::network::{PanelAction, PanelView};

fn trigger(actions: RwSignal<Option<PanelAction>>, action: PanelAction) -> impl Fn(MouseEvent) + 'static {
	move |ev: MouseEvent| {
		ev.prevent_default();
		actions.set(Some(action.clone()));
	}
}

/// An image that swaps itself for a note with the attempted path when it
/// fails to load.
#[component]
fn EvidenceImage(src: String, alt: String) -> impl IntoView {
	let failed = RwSignal::new(false);
	let note = format!("Unable to load image: Path: {src}");
	move || {
		if failed.get() {
			view! { <p class="image-error">{note.clone()}</p> }.into_any()
		} else {
			view! {
				<img
					class="evidence-image"
					src=src.clone()
					alt=alt.clone()
					on:error=move |_| failed.set(true)
				/>
			}
			.into_any()
		}
	}
}

fn idle_section(
	title: String,
	intro: String,
	clusters: Vec<ClusterLink>,
	actions: RwSignal<Option<PanelAction>>,
) -> impl IntoView {
	view! {
		<h2 class="panel-title">{title}</h2>
		<p class="panel-intro">{intro}</p>
		<h3>"Highlighted Clusters"</h3>
		<ul class="cluster-list">
			{clusters
				.into_iter()
				.map(|link| {
					view! {
						<li>
							<a href="#" class="cluster-link" on:click=trigger(actions, link.action)>
								{link.title}
							</a>
							<span class="cluster-summary">{link.summary}</span>
						</li>
					}
				})
				.collect_view()}
		</ul>
	}
}

fn related_entry(item: RelatedItem, actions: RwSignal<Option<PanelAction>>) -> impl IntoView {
	let link = view! {
		<a href="#" class="related-link" on:click=trigger(actions, item.action.clone())>
			{item.node_label.clone()}
		</a>
	};
	match item.relation {
		Relation::From | Relation::To => view! {
			<li>
				<span class="relation">{format!("{}: ", item.relation)}</span>
				{link}
			</li>
		}
		.into_any(),
		Relation::Outgoing | Relation::Incoming => view! {
			<li>
				{link}
				<span class="relation">{format!(" {}", item.annotation())}</span>
			</li>
		}
		.into_any(),
	}
}

fn evidence_entry(index: usize, evidence: EvidenceView) -> impl IntoView {
	view! {
		<div class="evidence-item">
			{(index > 0).then(|| view! { <hr class="evidence-separator" /> })}
			<EvidenceImage src=evidence.src alt=evidence.alt />
			{evidence
				.source
				.map(|source| {
					view! {
						<a class="evidence-source" href=source.href target="_blank" rel="noopener noreferrer">
							{source.label}
						</a>
					}
				})}
		</div>
	}
}

fn item_section(item: ItemView, actions: RwSignal<Option<PanelAction>>) -> impl IntoView {
	let ItemView {
		title,
		text,
		image,
		related,
		evidence,
		..
	} = item;
	let related = if related.is_empty() {
		view! { <p class="no-connections">{NO_CONNECTIONS}</p> }.into_any()
	} else {
		view! {
			<ul class="related-list">
				{related.into_iter().map(|r| related_entry(r, actions)).collect_view()}
			</ul>
		}
		.into_any()
	};
	view! {
		<h2 class="panel-title">{title}</h2>
		<p class="panel-text">{text}</p>
		{image.map(|src| view! { <EvidenceImage src=src alt="Node image".to_string() /> })}
		<h3>"Related"</h3>
		{related}
		{(!evidence.is_empty())
			.then(|| {
				view! {
					<h3>"Evidence"</h3>
					<div class="evidence-list">
						{evidence
							.into_iter()
							.enumerate()
							.map(|(i, e)| evidence_entry(i, e))
							.collect_view()}
					</div>
				}
			})}
	}
}

fn step_bar(navigation: StepNavigation, actions: RwSignal<Option<PanelAction>>) -> impl IntoView {
	let counter = navigation.counter();
	view! {
		<div class="step-nav">
			<button class="step-back" on:click=trigger(actions, navigation.back)>
				"← Back to overview"
			</button>
			<div class="step-controls">
				<button class="step-previous" on:click=trigger(actions, navigation.previous)>
					"‹ Previous"
				</button>
				<span class="step-counter">{counter}</span>
				<button class="step-next" on:click=trigger(actions, navigation.next)>
					"Next ›"
				</button>
			</div>
		</div>
	}
}

/// Renders the current panel view.
#[component]
pub fn DetailPanel(panel: RwSignal<PanelView>, actions: RwSignal<Option<PanelAction>>) -> impl IntoView {
	view! {
		<aside class="detail-panel">
			<button class="reset-view" on:click=trigger(actions, PanelAction::Reset)>
				"Reset View"
			</button>
			{move || match panel.get() {
				PanelView::Idle { title, intro, clusters } => {
					idle_section(title, intro, clusters, actions).into_any()
				}
				PanelView::Item(item) => item_section(item, actions).into_any(),
				PanelView::ClusterOverview { title, description, start } => {
					view! {
						<h2 class="panel-title">{title}</h2>
						<p class="cluster-description">{description}</p>
						<button class="start-exploring" on:click=trigger(actions, start)>
							"Start Exploring"
						</button>
					}
						.into_any()
				}
				PanelView::ClusterStep { navigation, item } => {
					view! {
						{step_bar(navigation, actions)}
						{item_section(item, actions)}
					}
						.into_any()
				}
			}}
		</aside>
	}
}
