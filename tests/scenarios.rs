//! End-to-end walks through the explorer without a browser.

// Test target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use incentive_graph::components::force_graph::ForceGraphState;
use incentive_graph::config::ExplorerConfig;
use incentive_graph::network::panel::{ItemView, Relation};
use incentive_graph::network::{
	Cluster, ElementRef, PanelAction, PanelMode, PanelView, Session, ViewCommand, ViewEvent,
	export_edges_csv, export_nodes_csv, load_store, ring_position,
};

const TWO_NODES: &str = "ID,Label,Details,ImageUrl,EvidenceData\n\
	a,Alpha,,,\n\
	b,Beta,,,\n";
const ONE_EDGE: &str = "ID,From,To,Label,Details,EvidenceData\n\
	e1,a,b,funds,,\n";

fn config_with(members: &[&str]) -> ExplorerConfig {
	ExplorerConfig {
		clusters: vec![Cluster {
			id: "x".into(),
			members: members.iter().map(|m| m.to_string()).collect(),
			radius: 250.0,
			title: "Chain X".into(),
			short_description: "Shows how money moves".into(),
			description: "A longer account of the chain.".into(),
		}],
		..ExplorerConfig::default()
	}
}

fn item(view: PanelView) -> ItemView {
	match view {
		PanelView::Item(item) => item,
		PanelView::ClusterStep { item, .. } => item,
		other => panic!("expected an item panel, got {other:?}"),
	}
}

#[test]
fn clicking_a_node_lists_its_neighbour_then_background_resets() {
	let store = load_store(TWO_NODES, ONE_EDGE).unwrap();
	let pristine = store.clone();
	let mut session = Session::new(store, &ExplorerConfig::default());

	let commands = session.handle_event(ViewEvent::NodeClicked("a".into()));
	assert_eq!(
		commands,
		vec![ViewCommand::SelectExactly(Some(ElementRef::Node("a".into())))]
	);
	let view = item(session.panel());
	assert_eq!(view.title, "Alpha");
	assert_eq!(view.related.len(), 1);
	assert_eq!(view.related[0].node_id, "b");
	assert_eq!(view.related[0].relation, Relation::Outgoing);
	assert_eq!(view.related[0].annotation(), "→ (funds)");

	let commands = session.handle_event(ViewEvent::BackgroundClicked);
	assert_eq!(session.explorer().mode(), &PanelMode::Idle);
	assert!(matches!(session.panel(), PanelView::Idle { .. }));
	assert_eq!(session.store(), &pristine);
	assert!(commands.contains(&ViewCommand::SelectExactly(None)));
	assert_eq!(commands.last(), Some(&ViewCommand::FitAll { animated: true }));
}

#[test]
fn cluster_path_skips_missing_connections() {
	let nodes = "ID,Label\na,A\nb,B\nc,C\n";
	let edges = "ID,From,To\nab,a,b\n";
	let store = load_store(nodes, edges).unwrap();
	let mut session = Session::new(store, &config_with(&["a", "b", "c"]));

	session.dispatch(PanelAction::OpenCluster("x".into()));
	let path = session.explorer().catalog().cached_path("x").unwrap().to_vec();
	assert_eq!(
		path,
		vec![
			ElementRef::Node("a".into()),
			ElementRef::Edge("ab".into()),
			ElementRef::Node("b".into()),
			ElementRef::Node("c".into()),
		]
	);
}

#[test]
fn activating_then_resetting_restores_the_loaded_store() {
	let nodes = "ID,Label\na,A\nb,B\nc,C\nd,D\n";
	let edges = "ID,From,To,Label\nab,a,b,x\nbc,b,c,y\ncd,c,d,z\n";
	let store = load_store(nodes, edges).unwrap();
	let pristine = store.clone();
	let mut session = Session::new(store, &config_with(&["a", "b", "c"]));

	session.dispatch(PanelAction::OpenCluster("x".into()));
	assert!(matches!(session.panel(), PanelView::ClusterOverview { .. }));
	assert!(session.store().node("a").unwrap().pinned);
	assert!(session.store().layout_anchor().is_some());

	session.dispatch(PanelAction::Reset);
	assert_eq!(session.store(), &pristine);
	assert!(session.store().is_default_view());
}

#[test]
fn tour_wraps_in_both_directions() {
	let nodes = "ID,Label\na,A\nb,B\nc,C\n";
	let edges = "ID,From,To\nab,a,b\nbc,b,c\nca,c,a\n";
	let store = load_store(nodes, edges).unwrap();
	let mut session = Session::new(store, &config_with(&["a", "b", "c"]));
	session.dispatch(PanelAction::OpenCluster("x".into()));

	let PanelView::ClusterOverview { start, .. } = session.panel() else {
		panic!("expected the cluster overview");
	};
	session.dispatch(start);
	let PanelView::ClusterStep { navigation, item } = session.panel() else {
		panic!("expected a cluster step");
	};
	assert_eq!(navigation.counter(), "Step 1 of 6");
	assert_eq!(item.title, "A");

	session.dispatch(PanelAction::PreviousStep);
	assert_eq!(
		session.explorer().mode(),
		&PanelMode::ClusterStep {
			cluster: "x".into(),
			index: 5
		}
	);
	// The closing edge back to the first member.
	assert_eq!(item_title(&session), "ca");

	session.dispatch(PanelAction::NextStep);
	assert_eq!(
		session.explorer().mode(),
		&PanelMode::ClusterStep {
			cluster: "x".into(),
			index: 0
		}
	);

	session.dispatch(PanelAction::BackToOverview);
	assert!(matches!(session.panel(), PanelView::ClusterOverview { .. }));
}

fn item_title(session: &Session) -> String {
	item(session.panel()).title
}

#[test]
fn evidence_without_a_path_is_skipped() {
	let nodes = "ID,Label,EvidenceData\n\
		a,A,\"[{\"\"sourceUrl\"\":\"\"https://one\"\"},{\"\"localPath\"\":\"\"img\\\\two.png\"\",\"\"sourceUrl\"\":\"\"https://two\"\",\"\"sourceLabel\"\":\"\"Report\"\"}]\"\n";
	let store = load_store(nodes, "ID,From,To\n").unwrap();
	let mut session = Session::new(store, &ExplorerConfig::default());
	session.handle_event(ViewEvent::NodeClicked("a".into()));

	let view = item(session.panel());
	assert_eq!(view.evidence.len(), 1);
	assert_eq!(view.evidence[0].src, "img/two.png");
	assert_eq!(view.evidence[0].alt, "Evidence 2");
	let source = view.evidence[0].source.as_ref().unwrap();
	assert_eq!(source.label, "Report");
	assert_eq!(source.href, "https://two");
}

#[test]
fn exported_tables_load_back_to_the_same_store() {
	let store = load_store(TWO_NODES, ONE_EDGE).unwrap();
	let nodes = export_nodes_csv(&store).unwrap();
	let edges = export_edges_csv(&store).unwrap();
	assert_eq!(load_store(&nodes, &edges).unwrap(), store);
}

#[test]
fn canvas_state_follows_cluster_activation_and_reset() {
	let nodes = "ID,Label\na,A\nb,B\nc,C\nd,D\n";
	let edges = "ID,From,To\nab,a,b\nbc,b,c\ncd,c,d\n";
	let store = load_store(nodes, edges).unwrap();
	let config = config_with(&["a", "b", "c"]);
	let mut canvas = ForceGraphState::new(&store, 800.0, 600.0, &config.physics);
	let mut session = Session::new(store, &config);

	for command in session.dispatch(PanelAction::OpenCluster("x".into())) {
		canvas.apply(command);
	}
	let top = ring_position(0, 3, 250.0);
	assert_eq!(canvas.node_position("a"), Some((top.x as f32 as f64, top.y as f32 as f64)));
	assert_eq!(canvas.is_anchored("b"), Some(true));
	assert_eq!(canvas.is_anchored("d"), Some(false));
	assert!(canvas.anchor.is_some());

	for command in session.handle_event(ViewEvent::BackgroundClicked) {
		canvas.apply(command);
	}
	for id in ["a", "b", "c", "d"] {
		assert_eq!(canvas.is_anchored(id), Some(false), "{id} released");
	}
	assert!(canvas.anchor.is_none());
	assert!(canvas.physics_enabled());
	assert_eq!(canvas.selection, None);
}
