use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use nugraph_core::identity::PackageIdentity;
use nugraph_core::metadata::PackageMetadata;
use nugraph_registry::source::{FetchError, FetchFailureKind, FetchedPackage, MetadataSource};
use nugraph_resolver::graph::NodeStatus;
use nugraph_resolver::resolver::{resolve, Resolution};

/// In-memory registry that records how often each package is fetched.
#[derive(Default)]
struct FixtureSource {
    packages: HashMap<String, Result<Vec<&'static str>, FetchError>>,
    authors: HashMap<String, Vec<&'static str>>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl FixtureSource {
    fn with(mut self, name: &str, deps: Vec<&'static str>) -> Self {
        self.packages.insert(name.to_string(), Ok(deps));
        self
    }

    fn failing(mut self, name: &str, err: FetchError) -> Self {
        self.packages.insert(name.to_string(), Err(err));
        self
    }

    fn authored(mut self, name: &str, authors: Vec<&'static str>) -> Self {
        self.authors.insert(name.to_string(), authors);
        self
    }

    fn fetch_count(&self, name: &str) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .get(name)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl MetadataSource for FixtureSource {
    fn describe(&self) -> String {
        "fixture".to_string()
    }

    async fn fetch(&self, id: &PackageIdentity) -> Result<FetchedPackage, FetchError> {
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(id.name().to_string())
            .or_default() += 1;
        match self.packages.get(id.name()) {
            Some(Ok(deps)) => Ok(FetchedPackage {
                metadata: PackageMetadata::new(
                    id.clone(),
                    id.version(),
                    self.authors
                        .get(id.name())
                        .into_iter()
                        .flatten()
                        .map(|a| a.to_string()),
                ),
                dependencies: deps.iter().map(|d| pkg(d)).collect(),
            }),
            Some(Err(e)) => Err(e.clone()),
            None => Err(FetchError::NotFound),
        }
    }
}

fn pkg(name: &str) -> PackageIdentity {
    PackageIdentity::new(name, "1.0.0")
}

/// The graph as `name -> [dependency names]`, for compact assertions.
fn adjacency(res: &Resolution) -> Vec<(String, Vec<String>)> {
    res.graph
        .nodes()
        .map(|(idx, node)| {
            let deps = res
                .graph
                .dependencies_of(idx)
                .into_iter()
                .map(|d| res.graph.node(d).identity.name().to_string())
                .collect();
            (node.identity.name().to_string(), deps)
        })
        .collect()
}

fn adj(entries: Vec<(&str, Vec<&str>)>) -> Vec<(String, Vec<String>)> {
    entries
        .into_iter()
        .map(|(n, deps)| {
            (
                n.to_string(),
                deps.iter().map(|d| d.to_string()).collect(),
            )
        })
        .collect()
}

fn status(res: &Resolution, name: &str) -> NodeStatus {
    let idx = res.graph.find(&pkg(name)).expect("node present");
    res.graph.node(idx).status
}

#[tokio::test]
async fn diamond_dependency_is_fetched_once() {
    let source = FixtureSource::default()
        .with("A", vec!["B", "C"])
        .with("B", vec!["D"])
        .with("C", vec!["D"])
        .with("D", vec![]);

    let res = resolve(&source, &pkg("A"), 3).await.unwrap();

    assert_eq!(
        adjacency(&res),
        adj(vec![("A", vec!["B", "C"]), ("B", vec!["D"]), ("C", vec!["D"]), ("D", vec![])])
    );
    assert_eq!(source.fetch_count("D"), 1);
    assert_eq!(res.metadata.len(), 4);
    assert_eq!(res.stats.fetched, 4);
}

#[tokio::test]
async fn cycle_terminates() {
    let source = FixtureSource::default()
        .with("A", vec!["B"])
        .with("B", vec!["A"]);

    let res = resolve(&source, &pkg("A"), 10).await.unwrap();

    assert_eq!(adjacency(&res), adj(vec![("A", vec!["B"]), ("B", vec!["A"])]));
    assert_eq!(source.fetch_count("A"), 1);
    assert_eq!(source.fetch_count("B"), 1);
}

#[tokio::test]
async fn self_dependency_yields_self_edge() {
    let source = FixtureSource::default().with("A", vec!["A"]);

    let res = resolve(&source, &pkg("A"), 3).await.unwrap();

    assert_eq!(adjacency(&res), adj(vec![("A", vec!["A"])]));
    assert_eq!(source.fetch_count("A"), 1);
}

#[tokio::test]
async fn not_found_dependency_is_kept_as_unresolved_leaf() {
    let source = FixtureSource::default().with("A", vec!["X"]);

    let res = resolve(&source, &pkg("A"), 3).await.unwrap();

    assert_eq!(adjacency(&res), adj(vec![("A", vec!["X"]), ("X", vec![])]));
    assert!(!res.metadata.contains(&pkg("X")));
    assert_eq!(
        status(&res, "X"),
        NodeStatus::Unresolved(FetchFailureKind::NotFound)
    );
    assert_eq!(res.stats.failed, 1);
}

#[tokio::test]
async fn failures_do_not_stop_siblings() {
    let source = FixtureSource::default()
        .with("A", vec!["Net", "Bad", "C"])
        .failing(
            "Net",
            FetchError::Network {
                message: "connection reset".to_string(),
            },
        )
        .failing(
            "Bad",
            FetchError::Parse {
                message: "no id".to_string(),
            },
        )
        .with("C", vec!["D"])
        .with("D", vec![]);

    let res = resolve(&source, &pkg("A"), 3).await.unwrap();

    assert_eq!(
        adjacency(&res),
        adj(vec![
            ("A", vec!["Net", "Bad", "C"]),
            ("Net", vec![]),
            ("Bad", vec![]),
            ("C", vec!["D"]),
            ("D", vec![]),
        ])
    );
    assert_eq!(
        status(&res, "Net"),
        NodeStatus::Unresolved(FetchFailureKind::Network)
    );
    assert_eq!(
        status(&res, "Bad"),
        NodeStatus::Unresolved(FetchFailureKind::Parse)
    );
    assert_eq!(status(&res, "D"), NodeStatus::Resolved);
}

#[tokio::test]
async fn depth_zero_leaves_direct_dependencies_as_frontier() {
    let source = FixtureSource::default()
        .with("A", vec!["B"])
        .with("B", vec!["C"]);

    let res = resolve(&source, &pkg("A"), 0).await.unwrap();

    assert_eq!(adjacency(&res), adj(vec![("A", vec!["B"]), ("B", vec![])]));
    assert_eq!(status(&res, "B"), NodeStatus::Frontier);
    assert_eq!(source.fetch_count("B"), 0);
    assert!(!res.graph.contains(&pkg("C")));
    assert_eq!(res.stats.frontier, 1);
}

#[tokio::test]
async fn node_set_is_everything_within_depth() {
    let source = FixtureSource::default()
        .with("A", vec!["B"])
        .with("B", vec!["C"])
        .with("C", vec!["D"])
        .with("D", vec!["E"]);

    let res = resolve(&source, &pkg("A"), 2).await.unwrap();

    assert_eq!(
        adjacency(&res),
        adj(vec![("A", vec!["B"]), ("B", vec!["C"]), ("C", vec!["D"]), ("D", vec![])])
    );
    assert_eq!(status(&res, "C"), NodeStatus::Resolved);
    assert_eq!(status(&res, "D"), NodeStatus::Frontier);
    assert_eq!(source.fetch_count("D"), 0);
}

#[tokio::test]
async fn root_without_dependencies_is_still_a_node() {
    let source = FixtureSource::default().with("A", vec![]);
    let res = resolve(&source, &pkg("A"), 2).await.unwrap();
    assert_eq!(adjacency(&res), adj(vec![("A", vec![])]));
    assert_eq!(res.graph.root(), res.graph.find(&pkg("A")));
}

#[tokio::test]
async fn unreachable_root_is_not_an_error() {
    let source = FixtureSource::default();
    let res = resolve(&source, &pkg("Missing"), 2).await.unwrap();
    assert_eq!(res.graph.len(), 1);
    assert!(res.metadata.is_empty());
}

#[tokio::test]
async fn empty_root_name_is_an_error() {
    let source = FixtureSource::default();
    let result = resolve(&source, &PackageIdentity::new("", "1.0.0"), 2).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn resolution_is_idempotent() {
    let source = FixtureSource::default()
        .with("A", vec!["B", "C"])
        .with("B", vec!["C", "A"])
        .with("C", vec![])
        .authored("A", vec!["Alice", "Bob"]);

    let first = resolve(&source, &pkg("A"), 3).await.unwrap();
    let second = resolve(&source, &pkg("A"), 3).await.unwrap();

    assert_eq!(adjacency(&first), adjacency(&second));
    for meta in first.metadata.iter() {
        assert_eq!(second.metadata.get(&meta.identity), Some(meta));
    }
    assert_eq!(
        first.metadata.get(&pkg("A")).unwrap().authors_display(),
        "Alice, Bob"
    );
}

#[tokio::test]
async fn case_variants_resolve_to_one_node() {
    let source = FixtureSource::default()
        .with("A", vec!["B", "b"])
        .with("B", vec![]);

    let res = resolve(&source, &pkg("A"), 3).await.unwrap();

    assert_eq!(res.graph.len(), 2);
    assert_eq!(res.graph.edge_count(), 1);
    assert_eq!(source.fetch_count("B"), 1);
}
