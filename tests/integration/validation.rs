use alertgraph::core::{EntityKey, EntityKind, ResolveError};
use alertgraph::resolver::{DependencyGraph, validate_store};
use alertgraph::store::parse_definitions;
use alertgraph::test_utils::DefinitionsFixture;

#[test]
fn test_fixture_documents_are_valid() {
    for fixture in [DefinitionsFixture::dependency_chain(), DefinitionsFixture::shared_notification()] {
        let store = fixture.store().unwrap();
        let report = validate_store(&store);
        assert!(report.is_ok(), "{}: {report}", fixture.name);
    }
}

#[test]
fn test_reports_every_problem() {
    let store = parse_definitions(
        r#"
[macro.m]
depends = 'alert("loop", "warn")'

[alert.loop]
macro = "m"

[alert.a]
depends = 'alert("b", "warn")'

[alert.b]
depends = 'alert("a", "warn")'

[alert.c]
depends = 'alert("x", "warn")'
warnNotification = "pager"
"#,
        "broken.toml",
    )
    .unwrap();

    let report = validate_store(&store);
    assert_eq!(report.problem_count(), 4);
    assert_eq!(report.undefined.len(), 2);
    assert_eq!(report.cycles.len(), 2);

    let text = report.to_string();
    assert!(text.contains("undefined: alert:c references alert:x"));
    assert!(text.contains("undefined: alert:c references notification:pager"));
    assert!(text.contains("cycle: alert:a → alert:b → alert:a"));
    assert!(text.contains("cycle: alert:loop → macro:m → alert:loop"));
}

#[test]
fn test_report_errors_match_resolver_errors() {
    let store = DefinitionsFixture::undefined_reference().store().unwrap();
    let errors = validate_store(&store).errors();
    assert_eq!(
        errors,
        vec![ResolveError::UndefinedReference {
            referrer: EntityKey::alert("c"),
            missing: EntityKey::alert("x"),
            suggestions: Vec::new(),
        }]
    );
}

#[test]
fn test_graph_marks_cycle_members() {
    let store = DefinitionsFixture::mutual_cycle().store().unwrap();
    let graph = DependencyGraph::build(&store);
    assert!(graph.is_cyclic(&EntityKey::alert("a")));
    assert!(graph.is_cyclic(&EntityKey::alert("b")));
    assert!(!graph.is_cyclic(&EntityKey::new(EntityKind::Alert, "healthy")));
}
