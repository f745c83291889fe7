use alertgraph::config::AssemblyConfig;
use alertgraph::core::{EntityKind, ResolveError};
use alertgraph::store::parse_definitions;
use alertgraph::templating::Assembler;
use alertgraph::test_utils::DefinitionsFixture;
use regex::Regex;

/// Names of the `alert|macro|notification|lookup` blocks of an assembled
/// text, top to bottom.
fn block_sequence(text: &str) -> String {
    let block = Regex::new(r"(?m)^(alert|macro|notification|lookup) ([a-z0-9\._]+) \{").unwrap();
    block.captures_iter(text).map(|cap| cap[2].to_string()).collect::<Vec<_>>().join(",")
}

#[test]
fn test_assembled_sequence_of_dependency_chain() {
    let store = DefinitionsFixture::dependency_chain().store().unwrap();
    let batch = Assembler::new(&store).assemble_all();

    assert!(batch.is_complete());
    assert_eq!(block_sequence(batch.get("os.cpu").unwrap()), "ping.host,scollector.down,host_based,os.cpu");
    assert_eq!(block_sequence(batch.get("ping.host").unwrap()), "ping.host");
}

#[test]
fn test_assembled_sequence_with_shared_notification() {
    let store = DefinitionsFixture::shared_notification().store().unwrap();
    let batch = Assembler::new(&store).assemble_all();

    assert!(batch.is_complete());
    assert_eq!(batch.assembled.len(), 6);
    assert_eq!(
        block_sequence(batch.get("always.good").unwrap()),
        "default,ping.host,scollector.down,host_based,always.good"
    );
}

#[test]
fn test_assembled_text_is_verbatim_bodies() {
    let store = parse_definitions(
        r#"
[notification.default]
email = "ops@example.com"
print = true

[alert."ping.host"]
warn = "$q > 1"
warnNotification = ["default"]
"#,
        "verbatim.toml",
    )
    .unwrap();

    let text = Assembler::new(&store).assemble(EntityKind::Alert, "ping.host").unwrap();
    assert_eq!(
        text,
        "notification default {\n\temail = ops@example.com\n\tprint = true\n}\n\
         alert ping.host {\n\twarn = $q > 1\n\twarnNotification = default\n}"
    );
}

#[test]
fn test_template_body_included_once() {
    let store = DefinitionsFixture::shared_notification().store().unwrap();
    let text = Assembler::new(&store).assemble(EntityKind::Alert, "os.mem").unwrap();
    assert_eq!(text.matches("template generic {").count(), 1);
    assert!(text.starts_with("template generic {"));
    assert!(text.ends_with("critNotification = default\n}"));
}

#[test]
fn test_batch_isolates_broken_alerts() {
    let store = parse_definitions(
        r#"
[alert.a]
depends = 'alert("b", "warn")'

[alert.b]
depends = 'alert("a", "warn")'

[alert.c]
depends = 'alert("x", "warn")'

[alert.ok]
warn = "1"
"#,
        "mixed.toml",
    )
    .unwrap();

    let batch = Assembler::new(&store).assemble_all();
    assert_eq!(batch.assembled.keys().collect::<Vec<_>>(), vec!["ok"]);
    assert_eq!(batch.errors.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert!(matches!(batch.errors["a"], ResolveError::Cycle { .. }));
    assert!(matches!(batch.errors["c"], ResolveError::UndefinedReference { .. }));
}

#[test]
fn test_parallel_and_sequential_batches_match() {
    let store = DefinitionsFixture::shared_notification().store().unwrap();
    let sequential = AssemblyConfig {
        parallel: false,
        ..AssemblyConfig::default()
    };

    let parallel_batch = Assembler::new(&store).assemble_all();
    let sequential_batch = Assembler::with_config(&store, sequential).assemble_all();
    assert_eq!(parallel_batch, sequential_batch);
}

#[test]
fn test_templates_assemble_alone() {
    let store = DefinitionsFixture::shared_notification().store().unwrap();
    let batch = Assembler::new(&store).assemble_all_templates();
    assert_eq!(batch.assembled.keys().collect::<Vec<_>>(), vec!["generic", "unknown"]);
    assert!(batch.get("unknown").unwrap().starts_with("template unknown {"));
}
