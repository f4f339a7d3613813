mod common;

use std::sync::Arc;

use common::recording_registry;
use outmux::term::{RecordingSink, RenderSink, TerminalRegistry};

#[test]
fn same_name_resolves_to_same_instance() {
    let (registry, _sink) = recording_registry();

    let first = registry.resolve("jdk-download");
    let second = registry.resolve("jdk-download");
    assert!(first.same_instance(&second));

    first.close();
    let third = registry.resolve("jdk-download");
    assert!(first.same_instance(&third));
}

#[test]
fn close_does_not_evict_the_entry() {
    let (registry, _sink) = recording_registry();

    registry.resolve("s").close();

    assert_eq!(registry.len(), 1);
    assert!(!registry.is_empty());
}

#[test]
fn sink_factory_runs_once_per_stream() {
    let counter = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let factory_counter = Arc::clone(&counter);
    let registry = TerminalRegistry::new(Arc::new(move |_name: &str| {
        factory_counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        RecordingSink::new() as Arc<dyn RenderSink>
    }));

    registry.resolve("a");
    registry.resolve("a");
    registry.resolve("b");

    assert_eq!(counter.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[test]
fn factory_receives_the_stream_name() {
    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let factory_seen = Arc::clone(&seen);
    let registry = TerminalRegistry::new(Arc::new(move |name: &str| {
        factory_seen.lock().push(name.to_string());
        RecordingSink::new() as Arc<dyn RenderSink>
    }));

    registry.resolve("stdout");
    registry.resolve("stderr");

    assert_eq!(
        *seen.lock(),
        vec!["stdout".to_string(), "stderr".to_string()]
    );
}

#[test]
fn isolated_registries_do_not_share_instances() {
    let (left, _left_sink) = recording_registry();
    let (right, _right_sink) = recording_registry();

    let a = left.resolve("same-name");
    let b = right.resolve("same-name");

    assert!(!a.same_instance(&b));
}

#[test]
fn terminals_lists_every_stream_once() {
    let (registry, _sink) = recording_registry();

    registry.resolve("a");
    registry.resolve("b");
    registry.resolve("a");

    let mut names: Vec<String> = registry
        .terminals()
        .iter()
        .map(|terminal| terminal.name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
}
