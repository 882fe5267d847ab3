//! Debounce, stale-response and geometry scenarios

use super::fixtures::{Command, Harness, numbered, results};

#[tokio::test(start_paused = true)]
async fn rapid_typing_dispatches_one_search_with_last_text() {
    let mut h = Harness::new();

    for text in ["r", "re", "rep", "repo"] {
        h.type_text(text);
        h.run_for(30).await;
    }
    h.settle().await;

    assert_eq!(h.bridge.searches(), vec!["repo"]);
    assert_eq!(h.launcher.dispatched_searches(), 1);
    assert_eq!(h.paths(), vec!["/r/repo.txt"]);
}

#[tokio::test(start_paused = true)]
async fn search_waits_for_quiet_interval() {
    let mut h = Harness::new();

    h.type_text("notes");
    h.run_for(90).await;
    assert!(h.bridge.searches().is_empty());

    h.run_for(20).await;
    assert_eq!(h.bridge.searches(), vec!["notes"]);
}

#[tokio::test(start_paused = true)]
async fn pauses_longer_than_debounce_dispatch_each_query() {
    let mut h = Harness::new();

    h.type_text("a");
    h.run_for(150).await;
    h.type_text("ab");
    h.settle().await;

    assert_eq!(h.bridge.searches(), vec!["a", "ab"]);
    assert_eq!(h.paths(), vec!["/r/ab.txt"]);
}

#[tokio::test(start_paused = true)]
async fn query_is_passed_as_typed() {
    let mut h = Harness::new();

    h.type_text("  two words ");
    h.settle().await;

    assert_eq!(h.bridge.searches(), vec!["  two words "]);
}

#[tokio::test(start_paused = true)]
async fn stale_response_never_overwrites_newer_results() {
    let mut h = Harness::new();
    h.bridge.respond("slow", 500, results(&["/old/slow.txt"]));
    h.bridge.respond("fast", 10, results(&["/new/fast.txt"]));

    h.type_text("slow");
    h.run_for(150).await;
    h.type_text("fast");
    h.run_for(200).await;
    assert_eq!(h.paths(), vec!["/new/fast.txt"]);

    // The slow response lands now and must be dropped
    h.settle().await;
    assert_eq!(h.bridge.searches(), vec!["slow", "fast"]);
    assert_eq!(h.paths(), vec!["/new/fast.txt"]);
}

#[tokio::test(start_paused = true)]
async fn clearing_input_orphans_in_flight_search() {
    let mut h = Harness::new();
    h.bridge.respond("slow", 300, results(&["/late.txt"]));

    h.type_text("slow");
    h.run_for(150).await;
    h.type_text("");
    h.settle().await;

    assert!(h.launcher.results().is_empty());
    assert_eq!(h.launcher.geometry().height, 60);
}

#[tokio::test(start_paused = true)]
async fn blank_input_clears_without_searching() {
    let mut h = Harness::new();

    h.type_text("abc");
    h.run_for(50).await;
    h.type_text("   ");
    h.settle().await;

    assert!(h.bridge.searches().is_empty());
    assert!(h.launcher.results().is_empty());
    assert_eq!(h.bridge.last_resize(), Some((700, 60)));
}

#[tokio::test(start_paused = true)]
async fn blank_input_clears_existing_results_synchronously() {
    let mut h = Harness::new();
    h.bridge.respond("docs", 0, numbered(3));
    h.type_text("docs");
    h.settle().await;
    assert_eq!(h.launcher.results().len(), 3);

    h.type_text("");
    assert!(h.launcher.results().is_empty());
    assert!(h.launcher.list().is_empty());
    assert_eq!(h.bridge.last_resize(), Some((700, 60)));
}

#[tokio::test(start_paused = true)]
async fn failed_search_keeps_previous_results() {
    let mut h = Harness::new();
    h.bridge.respond("good", 0, numbered(3));
    h.bridge.fail("bad", 0, "backend down");

    h.type_text("good");
    h.settle().await;
    h.launcher.process(crate::UiEvent::Key {
        key: crate::Key::ArrowDown,
    });

    h.type_text("bad");
    h.settle().await;

    assert_eq!(h.launcher.results().len(), 3);
    assert_eq!(h.launcher.results().selected(), 1);
    assert_eq!(h.launcher.geometry().height, 224);
}

#[tokio::test(start_paused = true)]
async fn new_results_reset_selection() {
    let mut h = Harness::new();
    h.bridge.respond("one", 0, numbered(4));
    h.bridge.respond("two", 0, numbered(2));

    h.type_text("one");
    h.settle().await;
    h.key(crate::Key::ArrowUp);
    assert_eq!(h.launcher.results().selected(), 3);

    h.type_text("two");
    h.settle().await;
    assert_eq!(h.launcher.results().selected(), 0);
    assert_eq!(h.launcher.list().selected, Some(0));
}

#[tokio::test(start_paused = true)]
async fn window_follows_result_count() {
    let mut h = Harness::new();
    h.bridge.respond("three", 0, numbered(3));
    h.bridge.respond("eight", 0, numbered(8));
    h.bridge.respond("none", 0, Vec::new());

    h.type_text("three");
    h.settle().await;
    assert_eq!(h.bridge.last_resize(), Some((700, 224)));

    h.type_text("eight");
    h.settle().await;
    assert_eq!(h.bridge.last_resize(), Some((700, 324)));

    h.type_text("none");
    h.settle().await;
    assert_eq!(h.bridge.last_resize(), Some((700, 60)));
}

#[tokio::test(start_paused = true)]
async fn collapsing_recenters_after_delay() {
    let mut h = Harness::new();
    h.bridge.respond("docs", 0, numbered(2));
    h.type_text("docs");
    h.settle().await;
    h.bridge.take_commands();

    h.type_text("");
    assert_eq!(h.bridge.commands(), vec![Command::Resize(700, 60)]);

    h.run_for(20).await;
    assert_eq!(
        h.bridge.commands(),
        vec![Command::Resize(700, 60), Command::Recenter]
    );
}

#[tokio::test(start_paused = true)]
async fn expanding_does_not_recenter() {
    let mut h = Harness::new();
    h.bridge.respond("docs", 0, numbered(2));
    h.type_text("docs");
    h.settle().await;

    assert_eq!(h.bridge.count(&Command::Recenter), 0);
}
