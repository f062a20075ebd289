//! Prefetch queue manager behavior: refill, fallback, low-water background
//! refill, and stale-result discard across filter changes.

mod support;

use std::sync::Arc;
use std::time::Duration;

use helmsman::config::QueueConfig;
use helmsman::core::Prefetcher;
use helmsman::domain::Filter;
use helmsman::error::Error;
use helmsman::ports::CardSource;
use helmsman::testkit::cards::{raw_card, ScriptedCardSource};

use support::{filter_ug, quiesce};

fn batch(count: usize) -> Vec<helmsman::scryfall::RawCard> {
    (0..count).map(|i| raw_card(&format!("Commander {i}"))).collect()
}

fn prefetcher(source: Arc<ScriptedCardSource>, tuning: QueueConfig) -> Arc<Prefetcher> {
    Arc::new(Prefetcher::new(source as Arc<dyn CardSource>, tuning))
}

fn tuning(target_size: usize, low_water_mark: usize) -> QueueConfig {
    QueueConfig {
        target_size,
        low_water_mark,
    }
}

#[tokio::test]
async fn refill_is_bounded_by_target_size() {
    let source = Arc::new(ScriptedCardSource::new().with_search_results(vec![Ok(batch(25))]));
    let queue = prefetcher(Arc::clone(&source), tuning(10, 3));

    let appended = queue.refill().await.unwrap();
    assert_eq!(appended, 10);
    assert_eq!(queue.len(), 10);
}

#[tokio::test]
async fn consume_decrements_by_exactly_one() {
    let source = Arc::new(ScriptedCardSource::new().with_search_results(vec![Ok(batch(5))]));
    let queue = prefetcher(Arc::clone(&source), tuning(5, 1));
    queue.refill().await.unwrap();

    let before = queue.len();
    queue.pop().unwrap();
    assert_eq!(queue.len(), before - 1);
}

#[tokio::test]
async fn pop_on_empty_queue_reports_empty() {
    let source = Arc::new(ScriptedCardSource::new());
    let queue = prefetcher(source, tuning(5, 1));
    assert!(matches!(queue.pop(), Err(Error::QueueEmpty)));
}

#[tokio::test]
async fn filter_change_empties_queue_immediately() {
    let source = Arc::new(ScriptedCardSource::new().with_search_results(vec![Ok(batch(5))]));
    let queue = prefetcher(Arc::clone(&source), tuning(5, 1));
    queue.refill().await.unwrap();
    assert!(!queue.is_empty());

    queue.apply_filter(filter_ug());
    assert_eq!(queue.len(), 0);
}

#[tokio::test]
async fn empty_filtered_search_falls_back_to_commander_only() {
    let source = Arc::new(ScriptedCardSource::new().with_search_results(vec![
        Ok(Vec::new()),
        Ok(batch(3)),
    ]));
    let queue = prefetcher(Arc::clone(&source), tuning(5, 1));
    queue.apply_filter(filter_ug());

    let appended = queue.refill().await.unwrap();
    assert_eq!(appended, 3);

    let queries = source.queries();
    assert_eq!(queries.len(), 2);
    assert!(queries[0].contains("id:GU"));
    assert_eq!(queries[1], "is:commander");
}

#[tokio::test]
async fn empty_fallback_is_an_error() {
    let source = Arc::new(ScriptedCardSource::new());
    let queue = prefetcher(source, tuning(5, 1));

    match queue.refill().await {
        Err(Error::EmptyResults { query }) => assert!(query.contains("is:commander")),
        other => panic!("expected EmptyResults, got {other:?}"),
    }
}

#[tokio::test]
async fn network_error_propagates_from_refill() {
    let source = Arc::new(ScriptedCardSource::new().with_search_results(vec![Err(
        Error::Status {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            url: "scripted:/cards/search".to_string(),
        },
    )]));
    let queue = prefetcher(source, tuning(5, 1));

    assert!(matches!(
        queue.refill().await,
        Err(Error::Status { .. })
    ));
}

#[tokio::test]
async fn next_on_empty_queue_fetches_in_foreground() {
    let source = Arc::new(
        ScriptedCardSource::new().with_search_results(vec![Ok(vec![raw_card("Solo Draw")])]),
    );
    let queue = prefetcher(Arc::clone(&source), tuning(5, 1));

    let commander = queue.next().await.unwrap();
    assert_eq!(commander.name, "Solo Draw");
}

#[tokio::test]
async fn dropping_below_low_water_triggers_background_refill() {
    let source = Arc::new(ScriptedCardSource::new().with_search_results(vec![
        Ok(batch(4)),
        Ok(batch(4)),
    ]));
    let queue = prefetcher(Arc::clone(&source), tuning(4, 2));
    queue.refill().await.unwrap();
    assert_eq!(queue.len(), 4);

    // 4 -> 3: still above the low-water mark, no refill.
    queue.next().await.unwrap();
    quiesce().await;
    assert_eq!(source.search_count(), 1);

    // 3 -> 2: at the mark, a detached refill tops the queue back up.
    queue.next().await.unwrap();
    quiesce().await;
    assert!(queue.len() > 2, "queue was not refilled: len {}", queue.len());
}

#[tokio::test(start_paused = true)]
async fn results_for_a_stale_filter_are_discarded() {
    let source = Arc::new(
        ScriptedCardSource::new()
            .with_search_results(vec![Ok(batch(5))])
            .with_search_delay(Duration::from_millis(50)),
    );
    let queue = prefetcher(Arc::clone(&source), tuning(5, 1));

    let refill = {
        let queue = Arc::clone(&queue);
        tokio::spawn(async move { queue.refill().await })
    };
    tokio::task::yield_now().await;

    // The refill snapshot is in flight; changing the filter bumps the
    // generation so its results must be dropped on arrival.
    queue.apply_filter(Filter::any());

    refill.await.unwrap().unwrap();
    assert_eq!(queue.len(), 0);
}
