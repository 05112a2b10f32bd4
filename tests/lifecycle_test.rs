use mining_pipeline::framework::mock::RecordingSink;
use mining_pipeline::framework::PipelineError;
use mining_pipeline::lifecycle::{LifecycleState, MiningSystem};
use mining_pipeline::model::{ConfigError, Delay, PipelineConfig, PipelineEvent, Role};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_startup_reports_every_idle_worker() {
    let sink = Arc::new(RecordingSink::new());
    let system = MiningSystem::start(PipelineConfig::default(), sink.clone())
        .expect("Failed to start system");

    assert_eq!(system.state(), LifecycleState::Running);
    let waiting: Vec<String> = sink
        .events()
        .iter()
        .filter(|e| matches!(e, PipelineEvent::Waiting { .. }))
        .map(|e| e.to_string())
        .collect();
    assert_eq!(
        waiting,
        [
            "Extractor-1: waiting...",
            "Extractor-2: waiting...",
            "Extractor-3: waiting...",
            "Transporter-1: waiting...",
            "Transporter-2: waiting...",
            "Transporter-3: waiting...",
        ]
    );

    let sizes: Vec<(Role, usize)> = system.pools().iter().map(|p| (p.role(), p.len())).collect();
    assert_eq!(
        sizes,
        [(Role::Explorer, 2), (Role::Extractor, 3), (Role::Transporter, 3)]
    );

    system.shutdown_and_join().await.unwrap();
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let sink = Arc::new(RecordingSink::new());
    let config = PipelineConfig {
        extractors: 0,
        ..PipelineConfig::default()
    };

    let result = MiningSystem::start(config, sink.clone());
    assert!(matches!(
        result,
        Err(PipelineError::InvalidConfig(ConfigError::EmptyPool(Role::Extractor)))
    ));
    assert!(sink.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_every_worker_once() {
    let sink = Arc::new(RecordingSink::new());
    let mut system = MiningSystem::start(PipelineConfig::default(), sink.clone())
        .expect("Failed to start system");

    tokio::time::sleep(Duration::from_secs(30)).await;
    system.shutdown().expect("First shutdown should succeed");
    assert_eq!(system.state(), LifecycleState::Terminated);
    assert!(system.trigger().is_cancelled());

    let events = sink.events();
    let tail: Vec<String> = events[events.len() - 10..]
        .iter()
        .map(|e| e.to_string())
        .collect();
    assert_eq!(
        tail,
        [
            "Cancel all workers",
            "Cancelling Explorer-1",
            "Cancelling Explorer-2",
            "Cancelling Extractor-1",
            "Cancelling Extractor-2",
            "Cancelling Extractor-3",
            "Cancelling Transporter-1",
            "Cancelling Transporter-2",
            "Cancelling Transporter-3",
            "Terminated.",
        ]
    );

    assert!(matches!(
        system.shutdown(),
        Err(PipelineError::AlreadyShutDown)
    ));

    // Workers honor cancellation at their next suspension point.
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(system
        .pools()
        .iter()
        .flat_map(|p| p.workers())
        .all(|w| w.is_finished()));

    system.shutdown_and_join().await.unwrap();
}

/// Shutting down at arbitrary moments never leaves idle counts out of bounds.
#[tokio::test(start_paused = true)]
async fn test_shutdown_at_any_point_keeps_idle_counts_consistent() {
    for millis in (500..=20_000).step_by(1_500) {
        let sink = Arc::new(RecordingSink::new());
        let system = MiningSystem::start(PipelineConfig::default(), sink.clone())
            .expect("Failed to start system");

        tokio::time::sleep(Duration::from_millis(millis)).await;
        let before = system.snapshot();
        assert!(before.idle_extractors <= 3);
        assert!(before.idle_transporters <= 3);

        system.trigger().cancel();
        system
            .run_until_triggered()
            .await
            .expect("Shutdown should succeed");

        assert_eq!(sink.events().last(), Some(&PipelineEvent::Terminated));
        for event in sink.events() {
            if let Some(idle) = event.idle() {
                assert!(idle <= 3, "idle count {idle} above pool size");
            }
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_joined_shutdown_returns_every_idle_slot() {
    let sink = Arc::new(RecordingSink::new());
    let system = MiningSystem::start(PipelineConfig::default(), sink.clone())
        .expect("Failed to start system");

    // Mid-flight: some extractors and transporters are busy.
    tokio::time::sleep(Duration::from_millis(7_300)).await;

    let last = system
        .shutdown_and_join()
        .await
        .expect("Workers should stop cleanly");
    assert_eq!(last.idle_extractors, 3);
    assert_eq!(last.idle_transporters, 3);
}

/// Cancelling busy workers on a parallel runtime reports every returned slot.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_shutdown_reports_every_abandoned_slot() {
    let sink = Arc::new(RecordingSink::new());
    let config = PipelineConfig {
        explorers: 6,
        explore_delay: Delay::Fixed(Duration::from_millis(1)),
        extraction_delay: Delay::Fixed(Duration::from_secs(30)),
        transport_time: Duration::from_secs(30),
        ..PipelineConfig::default()
    };
    let system = MiningSystem::start(config, sink.clone()).expect("Failed to start system");

    // Every extractor claims a discovery and then sleeps far past the shutdown.
    tokio::time::timeout(Duration::from_secs(10), async {
        while system.snapshot().idle_extractors > 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("Every extractor should get busy");

    let last = system
        .shutdown_and_join()
        .await
        .expect("Workers should stop cleanly");
    assert_eq!(last.idle_extractors, 3);
    assert_eq!(last.idle_transporters, 3);

    let abandoned: Vec<(Role, usize)> = sink
        .events()
        .iter()
        .filter_map(|e| match e {
            PipelineEvent::Abandoned { worker, idle } => Some((worker.role, *idle)),
            _ => None,
        })
        .collect();
    let mut extractor_idles: Vec<usize> = abandoned
        .iter()
        .filter(|(role, _)| *role == Role::Extractor)
        .map(|(_, idle)| *idle)
        .collect();
    extractor_idles.sort_unstable();
    assert_eq!(extractor_idles, [1, 2, 3]);
    assert!(abandoned.iter().all(|(role, _)| *role != Role::Explorer));
}
