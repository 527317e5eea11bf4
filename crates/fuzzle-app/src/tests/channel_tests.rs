use std::time::Duration;

use fuzzle_types::AppEvent;
use tokio::time::timeout;

use crate::controller::{ChannelSet, MAX_CHANNEL_CAPACITY};

#[tokio::test]
async fn test_sync_sender_reaches_async_receiver() {
    let (tx, rx) = kanal::bounded_async::<AppEvent>(4);
    let sync_tx = tx.clone().to_sync();

    std::thread::spawn(move || {
        sync_tx
            .send(AppEvent::TextInput("typed".to_string()))
            .expect("send failed");
    });

    let result = timeout(Duration::from_secs(2), rx.recv()).await;

    match result {
        Ok(Ok(AppEvent::TextInput(text))) => assert_eq!(text, "typed"),
        Ok(Ok(_)) => panic!("Wrong event type"),
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - event from input thread never arrived!"),
    }
}

#[tokio::test]
async fn test_progress_burst_fits_app_to_ui_channel() {
    let channels = ChannelSet::new(8);
    let (tx, rx) = channels.app_to_ui;

    // A burst of progress events must not block the sender
    let result = timeout(Duration::from_secs(2), async {
        for i in 0..32 {
            tx.send(AppEvent::PlaybackProgress {
                index: Some(i),
                word: None,
            })
            .await
            .expect("send failed");
        }
    })
    .await;
    assert!(result.is_ok(), "Sender blocked on a burst of 32 events");

    let mut count = 0;
    while let Ok(Some(_)) = rx.try_recv() {
        count += 1;
    }
    assert_eq!(count, 32);
}

#[tokio::test]
async fn test_zero_capacity_is_raised() {
    let channels = ChannelSet::new(0);
    let (tx, rx) = channels.ui_to_app;

    assert!(tx.try_send(AppEvent::Simplify).unwrap());
    assert!(matches!(rx.try_recv(), Ok(Some(AppEvent::Simplify))));
}

#[tokio::test]
async fn test_huge_capacity_is_clamped() {
    let channels = ChannelSet::new(usize::MAX / 2);
    let (tx, rx) = channels.ui_to_app;

    for _ in 0..MAX_CHANNEL_CAPACITY {
        assert!(tx.try_send(AppEvent::StopReading).unwrap());
    }
    assert!(!tx.try_send(AppEvent::StopReading).unwrap(), "channel exceeded its bound");
    assert!(matches!(rx.try_recv(), Ok(Some(AppEvent::StopReading))));

    let (tx, rx) = channels.app_to_ui;
    assert!(tx.try_send(AppEvent::Quit).unwrap());
    assert!(matches!(rx.try_recv(), Ok(Some(AppEvent::Quit))));
}
