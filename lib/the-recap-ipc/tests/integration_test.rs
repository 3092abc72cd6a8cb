use std::time::Duration;
use the_recap_ipc::error::IpcError;
use the_recap_ipc::{r#pub::IpcPublisher, sub::IpcSubscriber, MatchSummaryNotice};

fn notice(game_id: &str) -> MatchSummaryNotice {
    MatchSummaryNotice {
        game_id: Some(game_id.into()),
        summary_json: r#"{"players":[]}"#.into(),
    }
}

#[tokio::test]
async fn test_pub_sub() {
    const TEST_PATH: &str = "ipc:///tmp/recap-test.ipc";
    let sent = notice("4242");

    let subscriber = IpcSubscriber::<MatchSummaryNotice>::new(TEST_PATH).unwrap();
    let publisher = IpcPublisher::<MatchSummaryNotice>::new(TEST_PATH).unwrap();
    publisher.publish(sent.clone()).await.unwrap();

    let received = subscriber.recv().await.unwrap();
    assert_eq!(received, sent);
}

#[tokio::test]
async fn test_publish_without_consumer_times_out() {
    const TEST_PATH: &str = "ipc:///tmp/recap-test-no-consumer.ipc";
    let publisher =
        IpcPublisher::<MatchSummaryNotice>::with_send_timeout(TEST_PATH, Duration::from_millis(200))
            .unwrap();

    let result = publisher.publish(notice("1")).await;
    assert!(matches!(result, Err(IpcError::NoConsumer)));
}
