//! Integration tests for the retry executor
//!
//! Covers attempt numbering and budgets, and the caller-side pattern of
//! wrapping a whole deployment in `run_with_retry`.

mod common;

use apim_provisioner::retry::{run_with_retry, RetryPolicy};
use common::{assert_remote, FakeResourceClient, Fault, HarnessBuilder};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn no_delay(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(max_retries, Duration::ZERO)
}

#[tokio::test]
async fn test_always_failing_operation_runs_exactly_max_retries_times() {
    for max_retries in 1..=5 {
        let attempts = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&attempts);

        let result: Result<(), String> = run_with_retry(
            move |attempt| {
                let seen = Arc::clone(&seen);
                async move {
                    seen.lock().unwrap().push(attempt);
                    Err(format!("failure on attempt {attempt}"))
                }
            },
            &no_delay(max_retries),
        )
        .await;

        let expected: Vec<u32> = (1..=max_retries).collect();
        assert_eq!(*attempts.lock().unwrap(), expected);
        assert_eq!(
            result.unwrap_err(),
            format!("failure on attempt {max_retries}")
        );
    }
}

#[tokio::test]
async fn test_succeeds_on_kth_attempt() {
    let max_retries = 4;
    for k in 1..=max_retries {
        let calls = Arc::new(Mutex::new(0_u32));
        let counter = Arc::clone(&calls);

        let result: Result<&str, &str> = run_with_retry(
            move |attempt| {
                let counter = Arc::clone(&counter);
                async move {
                    *counter.lock().unwrap() += 1;
                    if attempt < k {
                        Err("transient")
                    } else {
                        Ok("done")
                    }
                }
            },
            &no_delay(max_retries),
        )
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(*calls.lock().unwrap(), k);
    }
}

#[tokio::test]
async fn test_immediately_ready_error_is_retried() {
    let calls = Arc::new(Mutex::new(0_u32));
    let counter = Arc::clone(&calls);

    let result: Result<(), &str> = run_with_retry(
        move |_| {
            *counter.lock().unwrap() += 1;
            std::future::ready(Err("fails before awaiting"))
        },
        &no_delay(3),
    )
    .await;

    assert_eq!(result, Err("fails before awaiting"));
    assert_eq!(*calls.lock().unwrap(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_waits_fixed_delay_between_attempts() {
    let policy = RetryPolicy::new(4, Duration::from_millis(250));
    let start = tokio::time::Instant::now();

    let result: Result<(), &str> = run_with_retry(|_| async { Err("down") }, &policy).await;

    assert!(result.is_err());
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(750));
    assert!(elapsed < Duration::from_millis(1000));
}

#[tokio::test]
async fn test_retrying_deploy_recovers_from_transient_api_failure() {
    let mut builder = HarnessBuilder::new();
    builder.api = FakeResourceClient::new("api", &builder.log)
        .failing_upserts(Fault::Remote(503, "gateway busy"), 2);
    let harness = builder.build();

    let api = run_with_retry(|_| harness.orchestrator.deploy_api(), &no_delay(3))
        .await
        .unwrap();

    assert_eq!(api.name, "test-api");
    assert_eq!(harness.api.submitted().len(), 3);
    assert_eq!(harness.backend.submitted().len(), 1);
    assert_eq!(harness.property.submitted().len(), 1);
}

#[tokio::test]
async fn test_retrying_deploy_returns_last_failure_when_exhausted() {
    let mut builder = HarnessBuilder::new();
    builder.backend = FakeResourceClient::new("backend", &builder.log)
        .failing_upsert(Fault::Remote(500, "backend down"));
    let harness = builder.build();

    let error = run_with_retry(|_| harness.orchestrator.deploy_api(), &no_delay(2))
        .await
        .unwrap_err();

    assert_remote(&error, 500, "backend down");
    assert_eq!(harness.api.submitted().len(), 2);
    assert_eq!(harness.backend.submitted().len(), 2);
    assert!(harness.property.submitted().is_empty());
}
