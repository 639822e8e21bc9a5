//! Streaming dispatch
//!
//! A streaming function runs as a task and publishes a succession of
//! values. Delivery is latest-value-wins: a slow consumer sees the most
//! recent published grid, never a backlog. Cancellation is by dropping the
//! [`StreamingCall`]; the body observes it through
//! [`StreamEmitter::is_cancelled`] or a failed [`StreamEmitter::send`] and
//! is expected to wind down on its own.

use sheetbridge_core::Grid;
use sheetbridge_convert::{write, ConvertOptions, Value};
use tokio::sync::watch;

use crate::bind::BoundCall;
use crate::call::error_grid;
use crate::error::{UdfError, UdfResult};
use crate::registry::FnBody;

/// Publishing handle passed to a streaming function body.
pub struct StreamEmitter {
    tx: watch::Sender<Option<Grid>>,
    ret: ConvertOptions,
}

impl StreamEmitter {
    /// Convert and publish a value, replacing any previous one. Returns
    /// `false` once the consumer is gone; the body should stop then.
    pub fn send(&self, value: &Value) -> bool {
        let grid = match write(value, &self.ret) {
            Ok(grid) => grid,
            Err(e) => {
                tracing::error!(error = %e, "streamed value conversion failed");
                error_grid(&e.to_string())
            }
        };
        self.tx.send(Some(grid)).is_ok()
    }

    /// True once the consuming [`StreamingCall`] has been dropped.
    pub fn is_cancelled(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer side of a streaming call.
///
/// Dropping it is the cancellation signal: the emitter's sends start
/// failing and the task is expected to finish. The task itself is never
/// aborted mid-send.
#[derive(Debug)]
pub struct StreamingCall {
    rx: watch::Receiver<Option<Grid>>,
    handle: tokio::task::JoinHandle<()>,
}

impl StreamingCall {
    /// Wait for the next published grid. Yields the latest value only;
    /// intermediate values published while not waiting are skipped.
    /// Returns `None` once the task has finished and every published value
    /// has been seen.
    pub async fn recv(&mut self) -> Option<Grid> {
        if self.rx.changed().await.is_err() {
            return None;
        }
        self.rx.borrow_and_update().clone()
    }

    /// Most recently published grid, if any, without waiting.
    pub fn latest(&self) -> Option<Grid> {
        self.rx.borrow().clone()
    }

    /// True once the body task has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawn a bound streaming call onto the current tokio runtime.
pub fn invoke_streaming(call: BoundCall) -> UdfResult<StreamingCall> {
    let BoundCall { func, args } = call;
    let body = match &func.body {
        FnBody::Stream(body) => body,
        FnBody::Sync(_) => {
            return Err(UdfError::InvalidSignature {
                name: func.meta.name.clone(),
                reason: "not a streaming function".into(),
            })
        }
    };

    let (tx, rx) = watch::channel(None);
    let err_tx = tx.clone();
    let emitter = StreamEmitter {
        tx,
        ret: func.meta.ret.clone(),
    };
    let name = func.meta.name.clone();
    let fut = body(args, emitter);

    let handle = tokio::spawn(async move {
        if let Err(message) = fut.await {
            tracing::error!(func = %name, %message, "streaming function body failed");
            let _ = err_tx.send(Some(error_grid(&message)));
        }
    });

    Ok(StreamingCall { rx, handle })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::bind;
    use crate::descriptor::{FnMetadata, ParamSpec};
    use crate::registry::{CallRequest, FnRegistry};
    use pretty_assertions::assert_eq;
    use sheetbridge_core::Cell;
    use sheetbridge_convert::{Scalar, TargetKind};
    use std::time::Duration;

    fn counter_registry() -> FnRegistry {
        let registry = FnRegistry::new();
        registry.register(
            FnMetadata::new("count_to")
                .with_param(ParamSpec::new("n", TargetKind::Scalar)),
            FnBody::Stream(Box::new(|args, emitter| {
                Box::pin(async move {
                    let n = match args[0].as_scalar() {
                        Some(Scalar::Number(n)) => *n as i64,
                        other => return Err(format!("expected a number, got {other:?}")),
                    };
                    for i in 1..=n {
                        if !emitter.send(&Value::Scalar(Scalar::Number(i as f64))) {
                            break;
                        }
                        tokio::task::yield_now().await;
                    }
                    Ok(())
                })
            })),
        );
        registry
    }

    fn bound(registry: &FnRegistry, n: f64) -> BoundCall {
        let request = CallRequest::new("count_to", vec![Grid::single(Cell::from(n))]);
        bind(registry, &request).unwrap()
    }

    #[tokio::test]
    async fn streams_values_and_finishes() {
        let registry = counter_registry();
        let mut call = invoke_streaming(bound(&registry, 3.0)).unwrap();

        let mut seen = Vec::new();
        while let Some(grid) = call.recv().await {
            seen.push(grid[(0, 0)].clone());
        }
        // Latest-value-wins delivery: some intermediates may be skipped,
        // but the final value always arrives
        assert_eq!(seen.last(), Some(&Cell::from(3.0)));
        assert!(seen.iter().all(|c| matches!(c, Cell::Number(_))));
    }

    #[tokio::test]
    async fn slow_consumer_sees_only_the_latest() {
        let registry = counter_registry();
        let mut call = invoke_streaming(bound(&registry, 50.0)).unwrap();

        // Let the task run to completion before consuming anything
        while !call.is_finished() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(call.recv().await, Some(Grid::single(Cell::from(50.0))));
        assert_eq!(call.recv().await, None);
    }

    #[tokio::test]
    async fn dropping_the_call_cancels_the_body() {
        let registry = FnRegistry::new();
        let (done_tx, done_rx) = tokio::sync::oneshot::channel::<i64>();
        let done_tx = std::sync::Mutex::new(Some(done_tx));
        registry.register(
            FnMetadata::new("forever").with_param(
                ParamSpec::new("start", TargetKind::Scalar).with_default(Scalar::Number(0.0)),
            ),
            FnBody::Stream(Box::new(move |_, emitter| {
                let done_tx = done_tx.lock().unwrap().take();
                Box::pin(async move {
                    let mut i = 0;
                    while emitter.send(&Value::Scalar(Scalar::Number(i as f64))) {
                        i += 1;
                        tokio::task::yield_now().await;
                    }
                    if let Some(tx) = done_tx {
                        let _ = tx.send(i);
                    }
                    Ok(())
                })
            })),
        );

        let request = CallRequest::new("forever", vec![]);
        let mut call = invoke_streaming(bind(&registry, &request).unwrap()).unwrap();
        assert!(call.recv().await.is_some());
        drop(call);

        // The body notices the dropped receiver and exits the loop
        let stopped_at = tokio::time::timeout(Duration::from_secs(1), done_rx)
            .await
            .expect("body did not observe cancellation")
            .expect("body task dropped the signal");
        assert!(stopped_at >= 1);
    }

    #[tokio::test]
    async fn body_error_is_published_as_error_grid() {
        let registry = counter_registry();
        let request = CallRequest::new("count_to", vec![Grid::single(Cell::from("nope"))]);
        let mut call = invoke_streaming(bind(&registry, &request).unwrap()).unwrap();

        let mut last = None;
        while let Some(grid) = call.recv().await {
            last = Some(grid);
        }
        match last {
            Some(grid) => match &grid[(0, 0)] {
                Cell::Text(s) => assert!(s.starts_with("ERROR: "), "got {s:?}"),
                other => panic!("expected error text, got {other:?}"),
            },
            None => panic!("expected an error grid"),
        }
    }

    #[tokio::test]
    async fn sync_body_cannot_stream() {
        let registry = FnRegistry::new();
        registry.register(
            FnMetadata::new("plain"),
            FnBody::Sync(Box::new(|_| Ok(Value::Scalar(Scalar::None)))),
        );
        let call = bind(&registry, &CallRequest::new("plain", vec![])).unwrap();
        let err = invoke_streaming(call).unwrap_err();
        assert!(matches!(err, UdfError::InvalidSignature { .. }));
    }
}
