//! Background API work.
//!
//! Scenes queue [`Request`]s during a frame; the host hands them to [`Tasks`],
//! which runs them on a tokio runtime. Finished work comes back as
//! [`TaskResult`]s over a channel, and the event loop is woken so the host can
//! apply them and draw.

use std::sync::mpsc;

use anyhow::{Context, Result};
use lumen_engine::window::Waker;
use serde_json::Value;

use crate::api::{ApiClient, ApiError, Features};

/// Scene generation a request belongs to. Results from an older generation
/// are dropped by the scene.
pub type Generation = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Features { generation: Generation },
    Predict { generation: Generation, features: Features },
}

#[derive(Debug)]
pub enum TaskResult {
    Features { generation: Generation, result: Result<Vec<String>, ApiError> },
    Prediction { generation: Generation, result: Result<Value, ApiError> },
}

pub struct Tasks {
    runtime: tokio::runtime::Runtime,
    client: ApiClient,
    waker: Waker,
    tx: mpsc::Sender<TaskResult>,
    rx: mpsc::Receiver<TaskResult>,
}

impl Tasks {
    pub fn new(client: ApiClient, waker: Waker) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("lumen-api")
            .enable_all()
            .build()
            .context("failed to start tokio runtime")?;
        let (tx, rx) = mpsc::channel();
        Ok(Self { runtime, client, waker, tx, rx })
    }

    pub fn spawn(&self, request: Request) {
        log::debug!("dispatching {request:?}");
        let client = self.client.clone();
        let waker = self.waker.clone();
        let tx = self.tx.clone();

        self.runtime.spawn(async move {
            let result = match request {
                Request::Features { generation } => TaskResult::Features {
                    generation,
                    result: client.features().await,
                },
                Request::Predict { generation, features } => TaskResult::Prediction {
                    generation,
                    result: client.predict(&features).await,
                },
            };
            if tx.send(result).is_ok() {
                waker.wake();
            }
        });
    }

    /// Results that finished since the last call.
    pub fn drain(&self) -> impl Iterator<Item = TaskResult> + '_ {
        self.rx.try_iter()
    }
}
