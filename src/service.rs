//! Background-thread invocation boundary.
//!
//! Dispatches a generation run to a worker thread and hands back a job
//! handle that yields exactly one terminal reply: `complete` with the
//! generation result, or `error` with an execution fault. A run that ends
//! without a full schedule is still `complete`; the shortfall arrives as
//! advisory conflicts inside the result.

use std::sync::mpsc;
use std::thread;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{GenerationInput, GenerationOutput};
use crate::solve;

/// The single terminal message of a solve job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SolveReply {
    Complete { result: GenerationOutput },
    Error { error: String },
}

/// Handle to a dispatched solve job.
///
/// Dropping the handle abandons the job: the worker finishes on its own and
/// its reply is discarded.
pub struct SolveJob {
    receiver: mpsc::Receiver<SolveReply>,
    handle: thread::JoinHandle<()>,
    created_at: DateTime<Utc>,
}

/// A finished job: the reply plus bookkeeping timestamps.
#[derive(Clone, Debug)]
pub struct SolveRecord {
    pub reply: SolveReply,
    pub created_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl SolveJob {
    /// When the job was dispatched.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Block until the worker produces its terminal reply.
    pub fn wait(self) -> SolveRecord {
        let reply = match self.receiver.recv() {
            Ok(reply) => reply,
            // The worker died without replying (it panicked).
            Err(_) => SolveReply::Error {
                error: "solver worker terminated without a reply".to_string(),
            },
        };
        let _ = self.handle.join();
        SolveRecord {
            reply,
            created_at: self.created_at,
            completed_at: Utc::now(),
        }
    }
}

/// Dispatch a generation run to a background thread.
///
/// Jobs share no mutable state; any number may run concurrently.
pub fn spawn_solve(input: GenerationInput) -> SolveJob {
    let (sender, receiver) = mpsc::channel();
    let created_at = Utc::now();
    let handle = thread::spawn(move || {
        let reply = match solve(&input) {
            Ok(result) => SolveReply::Complete { result },
            Err(e) => SolveReply::Error {
                error: e.to_string(),
            },
        };
        // The receiver may already be gone if the job was abandoned.
        let _ = sender.send(reply);
    });
    SolveJob {
        receiver,
        handle,
        created_at,
    }
}
