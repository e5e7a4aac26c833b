//! Background fetches with cancellation
//!
//! Each fetch runs in its own tokio task and reports back over a channel.
//! Fetches are grouped into slots; starting a fetch in a slot aborts the one
//! already running there. Every request carries a [`Ticket`] so the receiver
//! can drop results that were superseded while in flight.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::{CmsClient, CmsError};
use crate::models::Movie;

/// Channel depth for completed fetches
const EVENT_BUFFER: usize = 32;

/// Independent unit of fetching work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The full movie list
    Catalog,
    /// The movie shown in the detail view
    Detail,
}

/// Identifies one fetch; only the latest generation of a slot is current
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub slot: Slot,
    pub generation: u64,
}

/// What to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchKind {
    Catalog,
    Movie { id: u64 },
}

/// Work the app asks the loader to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Fetch { ticket: Ticket, kind: FetchKind },
    Cancel(Slot),
}

/// Result of a fetch
#[derive(Debug)]
pub enum FetchOutcome {
    Catalog(Result<Vec<Movie>, CmsError>),
    Movie(Result<Movie, CmsError>),
}

/// A completed fetch, tagged with the ticket it was issued under
#[derive(Debug)]
pub struct FetchEvent {
    pub ticket: Ticket,
    pub outcome: FetchOutcome,
}

/// Spawns fetch tasks and keeps one handle per slot
pub struct Loader {
    client: CmsClient,
    tx: mpsc::Sender<FetchEvent>,
    tasks: HashMap<Slot, JoinHandle<()>>,
}

impl Loader {
    /// Create a loader and the receiver its results arrive on
    pub fn new(client: CmsClient) -> (Self, mpsc::Receiver<FetchEvent>) {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let loader = Self {
            client,
            tx,
            tasks: HashMap::new(),
        };
        (loader, rx)
    }

    /// Carry out a request from the app
    pub fn handle(&mut self, request: Request) {
        match request {
            Request::Fetch { ticket, kind } => self.fetch(ticket, kind),
            Request::Cancel(slot) => self.cancel(slot),
        }
    }

    /// Start a fetch, aborting whatever is still running in the same slot
    pub fn fetch(&mut self, ticket: Ticket, kind: FetchKind) {
        self.cancel(ticket.slot);

        let client = self.client.clone();
        let tx = self.tx.clone();
        debug!(?ticket, ?kind, "spawning fetch");

        let handle = tokio::spawn(async move {
            let outcome = match kind {
                FetchKind::Catalog => FetchOutcome::Catalog(client.list_movies().await),
                FetchKind::Movie { id } => FetchOutcome::Movie(client.find_movie(id).await),
            };
            // Receiver gone means the app is shutting down
            let _ = tx.send(FetchEvent { ticket, outcome }).await;
        });

        self.tasks.insert(ticket.slot, handle);
    }

    /// Abort the fetch running in a slot, if any
    pub fn cancel(&mut self, slot: Slot) {
        if let Some(handle) = self.tasks.remove(&slot) {
            if !handle.is_finished() {
                debug!(?slot, "aborting in-flight fetch");
            }
            handle.abort();
        }
    }

    /// Whether a slot still has a task that has not completed
    pub fn in_flight(&self, slot: Slot) -> bool {
        self.tasks
            .get(&slot)
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
