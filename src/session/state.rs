//! Session state machine
//!
//! Pure: `transition` knows nothing about the terminal, the registry or the
//! installer. The controller performs the work for the current state and
//! feeds the resulting event back in.

/// Components waiting to be processed one at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub queue: Vec<String>,
    pub index: usize,
}

impl Batch {
    pub fn new(queue: Vec<String>) -> Self {
        Self { queue, index: 0 }
    }

    pub fn current(&self) -> Option<&str> {
        self.queue.get(self.index).map(String::as_str)
    }

    /// One-based position of the current item
    pub fn position(&self) -> usize {
        self.index + 1
    }

    pub fn total(&self) -> usize {
        self.queue.len()
    }

    fn advance(self) -> Self {
        Self {
            index: self.index + 1,
            ..self
        }
    }

    fn is_done(&self) -> bool {
        self.index >= self.queue.len()
    }
}

/// What the session does once loading is complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Confirm(Vec<String>),
    Install(Vec<String>),
    Diff,
    Listing,
    Summary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Confirming(Batch),
    Installing(Batch),
    Results,
    Diff,
    Listing,
    Summary,
    Failed { message: String },
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            SessionState::Loading | SessionState::Confirming(_) | SessionState::Installing(_)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Loading => "loading",
            SessionState::Confirming(_) => "confirming",
            SessionState::Installing(_) => "installing",
            SessionState::Results => "results",
            SessionState::Diff => "diff",
            SessionState::Listing => "listing",
            SessionState::Summary => "summary",
            SessionState::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Loaded(Plan),
    LoadFailed(String),
    /// The current batch item was installed, skipped or declined
    ItemProcessed,
}

/// Compute the next state. Events that do not apply leave the state unchanged.
pub fn transition(state: SessionState, event: Event) -> SessionState {
    match (state, event) {
        (SessionState::Loading, Event::Loaded(plan)) => match plan {
            Plan::Confirm(queue) => batch_or_results(queue, SessionState::Confirming),
            Plan::Install(queue) => batch_or_results(queue, SessionState::Installing),
            Plan::Diff => SessionState::Diff,
            Plan::Listing => SessionState::Listing,
            Plan::Summary => SessionState::Summary,
        },
        (SessionState::Loading, Event::LoadFailed(message)) => SessionState::Failed { message },
        (SessionState::Confirming(batch), Event::ItemProcessed) => {
            advance(batch, SessionState::Confirming)
        }
        (SessionState::Installing(batch), Event::ItemProcessed) => {
            advance(batch, SessionState::Installing)
        }
        (state, _) => state,
    }
}

fn batch_or_results(queue: Vec<String>, wrap: fn(Batch) -> SessionState) -> SessionState {
    if queue.is_empty() {
        SessionState::Results
    } else {
        wrap(Batch::new(queue))
    }
}

fn advance(batch: Batch, wrap: fn(Batch) -> SessionState) -> SessionState {
    let next = batch.advance();
    if next.is_done() {
        SessionState::Results
    } else {
        wrap(next)
    }
}
