//! Session controller
//!
//! Sequences registry fetch, local scan, reconciliation and verification,
//! then drives installs or diffs for the selected [`Mode`]. Each step is
//! driven by [`state::transition`]; this module only performs the work the
//! current state asks for and hands back a [`SessionReport`] to render.

pub mod log;
pub mod state;

pub use log::InstallLog;
pub use state::{Batch, Event, Plan, SessionState, transition};

use std::path::PathBuf;

use tracing::{debug, info};

use crate::cli::Mode;
use crate::config::Config;
use crate::diff::{DiffRecord, diff_component};
use crate::error::{Result, SyncError, component_not_found};
use crate::installer::{CommandRunner, Installer, UpdateOutcome};
use crate::inventory::{self, LocalComponentNames};
use crate::reconcile::{ExistenceVerifier, Partition, Reconciliation, partition};
use crate::registry::{CategoryCounts, RegistryManifest, RegistrySource};
use crate::ui::{Confirmer, ProgressReporter};

/// Registry totals against what exists locally
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReport {
    pub registry_url: String,
    pub registry: CategoryCounts,
    pub installed: CategoryCounts,
    /// Names with no verbatim local match; not verified with the installer
    pub not_found: Vec<String>,
}

impl SummaryReport {
    pub fn not_found_counts(&self) -> CategoryCounts {
        CategoryCounts::tally(&self.not_found)
    }
}

/// One line of the `--add-all` dry run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub installed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffReport {
    pub component: String,
    pub project_root: PathBuf,
    pub records: Vec<DiffRecord>,
}

/// What a finished session has to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionReport {
    Summary(SummaryReport),
    Listing(Vec<ListingEntry>),
    Results(InstallLog),
    Diff(DiffReport),
}

/// Registry and local data gathered while loading
#[derive(Debug, Default)]
struct Loaded {
    registry_names: Vec<String>,
    local_names: LocalComponentNames,
    partition: Partition,
    diff: Option<DiffReport>,
}

/// One user invocation, from loading to a terminal state
pub struct Session<'a> {
    mode: Mode,
    config: &'a Config,
    registry: &'a dyn RegistrySource,
    runner: &'a dyn CommandRunner,
    confirmer: &'a mut dyn Confirmer,
    progress: &'a mut dyn ProgressReporter,
    loaded: Loaded,
    log: InstallLog,
    error: Option<SyncError>,
}

impl<'a> Session<'a> {
    pub fn new(
        mode: Mode,
        config: &'a Config,
        registry: &'a dyn RegistrySource,
        runner: &'a dyn CommandRunner,
        confirmer: &'a mut dyn Confirmer,
        progress: &'a mut dyn ProgressReporter,
    ) -> Self {
        Self {
            mode,
            config,
            registry,
            runner,
            confirmer,
            progress,
            loaded: Loaded::default(),
            log: InstallLog::default(),
            error: None,
        }
    }

    /// Run until a terminal state is reached
    pub fn run(mut self) -> Result<SessionReport> {
        let mut state = SessionState::Loading;

        while !state.is_terminal() {
            info!(state = state.name(), "session state");
            let event = match &state {
                SessionState::Loading => self.load_event(),
                SessionState::Confirming(batch) => self.confirm_item(batch)?,
                SessionState::Installing(batch) => self.install_item(batch, true),
                _ => break,
            };
            state = transition(state, event);
        }

        info!(state = state.name(), "session finished");
        self.report(state)
    }

    fn load_event(&mut self) -> Event {
        let result = self.load();
        self.progress.finish_loading();
        match result {
            Ok(plan) => {
                if let Plan::Install(ref queue) = plan {
                    self.progress.start_batch(queue.len());
                }
                Event::Loaded(plan)
            }
            Err(e) => {
                self.progress.abandon();
                let message = e.to_string();
                self.error = Some(e);
                Event::LoadFailed(message)
            }
        }
    }

    fn load(&mut self) -> Result<Plan> {
        if let Mode::Diff { name } = &self.mode {
            let name = name.clone();
            return self.load_diff(&name);
        }

        let (manifest, local_names) = self.fetch_and_scan()?;
        let registry_names = manifest.component_names();
        let partition = partition(&registry_names, &local_names);
        debug!(
            registry = registry_names.len(),
            exact = partition.exact.len(),
            mismatched = partition.mismatched.len(),
            "names reconciled"
        );
        self.loaded = Loaded {
            registry_names,
            local_names,
            partition,
            diff: None,
        };

        let mode = self.mode.clone();
        let plan = match mode {
            Mode::Summary => Plan::Summary,
            Mode::AddAllDryRun => Plan::Listing,
            Mode::AddAll => Plan::Install(self.loaded.registry_names.clone()),
            Mode::AddMissing => Plan::Install(self.verify_mismatches()),
            Mode::Single { name, force } => {
                if !self.loaded.registry_names.contains(&name) {
                    return Err(component_not_found(&name, 404));
                }
                if force {
                    Plan::Install(vec![name])
                } else {
                    Plan::Confirm(vec![name])
                }
            }
            Mode::Diff { .. } => Plan::Diff,
        };
        Ok(plan)
    }

    /// Fetch the manifest while the local scan runs
    fn fetch_and_scan(&mut self) -> Result<(RegistryManifest, LocalComponentNames)> {
        self.progress.loading("Fetching registry and scanning local components...");
        let registry = self.registry;
        let config = self.config;

        let (manifest, local_names) = std::thread::scope(|scope| {
            let fetch = scope.spawn(|| registry.fetch_manifest());
            let local_names = inventory::scan(config);
            (fetch.join(), local_names)
        });

        let manifest = manifest.map_err(|_| SyncError::IoError {
            message: "registry fetch thread panicked".to_string(),
        })??;
        Ok((manifest, local_names))
    }

    /// Names judged missing after checking every mismatch, in registry order
    fn verify_mismatches(&mut self) -> Vec<String> {
        let verifier = ExistenceVerifier::new(self.config, self.runner);
        let registry = self.registry;
        let total = self.loaded.partition.mismatched.len();
        let progress = &mut *self.progress;
        let mut checked = 0;

        let reconciliation = Reconciliation::verify(self.loaded.partition.clone(), |name| {
            checked += 1;
            progress.loading(&format!("Verifying {name} ({checked}/{total})..."));
            verifier.is_missing(name, &registry.component_url(name))
        });

        debug!(
            missing = reconciliation.verified_missing.len(),
            installed_elsewhere = reconciliation.installed_elsewhere.len(),
            "mismatches verified"
        );
        reconciliation.verified_missing
    }

    fn load_diff(&mut self, name: &str) -> Result<Plan> {
        self.progress.loading(&format!("Fetching {name}..."));
        let details = self.registry.fetch_component(name)?;
        let records = diff_component(&self.config.project_root, &details)?;
        self.loaded.diff = Some(DiffReport {
            component: name.to_string(),
            project_root: self.config.project_root.clone(),
            records,
        });
        Ok(Plan::Diff)
    }

    fn confirm_item(&mut self, batch: &Batch) -> Result<Event> {
        let Some(name) = batch.current() else {
            return Ok(Event::ItemProcessed);
        };

        let installed = self.loaded.local_names.contains(name);
        if self.confirmer.confirm(name, installed)? {
            let outcome = self.installer().install(name, &self.registry.component_url(name), false);
            self.log.append(name, outcome);
        } else {
            debug!(name, "declined");
            self.log.append(name, UpdateOutcome::Skipped);
        }
        Ok(Event::ItemProcessed)
    }

    fn install_item(&mut self, batch: &Batch, force: bool) -> Event {
        let Some(name) = batch.current() else {
            return Event::ItemProcessed;
        };

        self.progress.batch_item(name, batch.position(), batch.total());
        let outcome = self.installer().install(name, &self.registry.component_url(name), force);
        self.log.append(name, outcome);
        self.progress.inc_batch();

        if batch.position() == batch.total() {
            self.progress.finish_batch();
        }
        Event::ItemProcessed
    }

    fn installer(&self) -> Installer<'a> {
        Installer::new(self.config, self.runner)
    }

    fn report(mut self, state: SessionState) -> Result<SessionReport> {
        match state {
            SessionState::Failed { message } => Err(self
                .error
                .take()
                .unwrap_or(SyncError::IoError { message })),
            SessionState::Summary => Ok(SessionReport::Summary(self.summary())),
            SessionState::Listing => Ok(SessionReport::Listing(self.listing())),
            SessionState::Diff => match self.loaded.diff.take() {
                Some(diff) => Ok(SessionReport::Diff(diff)),
                None => Err(SyncError::IoError {
                    message: "diff state reached without a diff".to_string(),
                }),
            },
            _ => Ok(SessionReport::Results(self.log)),
        }
    }

    fn summary(&self) -> SummaryReport {
        SummaryReport {
            registry_url: self.config.registry_url.clone(),
            registry: CategoryCounts::tally(&self.loaded.registry_names),
            installed: CategoryCounts::tally(&self.loaded.partition.exact),
            not_found: self.loaded.partition.mismatched.clone(),
        }
    }

    fn listing(&self) -> Vec<ListingEntry> {
        self.loaded
            .registry_names
            .iter()
            .map(|name| ListingEntry {
                name: name.clone(),
                installed: self.loaded.local_names.contains(name),
            })
            .collect()
    }
}
