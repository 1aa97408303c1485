//! Scanner orchestrating registry probes and classification.

use crate::classify::{self, Classifier, EngineConfig};
use crate::config::NpmConfig;
use crate::notify::ConsoleOutput;
use crate::registry::{PresenceOracle, RegistryProbe};
use crate::types::{ClassificationResult, Dependency, PresenceResult, Result};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Results of one scan, keyed by dependency name.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub results: HashMap<String, ClassificationResult>,
    pub duration_secs: f64,
}

/// Checks every dependency against the configured registries.
pub struct Scanner {
    classifier: Classifier,
    oracle: Arc<dyn PresenceOracle>,
    concurrency: usize,
    console: ConsoleOutput,
}

impl Scanner {
    /// Create a scanner backed by the HTTP registry probe.
    pub fn new(config: &NpmConfig, verbose: bool) -> Result<Self> {
        let probe = RegistryProbe::new(&config.http_config())?;

        Ok(
            Self::with_oracle(config.engine_config(), Arc::new(probe), config.concurrency)
                .with_console(ConsoleOutput::new(verbose, config.quiet)),
        )
    }

    /// Create a scanner with a custom presence oracle.
    pub fn with_oracle(engine: EngineConfig, oracle: Arc<dyn PresenceOracle>, concurrency: usize) -> Self {
        Self {
            classifier: Classifier::new(engine),
            oracle,
            concurrency: concurrency.max(1),
            console: ConsoleOutput::new(false, true),
        }
    }

    pub fn with_console(mut self, console: ConsoleOutput) -> Self {
        self.console = console;
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Probe and classify a single dependency.
    pub async fn check_dependency(&self, dep: &Dependency) -> ClassificationResult {
        check_dependency(&self.classifier, self.oracle.as_ref(), dep).await
    }

    /// Check all dependencies with bounded concurrency.
    ///
    /// A failure in one dependency's task yields an `unknown` result for that
    /// dependency only.
    pub async fn scan(&self, deps: &[Dependency]) -> ScanOutcome {
        let start_time = Instant::now();
        let config = self.classifier.config();

        match config.private_registry() {
            Some(private) => info!(
                "Checking {} dependencies against {} and {}",
                deps.len(),
                private,
                config.public_registry
            ),
            None => info!(
                "Checking {} dependencies against {} (no private registry)",
                deps.len(),
                config.public_registry
            ),
        }
        if !config.private_scope.is_empty() {
            self.console
                .print_info(&format!("Using private scope: {}", config.private_scope));
        }

        let pb = self
            .console
            .create_progress_bar(deps.len() as u64, "Checking registries");

        let checked: Vec<(Dependency, ClassificationResult)> = stream::iter(deps.iter().cloned())
            .map(|dep| {
                let classifier = self.classifier.clone();
                let oracle = Arc::clone(&self.oracle);
                let task_dep = dep.clone();
                let handle = tokio::spawn(async move {
                    check_dependency(&classifier, oracle.as_ref(), &task_dep).await
                });

                async move {
                    let result = match handle.await {
                        Ok(result) => result,
                        Err(e) => {
                            warn!("Check for {} failed: {}", dep.name, e);
                            classify::unknown(&dep, &e.to_string())
                        }
                    };
                    (dep, result)
                }
            })
            .buffer_unordered(self.concurrency)
            .inspect(|_| {
                if let Some(ref pb) = pb {
                    pb.inc(1);
                }
            })
            .collect()
            .await;

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        let results: HashMap<String, ClassificationResult> = checked
            .into_iter()
            .map(|(dep, result)| (dep.name, result))
            .collect();

        let duration_secs = start_time.elapsed().as_secs_f64();
        debug!("Classified {} dependencies in {:.2}s", results.len(), duration_secs);
        self.console
            .print_progress(&format!("Checked {} dependencies", results.len()));

        ScanOutcome {
            results,
            duration_secs,
        }
    }
}

/// Probe both registries concurrently, then classify.
async fn check_dependency(
    classifier: &Classifier,
    oracle: &dyn PresenceOracle,
    dep: &Dependency,
) -> ClassificationResult {
    let config = classifier.config();

    let private_probe = async {
        match config.private_registry() {
            Some(url) => oracle.probe(&dep.name, url).await,
            None => PresenceResult::absent(),
        }
    };
    let public_probe = oracle.probe(&dep.name, &config.public_registry);

    let (private_info, public_info) = tokio::join!(private_probe, public_probe);
    debug!(
        "{}: private={:?} public={:?}",
        dep.name, private_info, public_info
    );

    classifier.evaluate(dep, &private_info, &public_info)
}
