use crate::domain::models::{Diagnostic, DiagnosticKind, IngestReport, Progress, Severity};
use crate::portal::{Credentials, DocumentSource, FetchResult};
use crate::services::extract::extract_rows;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Receives per-document progress and diagnostics while the loop runs.
pub trait IngestObserver {
    fn on_progress(&mut self, _progress: Progress) {}
    fn on_diagnostic(&mut self, _diagnostic: &Diagnostic) {}
}

pub struct SilentObserver;

impl IngestObserver for SilentObserver {}

/// Checked between documents; a request already in flight is not interrupted.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Debug, Default)]
pub struct IngestOptions {
    /// Outbound pacing applied after every answered request.
    pub delay: Duration,
    pub cancel: CancelToken,
}

pub fn ingest(
    ids: &[String],
    credentials: &Credentials,
    source: &dyn DocumentSource,
    options: &IngestOptions,
    observer: &mut dyn IngestObserver,
) -> IngestReport {
    let total = ids.len();
    let mut report = IngestReport {
        total,
        ..IngestReport::default()
    };

    for (idx, id) in ids.iter().enumerate() {
        if options.cancel.is_cancelled() {
            tracing::warn!(processed = idx, total, "ingestion cancelled");
            report.cancelled = true;
            break;
        }

        let answered = match source.fetch(id, credentials) {
            FetchResult::Success(payload) => {
                match extract_rows(id, &payload) {
                    Ok(rows) => {
                        tracing::debug!(document_id = %id, rows = rows.len(), "document extracted");
                        report.rows.extend(rows);
                    }
                    Err(e) => report_diagnostic(
                        &mut report,
                        observer,
                        Diagnostic {
                            document_id: id.clone(),
                            severity: Severity::Error,
                            kind: DiagnosticKind::MalformedItem,
                            message: format!("malformed payload for document {}: {}", id, e),
                        },
                    ),
                }
                true
            }
            FetchResult::EmptyData => {
                report_diagnostic(
                    &mut report,
                    observer,
                    Diagnostic {
                        document_id: id.clone(),
                        severity: Severity::Warning,
                        kind: DiagnosticKind::EmptyData,
                        message: format!("no data for document {}", id),
                    },
                );
                true
            }
            FetchResult::DecodeError { message } => {
                report_diagnostic(
                    &mut report,
                    observer,
                    Diagnostic {
                        document_id: id.clone(),
                        severity: Severity::Warning,
                        kind: DiagnosticKind::Decode,
                        message: format!("could not decode document {}: {}", id, message),
                    },
                );
                false
            }
            FetchResult::HttpError { status, message } => {
                let status = status
                    .map(|s| format!(" (HTTP {})", s))
                    .unwrap_or_default();
                report_diagnostic(
                    &mut report,
                    observer,
                    Diagnostic {
                        document_id: id.clone(),
                        severity: Severity::Error,
                        kind: DiagnosticKind::Http,
                        message: format!("error fetching document {}{}: {}", id, status, message),
                    },
                );
                false
            }
        };

        report.processed = idx + 1;
        observer.on_progress(Progress {
            processed: report.processed,
            total,
            fraction: report.processed as f64 / total as f64,
        });

        if answered && report.processed < total && !options.delay.is_zero() {
            pause(options.delay, &options.cancel);
        }
    }

    tracing::info!(
        processed = report.processed,
        total,
        rows = report.rows.len(),
        diagnostics = report.diagnostics.len(),
        "ingestion finished"
    );
    report
}

const PAUSE_SLICE: Duration = Duration::from_millis(50);

/// Sleeps for `delay`, returning early once `cancel` is set.
fn pause(delay: Duration, cancel: &CancelToken) {
    let deadline = Instant::now() + delay;
    while !cancel.is_cancelled() {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        std::thread::sleep(PAUSE_SLICE.min(deadline - now));
    }
}

fn report_diagnostic(
    report: &mut IngestReport,
    observer: &mut dyn IngestObserver,
    diagnostic: Diagnostic,
) {
    match diagnostic.severity {
        Severity::Warning => tracing::warn!(document_id = %diagnostic.document_id, "{}", diagnostic.message),
        Severity::Error => tracing::error!(document_id = %diagnostic.document_id, "{}", diagnostic.message),
    }
    observer.on_diagnostic(&diagnostic);
    report.diagnostics.push(diagnostic);
}
