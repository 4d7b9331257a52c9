//! # Roundtable Engine
//!
//! Runs sweep chains: every participant speaks once per sweep, in roster
//! order, each seeing the full transcript so far. With auto-continue on, a
//! continuation prompt is appended after each sweep and another sweep
//! starts, until a stop is requested.
//!
//! Stops are cooperative. The cancellation token is sampled before each
//! participant's turn and before a follow-up sweep; an in-flight provider
//! call and the reading pause after a delivered turn always run to the end.

use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::events::{PresentationSink, RoundtableEvent};
use super::pacing::Pacing;
use crate::core::{attribute, is_blank, normalize_reply, preview, FAILURE_NOTICE, PREVIEW_LIMIT};
use crate::features::history::{ConversationHistory, Turn, RESET_MARKER};
use crate::features::participants::ParticipantRegistry;
use crate::features::providers::ResponseProvider;
use crate::features::topics;

/// Synthetic user turn that bridges auto-continue sweeps
pub const CONTINUATION_PROMPT: &str = "Continue the discussion and debate each other's points.";

/// Transcript notice emitted when a stop is requested
pub const STOP_NOTICE: &str = "Auto-Pilot stopped by user.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// A sweep chain is already running
    Busy,
    /// Nothing left after trimming
    EmptyMessage,
}

/// What a finished sweep chain did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainSummary {
    pub sweeps: usize,
    pub delivered: usize,
    pub failed: usize,
    /// The chain ended because a stop was requested
    pub stopped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Rejected(RejectReason),
    Completed(ChainSummary),
}

pub struct Roundtable {
    registry: Arc<ParticipantRegistry>,
    provider: Arc<dyn ResponseProvider>,
    sink: Arc<dyn PresentationSink>,
    pacing: Pacing,
    history: RwLock<ConversationHistory>,
    generating: AtomicBool,
    auto_continue: AtomicBool,
    /// Token of the current (or most recent) chain. Replaced on each accepted submission.
    cancel: Mutex<CancellationToken>,
}

/// Terminal cleanup for a sweep chain, run on every exit path
struct GenerationGuard<'a> {
    roundtable: &'a Roundtable,
    chain_id: Uuid,
}

impl Drop for GenerationGuard<'_> {
    fn drop(&mut self) {
        self.roundtable.generating.store(false, Ordering::SeqCst);
        self.roundtable.sink.emit(RoundtableEvent::GenerationFinished);
        debug!("[{}] Generation lock released", self.chain_id);
    }
}

impl Roundtable {
    pub fn new(
        registry: Arc<ParticipantRegistry>,
        provider: Arc<dyn ResponseProvider>,
        sink: Arc<dyn PresentationSink>,
        pacing: Pacing,
    ) -> Self {
        Self {
            registry,
            provider,
            sink,
            pacing,
            history: RwLock::new(ConversationHistory::new()),
            generating: AtomicBool::new(false),
            auto_continue: AtomicBool::new(false),
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    fn read_history(&self) -> RwLockReadGuard<'_, ConversationHistory> {
        self.history.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_history(&self) -> RwLockWriteGuard<'_, ConversationHistory> {
        self.history.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_cancel(&self) -> MutexGuard<'_, CancellationToken> {
        self.cancel.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn registry(&self) -> &ParticipantRegistry {
        &self.registry
    }

    pub fn history_snapshot(&self) -> Vec<Turn> {
        self.read_history().snapshot()
    }

    pub fn history_len(&self) -> usize {
        self.read_history().len()
    }

    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::SeqCst)
    }

    /// Stays set after the chain ends, until the next accepted submission
    pub fn is_stop_requested(&self) -> bool {
        self.lock_cancel().is_cancelled()
    }

    pub fn auto_continue(&self) -> bool {
        self.auto_continue.load(Ordering::SeqCst)
    }

    pub fn set_auto_continue(&self, enabled: bool) {
        self.auto_continue.store(enabled, Ordering::SeqCst);
        info!("Auto-continue {}", if enabled { "enabled" } else { "disabled" });

        if self.is_generating() {
            self.sink
                .emit(RoundtableEvent::StopVisibilityChanged { visible: enabled });
        }
    }

    /// Ask the running chain to stop before the next participant's turn.
    ///
    /// Also turns auto-continue off. Returns `false` (and does nothing) when idle.
    pub fn request_stop(&self) -> bool {
        {
            let token = self.lock_cancel();
            if !self.is_generating() {
                debug!("Stop requested while idle, ignoring");
                return false;
            }
            if token.is_cancelled() {
                return true;
            }
            token.cancel();
        }

        self.auto_continue.store(false, Ordering::SeqCst);
        info!("⏹️ Stop requested, no new turns will start");
        self.sink
            .emit(RoundtableEvent::StopVisibilityChanged { visible: false });
        self.sink.emit(RoundtableEvent::SystemNotice {
            text: STOP_NOTICE.to_string(),
        });
        true
    }

    /// Clear the transcript down to the reset marker. Refused while a chain runs.
    pub fn reset(&self) -> bool {
        let _token = self.lock_cancel();
        if self.is_generating() {
            warn!("Reset refused while the roundtable is generating");
            return false;
        }

        let previous = {
            let mut history = self.write_history();
            let previous = history.len();
            history.reset();
            previous
        };
        info!("🧹 History reset ({previous} turns cleared)");
        self.sink.emit(RoundtableEvent::Cleared {
            marker: RESET_MARKER.to_string(),
        });
        true
    }

    /// Submit one of the canned topics
    pub async fn submit_random_topic(&self) -> Submission {
        if self.is_generating() {
            return Submission::Rejected(RejectReason::Busy);
        }
        let topic = topics::pick_random();
        info!("🎲 Random topic: {topic}");
        self.submit_user_message(topic).await
    }

    /// Append the user's message and run a sweep chain to completion.
    ///
    /// Rejected without side effects when the trimmed content is empty or a
    /// chain is already running. Never queues.
    pub async fn submit_user_message(&self, content: &str) -> Submission {
        let content = content.trim();
        if content.is_empty() {
            debug!("Ignoring empty submission");
            return Submission::Rejected(RejectReason::EmptyMessage);
        }

        let token = {
            let mut current = self.lock_cancel();
            if self
                .generating
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
            {
                warn!("Roundtable is busy, rejecting submission");
                return Submission::Rejected(RejectReason::Busy);
            }
            *current = CancellationToken::new();
            current.clone()
        };

        let chain_id = Uuid::new_v4();
        let _guard = GenerationGuard {
            roundtable: self,
            chain_id,
        };

        info!(
            "[{chain_id}] 🎙️ Roundtable convened | Participants: {} | Auto-continue: {} | Provider: {} | Topic: '{}'",
            self.registry.len(),
            self.auto_continue(),
            self.provider.name(),
            preview(content, PREVIEW_LIMIT)
        );

        self.sink.emit(RoundtableEvent::GenerationStarted {
            stop_visible: self.auto_continue(),
        });
        self.write_history().append(Turn::user(content));
        self.sink.emit(RoundtableEvent::UserMessageAppended {
            content: content.to_string(),
        });

        let summary = self.run_chain(chain_id, &token).await;

        info!(
            "[{chain_id}] ✅ Roundtable adjourned | Sweeps: {} | Delivered: {} | Failed: {} | Stopped: {}",
            summary.sweeps, summary.delivered, summary.failed, summary.stopped
        );
        Submission::Completed(summary)
    }

    async fn run_chain(&self, chain_id: Uuid, token: &CancellationToken) -> ChainSummary {
        let mut summary = ChainSummary::default();

        loop {
            summary.sweeps += 1;
            self.run_sweep(chain_id, summary.sweeps, token, &mut summary)
                .await;

            if token.is_cancelled() || !self.auto_continue() {
                break;
            }

            // Let the last reply linger before the next round
            sleep(self.pacing.between_sweeps()).await;
            if token.is_cancelled() || !self.auto_continue() {
                break;
            }

            self.write_history().append(Turn::user(CONTINUATION_PROMPT));
            debug!("[{chain_id}] Continuation prompt appended");
        }

        summary.stopped = token.is_cancelled();
        summary
    }

    async fn run_sweep(
        &self,
        chain_id: Uuid,
        sweep: usize,
        token: &CancellationToken,
        summary: &mut ChainSummary,
    ) {
        info!("[{chain_id}] 🔄 Sweep {sweep} starting");
        self.sink.emit(RoundtableEvent::SweepStarted { sweep });

        for participant in self.registry.list() {
            if token.is_cancelled() {
                info!(
                    "[{chain_id}] ⏹️ Sweep {sweep} stopped before {}",
                    participant.display_name
                );
                return;
            }

            self.sink.emit(RoundtableEvent::TypingStarted {
                participant_id: participant.id.clone(),
                display_name: participant.display_name.clone(),
            });

            let snapshot = self.history_snapshot();
            debug!(
                "[{chain_id}] {} is thinking | History: {} turns",
                participant.display_name,
                snapshot.len()
            );

            let pause = match self.provider.generate(&participant.id, &snapshot).await {
                Ok(reply) => {
                    if is_blank(&reply) {
                        warn!(
                            "[{chain_id}] Empty response from {}, using fallback",
                            participant.display_name
                        );
                    }
                    let text = normalize_reply(&reply);

                    self.write_history().append(Turn::participant(
                        participant.id.clone(),
                        attribute(&participant.display_name, &text),
                    ));
                    debug!(
                        "[{chain_id}] 💬 {}: '{}'",
                        participant.display_name,
                        preview(&text, PREVIEW_LIMIT)
                    );
                    self.sink.emit(RoundtableEvent::MessageDelivered {
                        participant_id: participant.id.clone(),
                        display_name: participant.display_name.clone(),
                        text: text.clone(),
                    });
                    summary.delivered += 1;
                    self.pacing.reading_time(&text)
                }
                Err(e) => {
                    error!(
                        "[{chain_id}] Error from {} via {} provider: {e}",
                        participant.display_name,
                        self.provider.name()
                    );
                    self.sink.emit(RoundtableEvent::TurnFailed {
                        participant_id: participant.id.clone(),
                        display_name: participant.display_name.clone(),
                        message: FAILURE_NOTICE.to_string(),
                    });
                    summary.failed += 1;
                    self.pacing.after_failure()
                }
            };

            self.sink.emit(RoundtableEvent::TypingStopped {
                participant_id: participant.id.clone(),
            });

            // Not cancellable: a delivered turn gets its reading time
            sleep(pause).await;
        }
    }
}
