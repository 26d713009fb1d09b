//! `/admin/broadcast`: an announcement to every known customer.
//!
//! The app only routes here when the session's admin flag is set. That flag is a UI
//! convenience; the backend decides whether the sender may broadcast.
use crate::model::{BroadcastMessage, BroadcastReport};
use crate::router::Route;
use crate::screens::view::{BroadcastView, Offer};
use crate::screens::{
    Completion, Screen, ScreenContext, Submission, SubmissionStatus, Transition, UiAction, View,
};
use crate::state::{AppState, StoreError};
use async_trait::async_trait;
use session_actor::StateHandle;
use tracing::{debug, info};

#[derive(Default)]
pub struct BroadcastScreen {
    text: String,
    submission: Submission<BroadcastReport>,
    validation_error: Option<String>,
}

#[async_trait]
impl Screen for BroadcastScreen {
    fn route(&self) -> Route {
        Route::Broadcast
    }

    async fn enter(&mut self, _ctx: &ScreenContext) -> Result<(), StoreError> {
        Ok(())
    }

    async fn handle(
        &mut self,
        action: UiAction,
        ctx: &ScreenContext,
    ) -> Result<Transition, StoreError> {
        match action {
            UiAction::EditMessage(text) => {
                if self.submission.can_submit() {
                    self.text = text;
                    self.validation_error = None;
                    self.submission.edit();
                }
            }
            UiAction::Submit => {
                if !self.submission.can_submit() {
                    debug!(status = ?self.submission.status(), "Submit ignored");
                    return Ok(Transition::Stay);
                }
                if self.text.trim().is_empty() {
                    self.validation_error = Some("Please enter a message".to_string());
                    return Ok(Transition::Stay);
                }

                let state = ctx.store.snapshot().await?;
                let message = BroadcastMessage {
                    message: self.text.trim().to_string(),
                    sender_telegram_id: state.identity.map(|identity| identity.id),
                };

                self.submission.begin();
                let api = ctx.api.clone();
                ctx.spawn(async move {
                    Completion::BroadcastSent(api.broadcast_message(&message).await)
                });
            }
            UiAction::SendAnother => {
                if self.submission.succeeded().is_some() {
                    self.text.clear();
                    self.submission.reset();
                }
            }
            UiAction::GoHome => return Ok(Transition::Navigate(Route::Home)),
            _ => {}
        }
        Ok(Transition::Stay)
    }

    async fn complete(
        &mut self,
        completion: Completion,
        _ctx: &ScreenContext,
    ) -> Result<Transition, StoreError> {
        match completion {
            Completion::BroadcastSent(Ok(report)) => {
                info!(
                    total = report.total_customers,
                    delivered = report.successful_deliveries,
                    failed = report.failed_deliveries,
                    "Broadcast finished"
                );
                self.submission.succeed(report);
            }
            Completion::BroadcastSent(Err(e)) => {
                self.submission
                    .fail(format!("Failed to send the broadcast: {}", e.user_message()));
            }
            other => debug!(?other, "Ignoring unrelated completion"),
        }
        Ok(Transition::Stay)
    }

    fn back_target(&self, _state: &AppState) -> Option<Route> {
        Some(Route::Home)
    }

    fn view(&self, _state: &AppState) -> View {
        let status = self.submission.status();
        View::Broadcast(BroadcastView {
            text: self.text.clone(),
            status,
            can_submit: self.submission.can_submit() && !self.text.trim().is_empty(),
            validation_error: self.validation_error.clone(),
            error: self.submission.error().map(str::to_string),
            report: self.submission.succeeded().copied(),
            offers: if status == SubmissionStatus::Succeeded {
                vec![Offer::SendAnother, Offer::GoHome]
            } else {
                Vec::new()
            },
        })
    }
}
