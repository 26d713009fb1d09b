//! `/message-admin`: a free-text note to the bakery.
use crate::model::{AdminMessage, ANONYMOUS_CUSTOMER};
use crate::router::Route;
use crate::screens::view::{MessageView, Offer};
use crate::screens::{
    Completion, Screen, ScreenContext, Submission, SubmissionStatus, Transition, UiAction, View,
};
use crate::state::{AppState, StoreError};
use async_trait::async_trait;
use session_actor::StateHandle;
use tracing::{debug, info};

#[derive(Default)]
pub struct MessageAdminScreen {
    text: String,
    submission: Submission<()>,
    validation_error: Option<String>,
}

#[async_trait]
impl Screen for MessageAdminScreen {
    fn route(&self) -> Route {
        Route::MessageAdmin
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
                let (customer_name, telegram_username) = match &state.identity {
                    Some(identity) => (identity.full_name.clone(), identity.username.clone()),
                    None => (ANONYMOUS_CUSTOMER.to_string(), String::new()),
                };
                let message = AdminMessage {
                    customer_name,
                    telegram_username,
                    message: self.text.trim().to_string(),
                };

                self.submission.begin();
                let api = ctx.api.clone();
                ctx.spawn(async move {
                    Completion::MessageSent(api.send_message_to_admin(&message).await)
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
            Completion::MessageSent(Ok(())) => {
                if self.submission.succeed(()) {
                    info!("Message to admin sent");
                }
            }
            Completion::MessageSent(Err(e)) => {
                self.submission.fail(e.user_message());
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
        View::MessageAdmin(MessageView {
            text: self.text.clone(),
            status,
            can_submit: self.submission.can_submit() && !self.text.trim().is_empty(),
            validation_error: self.validation_error.clone(),
            error: self.submission.error().map(str::to_string),
            offers: if status == SubmissionStatus::Succeeded {
                vec![Offer::SendAnother, Offer::GoHome]
            } else {
                Vec::new()
            },
        })
    }
}
