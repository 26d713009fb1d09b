use crate::router::Route;
use crate::screens::{Screen, ScreenContext, Transition, UiAction, View};
use crate::screens::view::HomeView;
use crate::state::{AppState, StoreError};
use async_trait::async_trait;

pub struct HomeScreen {
    notice: Option<String>,
}

impl HomeScreen {
    pub fn new(notice: Option<String>) -> Self {
        Self { notice }
    }
}

#[async_trait]
impl Screen for HomeScreen {
    fn route(&self) -> Route {
        Route::Home
    }

    fn has_back(&self) -> bool {
        false
    }

    async fn enter(&mut self, _ctx: &ScreenContext) -> Result<(), StoreError> {
        Ok(())
    }

    async fn handle(
        &mut self,
        action: UiAction,
        _ctx: &ScreenContext,
    ) -> Result<Transition, StoreError> {
        Ok(match action {
            UiAction::ContinueShopping => Transition::Navigate(Route::Catalog),
            _ => Transition::Stay,
        })
    }

    fn back_target(&self, _state: &AppState) -> Option<Route> {
        None
    }

    fn view(&self, state: &AppState) -> View {
        let greeting = match &state.identity {
            Some(identity) => format!("Hello, {}! Welcome to our bakery.", identity.first_name),
            None => "Welcome to our bakery!".to_string(),
        };
        let mut entries = vec![Route::Catalog, Route::About, Route::MessageAdmin];
        if state.is_admin {
            entries.push(Route::Broadcast);
        }
        View::Home(HomeView {
            greeting,
            entries,
            notice: self.notice.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HostUser, Identity};

    fn view_for(state: &AppState) -> HomeView {
        match HomeScreen::new(None).view(state) {
            View::Home(home) => home,
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_broadcast_entry_only_for_admin() {
        let mut state = AppState::default();
        assert!(!view_for(&state).entries.contains(&Route::Broadcast));

        state.is_admin = true;
        assert!(view_for(&state).entries.contains(&Route::Broadcast));
    }

    #[test]
    fn test_greets_by_first_name() {
        let mut state = AppState::default();
        state.identity = Some(Identity::from(HostUser {
            id: 1,
            first_name: "Anna".into(),
            last_name: Some("Petrova".into()),
            username: None,
            language_code: None,
        }));
        assert!(view_for(&state).greeting.starts_with("Hello, Anna!"));
        assert_eq!(view_for(&AppState::default()).greeting, "Welcome to our bakery!");
    }
}
