use crate::api::{ApiClient, HttpTransport, Transport};
use crate::bridge::{BackButton, Host, ThemePalette};
use crate::config::AppConfig;
use crate::lifecycle::command::Command;
use crate::lifecycle::error::AppError;
use crate::lifecycle::event::AppEvent;
use crate::router::Route;
use crate::screens::{self, Screen, ScreenContext, ScreenInstance, Tasks, Transition, UiAction, View};
use crate::state::{self, AppStore};
use session_actor::StateHandle;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Shown on the home screen after a non-admin tried to open an admin route.
pub const ACCESS_NOTICE: &str = "This section is only available to the administrator.";

struct ActiveScreen {
    instance: ScreenInstance,
    screen: Box<dyn Screen>,
    ctx: ScreenContext,
}

/// The storefront runtime.
///
/// `App` is responsible for:
/// - **Wiring**: the store actor, the API client and the back-button binding
/// - **Navigation**: tearing down the active screen before the next one starts
/// - **Event Loop**: applying back presses and remote-call completions in order
///
/// # Example
///
/// ```ignore
/// let mut app = App::with_http(Host::Absent, AppConfig::from_env()?)?;
/// app.start().await?;
/// app.navigate(Route::Catalog).await?;
/// app.run_until_idle().await?;
/// println!("{}", app.view().await?);
/// app.shutdown().await?;
/// ```
pub struct App {
    host: Host,
    config: AppConfig,
    store: AppStore,
    api: ApiClient,
    back: BackButton,
    palette: ThemePalette,
    events: mpsc::UnboundedSender<AppEvent>,
    inbox: mpsc::UnboundedReceiver<AppEvent>,
    in_flight: Arc<AtomicUsize>,
    active: Option<ActiveScreen>,
    next_instance: u64,
    store_task: JoinHandle<()>,
}

impl App {
    /// Creates the app and starts the store actor. Must be called inside a Tokio runtime.
    pub fn new(host: Host, config: AppConfig, transport: Arc<dyn Transport>) -> Self {
        let (actor, client) = state::new();
        let store_task = tokio::spawn(actor.run());

        let (events, inbox) = mpsc::unbounded_channel();
        let presses = events.clone();
        let back = BackButton::new(
            host.clone(),
            Arc::new(move |binding| {
                // The loop may already be gone during shutdown.
                let _ = presses.send(AppEvent::BackPressed(binding));
            }),
        );

        Self {
            api: ApiClient::new(transport, host.init_data()),
            host,
            config,
            store: AppStore::new(client),
            back,
            palette: ThemePalette::default(),
            events,
            inbox,
            in_flight: Arc::new(AtomicUsize::new(0)),
            active: None,
            next_instance: 0,
            store_task,
        }
    }

    /// Validates `config` and talks to the backend over HTTP.
    pub fn with_http(host: Host, config: AppConfig) -> Result<Self, AppError> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::new(host, config, Arc::new(transport)))
    }

    pub async fn start(&mut self) -> Result<(), AppError> {
        self.start_at(Route::Home).await
    }

    /// Bootstraps the host, initializes the session and opens `route`.
    #[instrument(skip(self, route), fields(route = %route))]
    pub async fn start_at(&mut self, route: Route) -> Result<(), AppError> {
        self.palette = self.host.bootstrap();
        for (name, value) in self.palette.css_variables() {
            debug!(%name, %value, "Theme variable");
        }
        self.store.initialize(&self.host, &self.config).await?;
        self.navigate(route).await
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Replaces the active screen with the one for `route`.
    ///
    /// Admin routes are redirected home with [`ACCESS_NOTICE`] when the session is not
    /// flagged as admin.
    #[instrument(skip(self, route), fields(route = %route))]
    pub async fn navigate(&mut self, route: Route) -> Result<(), AppError> {
        let state = self.store.snapshot().await?;
        let (route, notice) = if route.requires_admin() && !state.is_admin {
            warn!("Admin route requested without admin flag, redirecting home");
            (Route::Home, Some(ACCESS_NOTICE.to_string()))
        } else {
            (route, None)
        };

        // Teardown of the old screen completes before the new one is built.
        if let Some(mut old) = self.active.take() {
            self.back.release();
            old.screen.exit(&route, &old.ctx).await?;
        }
        self.store.set_loading(false).await?;
        self.store.set_error(None).await?;

        self.next_instance += 1;
        let instance = ScreenInstance(self.next_instance);
        let ctx = ScreenContext::new(
            self.store.clone(),
            self.api.clone(),
            Tasks::new(instance, self.events.clone(), self.in_flight.clone()),
        );
        let mut screen = screens::build(&route, notice);
        screen.enter(&ctx).await?;
        if screen.has_back() {
            self.back.bind();
        }

        info!(instance = instance.0, "Screen entered");
        self.active = Some(ActiveScreen {
            instance,
            screen,
            ctx,
        });
        Ok(())
    }

    /// In-app back control. Returns `false` when the active screen has no parent.
    pub async fn back(&mut self) -> Result<bool, AppError> {
        let active = self.active.as_ref().ok_or(AppError::NotStarted)?;
        let state = self.store.snapshot().await?;
        match active.screen.back_target(&state) {
            Some(target) => {
                debug!(%target, "Going back");
                self.navigate(target).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delivers user input to the active screen.
    #[instrument(skip(self))]
    pub async fn dispatch(&mut self, action: UiAction) -> Result<(), AppError> {
        let active = self.active.as_mut().ok_or(AppError::NotStarted)?;
        let transition = active.screen.handle(action, &active.ctx).await?;
        self.apply(transition).await
    }

    async fn apply(&mut self, transition: Transition) -> Result<(), AppError> {
        match transition {
            Transition::Stay => Ok(()),
            Transition::Navigate(route) => self.navigate(route).await,
        }
    }

    // =========================================================================
    // Event Loop
    // =========================================================================

    async fn handle_event(&mut self, event: AppEvent) -> Result<(), AppError> {
        match event {
            AppEvent::BackPressed(binding) => {
                if self.back.is_current(binding) {
                    self.back().await?;
                } else {
                    debug!(binding = binding.0, "Back press for a released binding ignored");
                }
            }
            AppEvent::Completed {
                instance,
                completion,
            } => {
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                match self.active.as_mut() {
                    Some(active) if active.instance == instance => {
                        let transition = active.screen.complete(completion, &active.ctx).await?;
                        self.apply(transition).await?;
                    }
                    _ => debug!(instance = instance.0, "Completion for inactive screen discarded"),
                }
            }
        }
        Ok(())
    }

    /// Processes events until no remote call is in flight and nothing is queued.
    pub async fn run_until_idle(&mut self) -> Result<(), AppError> {
        loop {
            while let Ok(event) = self.inbox.try_recv() {
                self.handle_event(event).await?;
            }
            if self.in_flight.load(Ordering::SeqCst) == 0 {
                return Ok(());
            }
            match self.inbox.recv().await {
                Some(event) => self.handle_event(event).await?,
                None => return Ok(()),
            }
        }
    }

    /// Drives the app from a stream of commands until it ends or asks to quit.
    ///
    /// `render` is called with the active view after every command and every event.
    pub async fn run<F>(
        &mut self,
        mut commands: mpsc::Receiver<Command>,
        mut render: F,
    ) -> Result<(), AppError>
    where
        F: FnMut(&View),
    {
        render(&self.view().await?);
        loop {
            tokio::select! {
                command = commands.recv() => {
                    match command {
                        None | Some(Command::Quit) => break,
                        Some(command) => self.execute(command).await?,
                    }
                }
                Some(event) = self.inbox.recv() => self.handle_event(event).await?,
            }
            render(&self.view().await?);
        }
        Ok(())
    }

    pub async fn execute(&mut self, command: Command) -> Result<(), AppError> {
        match command {
            Command::Open(route) => self.navigate(route).await,
            Command::Back => {
                if !self.back().await? {
                    debug!("Nothing to go back to");
                }
                Ok(())
            }
            Command::Do(actions) => {
                for action in actions {
                    self.dispatch(action).await?;
                }
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub async fn view(&self) -> Result<View, AppError> {
        let active = self.active.as_ref().ok_or(AppError::NotStarted)?;
        let state = self.store.snapshot().await?;
        Ok(active.screen.view(&state))
    }

    pub fn route(&self) -> Option<Route> {
        self.active.as_ref().map(|active| active.screen.route())
    }

    pub fn store(&self) -> &AppStore {
        &self.store
    }

    pub fn palette(&self) -> &ThemePalette {
        &self.palette
    }

    pub fn back_bound(&self) -> bool {
        self.back.is_bound()
    }

    // =========================================================================
    // Shutdown
    // =========================================================================

    /// Releases the host affordance, closes the store and waits for its actor.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the store actor stopped cleanly
    /// - `Err(AppError::ShutdownFailed)` if its task panicked
    pub async fn shutdown(self) -> Result<(), AppError> {
        info!("Shutting down app...");
        let App {
            mut back,
            store,
            active,
            store_task,
            ..
        } = self;

        back.release();
        // Every store handle must be gone before the actor sees its channel close.
        drop(active);
        drop(store);

        if let Err(e) = store_task.await {
            error!("Store task failed: {:?}", e);
            return Err(AppError::ShutdownFailed(format!("{e:?}")));
        }
        info!("App shutdown complete.");
        Ok(())
    }
}
