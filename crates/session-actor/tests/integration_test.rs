use async_trait::async_trait;
use session_actor::{FrameworkError, SessionState, StateActor, StateClient, StateHandle};

// --- Test State ---

#[derive(Clone, Debug, Default, PartialEq)]
struct Profile {
    name: String,
    visits: u32,
    frozen: bool,
}

#[derive(Debug)]
enum ProfileMutation {
    Rename(String),
    Visit,
    Freeze,
}

#[derive(Debug, thiserror::Error)]
#[error("profile is frozen")]
struct ProfileFrozen;

impl SessionState for Profile {
    type Mutation = ProfileMutation;
    type Outcome = u32;
    type Error = ProfileFrozen;

    fn apply(&mut self, mutation: ProfileMutation) -> Result<u32, ProfileFrozen> {
        if self.frozen {
            return Err(ProfileFrozen);
        }
        match mutation {
            ProfileMutation::Rename(name) => self.name = name,
            ProfileMutation::Visit => self.visits += 1,
            ProfileMutation::Freeze => self.frozen = true,
        }
        Ok(self.visits)
    }
}

// --- Domain wrapper ---

#[derive(Debug, thiserror::Error)]
enum ProfileStoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Clone)]
struct ProfileStore {
    inner: StateClient<Profile>,
}

#[async_trait]
impl StateHandle<Profile> for ProfileStore {
    type Error = ProfileStoreError;

    fn inner(&self) -> &StateClient<Profile> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ProfileStoreError::Unavailable(e.to_string())
    }
}

#[tokio::test]
async fn test_state_actor_lifecycle() {
    let (actor, client) = StateActor::new(Profile::default(), 10);
    let handle = tokio::spawn(actor.run());
    let store = ProfileStore { inner: client };

    store
        .apply(ProfileMutation::Rename("Alice".into()))
        .await
        .unwrap();
    assert_eq!(store.apply(ProfileMutation::Visit).await.unwrap(), 1);
    assert_eq!(store.apply(ProfileMutation::Visit).await.unwrap(), 2);

    let profile = store.snapshot().await.unwrap();
    assert_eq!(profile.name, "Alice");
    assert_eq!(profile.visits, 2);

    store.apply(ProfileMutation::Freeze).await.unwrap();
    let rejected = store.apply(ProfileMutation::Visit).await;
    assert!(matches!(rejected, Err(ProfileStoreError::Unavailable(msg)) if msg.contains("frozen")));

    drop(store);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_client_reports_closed_actor() {
    let (actor, client) = StateActor::new(Profile::default(), 10);
    drop(actor);

    let result = client.snapshot().await;
    assert!(matches!(result, Err(FrameworkError::ActorClosed)));
}
