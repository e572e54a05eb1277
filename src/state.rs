use crate::api::ApiClient;
use crate::availability::AvailabilityIndex;
use crate::controller::{fetch_dashboard, Controller, LoadOutcome};
use crate::dates;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub client: ApiClient,
    pub controller: Arc<Mutex<Controller>>,
}

impl AppState {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            controller: Arc::new(Mutex::new(Controller::new(dates::today()))),
        }
    }

    /// Loads the available dates, then the first dashboard. A failed
    /// availability fetch still tries the dashboard, unfiltered.
    pub async fn initialize(&self) -> LoadOutcome {
        info!("loading availability from {}", self.client.base());
        let loaded = AvailabilityIndex::load(&self.client).await;
        self.controller.lock().await.apply_availability(loaded);
        self.reload().await
    }

    /// Reloads the dashboard for whatever date is current when the load
    /// starts. The controller is not locked while the fetches run.
    pub async fn reload(&self) -> LoadOutcome {
        let ticket = self.controller.lock().await.begin_load();
        let result = fetch_dashboard(&self.client, ticket.date.as_deref()).await;
        self.controller.lock().await.finish_load(ticket, result)
    }

    /// Submits the subscription form. When submissions overlap, only the
    /// answer to the most recent one updates the form.
    pub async fn subscribe(&self, email: &str) -> bool {
        let submission = self.controller.lock().await.subscription_mut().begin(email);
        let result = self.client.subscribe(email.trim()).await;
        self.controller
            .lock()
            .await
            .subscription_mut()
            .apply(submission, result)
    }
}
