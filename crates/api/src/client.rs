// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The async driver connecting a [`Controller`] to a [`BookingBackend`].

use crate::backend::BookingBackend;
use crate::error::ApiError;
use crate::request_response::{AvailabilityQuery, HoldBody, HoldOutcome, HoldResponse};
use std::sync::Arc;
use std::time::Duration;
use tablehold::{BookingView, Command, Controller, FetchOutcome, FetchRequest, HoldRequest, Update};
use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Delay applied to stepper and free-text party size changes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Drives one guest session: applies commands, performs the fetches they
/// request and submits the hold.
///
/// Fetches run as background tasks. A debounced fetch waits first and is
/// dropped if a newer one was issued meanwhile; a fetch that completes after
/// being superseded is discarded by the controller.
pub struct BookingClient<B> {
    backend: Arc<B>,
    controller: Arc<Mutex<Controller>>,
    est: String,
    lng: String,
    debounce: Duration,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
}

impl<B: BookingBackend + 'static> BookingClient<B> {
    /// Creates a driver for establishment `est` in language `lng`.
    #[must_use]
    pub fn new(backend: Arc<B>, controller: Controller, est: &str, lng: &str) -> Self {
        Self {
            backend,
            controller: Arc::new(Mutex::new(controller)),
            est: est.to_string(),
            lng: lng.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            in_flight: Mutex::new(Vec::new()),
        }
    }

    /// Overrides the debounce delay.
    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// The backend this client talks to.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The view for the current state.
    pub async fn view(&self) -> BookingView {
        self.controller.lock().await.view()
    }

    /// Applies `command` and starts the fetch it requests, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Core`] if the command is not valid in the current
    /// state.
    pub async fn dispatch(&self, command: Command) -> Result<Update, ApiError> {
        let update: Update = self.controller.lock().await.dispatch(command)?;
        if let Some(request) = update.fetch {
            let handle: JoinHandle<()> = tokio::spawn(run_fetch(
                Arc::clone(&self.backend),
                Arc::clone(&self.controller),
                self.est.clone(),
                request,
                self.debounce,
            ));
            let mut in_flight: MutexGuard<'_, Vec<JoinHandle<()>>> = self.in_flight.lock().await;
            in_flight.retain(|handle| !handle.is_finished());
            in_flight.push(handle);
        }
        Ok(update)
    }

    /// The number of fetch tasks still tracked for [`Self::settle`].
    pub async fn tracked_fetches(&self) -> usize {
        self.in_flight.lock().await.len()
    }

    /// Waits for every started fetch to finish and returns the resulting view.
    pub async fn settle(&self) -> BookingView {
        let handles: Vec<JoinHandle<()>> = std::mem::take(&mut *self.in_flight.lock().await);
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Fetch task did not complete");
            }
        }
        self.view().await
    }

    /// Places a hold for the current selection.
    ///
    /// Required fields are checked before any request is sent. The selection
    /// is kept whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Core`] if the selection is incomplete,
    /// [`ApiError::Backend`] if the request fails, or
    /// [`ApiError::HoldRejected`] if the server refuses the hold.
    pub async fn submit_hold(&self) -> Result<HoldOutcome, ApiError> {
        let (request, fallback): (HoldRequest, String) = {
            let controller: MutexGuard<'_, Controller> = self.controller.lock().await;
            (
                controller.hold_request(&self.est, &self.lng)?,
                controller.config().strings.error_generic.clone(),
            )
        };
        info!(
            est = %request.est,
            date = %request.date,
            covers = request.covers,
            time = request.time.hours(),
            area = ?request.area,
            addons = %request.addons,
            "Submitting hold"
        );

        let response: HoldResponse = self
            .backend
            .hold(&request.est, &HoldBody::from(&request))
            .await?;
        hold_outcome(response, fallback)
    }
}

fn hold_outcome(response: HoldResponse, fallback: String) -> Result<HoldOutcome, ApiError> {
    if let Some(url) = response.url {
        info!(url = %url, "Hold placed");
        return Ok(HoldOutcome::Continue { url });
    }
    if let Some(error) = response.error {
        let message: String = error.message.unwrap_or(fallback);
        warn!(message = %message, "Hold rejected");
        return Err(ApiError::HoldRejected { message });
    }
    info!("Hold accepted without continuation");
    Ok(HoldOutcome::Accepted)
}

async fn run_fetch<B: BookingBackend>(
    backend: Arc<B>,
    controller: Arc<Mutex<Controller>>,
    est: String,
    request: FetchRequest,
    debounce: Duration,
) {
    if request.debounce {
        tokio::time::sleep(debounce).await;
        if !controller.lock().await.is_current(request.ticket) {
            debug!(ticket = %request.ticket, "Debounced fetch superseded before sending");
            return;
        }
    }

    let query: AvailabilityQuery = AvailabilityQuery::for_request(&est, &request);
    let outcome: FetchOutcome = match backend.fetch_availability(&query).await {
        Ok(payload) => FetchOutcome::Payload { payload },
        Err(e) => FetchOutcome::Failed {
            reason: e.to_string(),
        },
    };

    match controller.lock().await.complete_fetch(request.ticket, outcome) {
        Ok(update) if update.stale_response.is_some() => {
            debug!(ticket = %request.ticket, "Fetch result arrived after a newer request");
        }
        Ok(_) => debug!(ticket = %request.ticket, "Fetch result applied"),
        Err(e) => warn!(ticket = %request.ticket, error = %e, "Fetch result could not be applied"),
    }
}
