//! Application state for the Leave Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::config::ConfigLoader;
use crate::repository::LeaveRepository;
use crate::service::LeaveService;

/// Shared application state.
///
/// Contains the loaded policy configuration and the leave service built
/// from it.
#[derive(Clone)]
pub struct AppState {
    /// The loaded policy configuration.
    config: Arc<ConfigLoader>,
    /// The leave workflow service.
    service: LeaveService,
    /// Reference day for calendar status; the current UTC date when unset.
    today: Option<NaiveDate>,
}

impl AppState {
    /// Creates a new application state over `repository`.
    pub fn new(config: ConfigLoader, repository: Arc<dyn LeaveRepository>) -> Self {
        let service = LeaveService::new(repository, config.vacation_policy());
        Self {
            config: Arc::new(config),
            service,
            today: None,
        }
    }

    /// Pins the reference day used to classify leaves.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Returns the reference day used to classify leaves.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the leave service.
    pub fn service(&self) -> &LeaveService {
        &self.service
    }
}
