#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use sqlfrost_core::{DriverError, QueryResponse};
use sqlfrost_dialect_snowflake::{
    ConnectionSettings, Driver, DriverResult, ErrorListener, ExecuteRequest, RawConnection,
};

pub const FAKE_DRIVER_NAME: &str = "fake-snowflake";

#[derive(Default)]
struct FakeState {
    settings: Vec<ConnectionSettings>,
    connects: usize,
    ends: usize,
    listener_resets: usize,
    executed: Vec<ExecuteRequest>,
    responses: VecDeque<DriverResult<QueryResponse>>,
    connect_error: Option<DriverError>,
    end_error: Option<DriverError>,
}

/// In-memory driver that records every call and replays scripted responses.
#[derive(Clone, Default)]
pub struct FakeDriver {
    state: Arc<Mutex<FakeState>>,
    listeners: Arc<Mutex<Vec<ErrorListener>>>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state
            .lock()
            .unwrap_or_else(|error| panic!("fake driver state poisoned: {error}"))
    }

    pub fn fail_connect(&self, error: DriverError) {
        self.state().connect_error = Some(error);
    }

    pub fn fail_end(&self, error: DriverError) {
        self.state().end_error = Some(error);
    }

    pub fn push_response(&self, response: QueryResponse) {
        self.state().responses.push_back(Ok(response));
    }

    pub fn push_error(&self, error: DriverError) {
        self.state().responses.push_back(Err(error));
    }

    /// Delivers an asynchronous connection error to every registered listener.
    pub fn emit_error(&self, error: &DriverError) {
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(|error| panic!("fake driver listeners poisoned: {error}"));
        for listener in listeners.iter() {
            listener(error);
        }
    }

    pub fn active_listeners(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(|error| panic!("fake driver listeners poisoned: {error}"))
            .len()
    }

    pub fn created_settings(&self) -> Vec<ConnectionSettings> {
        self.state().settings.clone()
    }

    pub fn connects(&self) -> usize {
        self.state().connects
    }

    pub fn ends(&self) -> usize {
        self.state().ends
    }

    pub fn listener_resets(&self) -> usize {
        self.state().listener_resets
    }

    pub fn executed(&self) -> Vec<ExecuteRequest> {
        self.state().executed.clone()
    }

    pub fn executed_sql(&self) -> Vec<String> {
        self.state()
            .executed
            .iter()
            .map(|request| request.sql_text.clone())
            .collect()
    }
}

impl Driver for FakeDriver {
    fn name(&self) -> &'static str {
        FAKE_DRIVER_NAME
    }

    fn create_connection(
        &self,
        settings: &ConnectionSettings,
    ) -> DriverResult<Box<dyn RawConnection>> {
        self.state().settings.push(settings.clone());
        Ok(Box::new(FakeConnection {
            driver: self.clone(),
        }))
    }
}

pub struct FakeConnection {
    driver: FakeDriver,
}

#[async_trait]
impl RawConnection for FakeConnection {
    async fn connect(&mut self) -> DriverResult<()> {
        let mut state = self.driver.state();
        state.connects += 1;
        match state.connect_error.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn execute(&mut self, request: ExecuteRequest) -> DriverResult<QueryResponse> {
        let mut state = self.driver.state();
        state.executed.push(request);
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Ok(QueryResponse::default()))
    }

    async fn end(&mut self) -> DriverResult<()> {
        let error = {
            let mut state = self.driver.state();
            state.ends += 1;
            state.end_error.clone()
        };
        match error {
            Some(error) => {
                self.driver.emit_error(&error);
                Err(error)
            }
            None => Ok(()),
        }
    }

    fn on_error(&mut self, listener: ErrorListener) {
        self.driver
            .listeners
            .lock()
            .unwrap_or_else(|error| panic!("fake driver listeners poisoned: {error}"))
            .push(listener);
    }

    fn remove_all_listeners(&mut self) {
        self.driver.state().listener_resets += 1;
        self.driver
            .listeners
            .lock()
            .unwrap_or_else(|error| panic!("fake driver listeners poisoned: {error}"))
            .clear();
    }
}
