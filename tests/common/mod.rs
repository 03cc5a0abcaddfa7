//! Recording fake for the `KeepApi` seam.

use keep_cli::api::{ApiRequest, KeepApi};
use keep_cli::{KeepError, Result};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;

/// Replays canned responses in order and records every request it sees.
#[derive(Default)]
pub struct RecordingApi {
    responses: RefCell<VecDeque<Result<Value>>>,
    calls: RefCell<Vec<ApiRequest>>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, value: Value) -> Self {
        self.responses.borrow_mut().push_back(Ok(value));
        self
    }

    pub fn fail(self, status: u16, body: &str) -> Self {
        self.responses.borrow_mut().push_back(Err(KeepError::Api {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.borrow().clone()
    }
}

impl KeepApi for RecordingApi {
    fn call(&self, request: &ApiRequest) -> Result<Value> {
        self.calls.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Value::Object(Default::default())))
    }
}

pub fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).expect("utf-8 output")
}
