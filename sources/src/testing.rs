//! Test doubles for the transport and the sleeper.
//!

use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use crate::{ApiError, Reply, Sleeper, Transport};

/// Request as seen by the transport: URL and query.
pub type Request = (String, Vec<(String, String)>);

pub fn reply(status: u16, body: &str) -> Reply {
    let reason = match status {
        200 => "OK",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "",
    };
    Reply {
        status,
        reason: reason.to_string(),
        body: body.to_string(),
    }
}

/// Transport answering from a pre-recorded list.
///
#[derive(Debug, Default)]
pub struct Script {
    replies: RefCell<VecDeque<Reply>>,
    seen: RefCell<Vec<Request>>,
}

impl Script {
    pub fn new(replies: Vec<Reply>) -> Self {
        Script {
            replies: RefCell::new(replies.into()),
            seen: RefCell::new(vec![]),
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.seen.borrow().clone()
    }
}

impl Transport for Script {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Reply, ApiError> {
        let query = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.seen.borrow_mut().push((url.to_string(), query));
        self.replies
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| ApiError::Transport("script exhausted".to_string()))
    }
}

/// Sleeper recording every pause instead of waiting.
///
#[derive(Debug, Default)]
pub struct Recorder {
    pauses: RefCell<Vec<Duration>>,
}

impl Recorder {
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.borrow().clone()
    }
}

impl Sleeper for Recorder {
    fn sleep(&self, d: Duration) {
        self.pauses.borrow_mut().push(d);
    }
}
