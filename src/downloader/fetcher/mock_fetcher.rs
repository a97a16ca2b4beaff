use std::cell::RefCell;
use std::rc::Rc;

use super::{Fetcher, Response};

/// Scripted fetcher: answers with the queued responses in order and records
/// every URL it was asked to fetch.
pub struct MockFetcher {
    responses: RefCell<Vec<Response>>,
    requests: Rc<RefCell<Vec<String>>>,
}

impl Fetcher for MockFetcher {
    fn fetch(&self, url: &str) -> Response {
        self.requests.borrow_mut().push(url.to_string());

        let mut responses = self.responses.borrow_mut();

        if responses.is_empty() {
            Response::transport(String::from("mock queue exhausted"))
        } else {
            responses.remove(0)
        }
    }
}

impl MockFetcher {
    pub fn new(responses: Vec<Response>) -> Self {
        Self {
            responses: RefCell::new(responses),
            requests: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Shared handle to the recorded URLs, usable after the fetcher has been
    /// moved into a downloader.
    pub fn requests(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.requests)
    }
}
