use ureq::Error::Status;

use super::{Fetcher, Response};

// Browser-like identification, some placeholder services reject the
// default client string.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub struct UReqFetcher;

impl Fetcher for UReqFetcher {
    fn fetch(&self, url: &str) -> Response {
        let request = ureq::request("GET", url).set("User-Agent", USER_AGENT);

        let response = request.call();

        match response {
            // Only an exact 200 carries an image body; any other final
            // status is reported as a failure for that file.
            Ok(response) if response.status() == 200 => {
                Response::body(Box::new(response.into_reader()))
            }

            Ok(response) => Response::status(response.status()),

            Err(Status(code, _)) => Response::status(code),

            Err(error) => Response::transport(error.to_string()),
        }
    }
}

impl UReqFetcher {
    pub fn new() -> Self {
        UReqFetcher
    }
}

impl Default for UReqFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {

    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::{Fetcher, Response, UReqFetcher};

    #[test]
    fn test_maps_exact_200_to_body() {
        let (url, server) = serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello");

        let response = UReqFetcher::new().fetch(&url);

        let Response::Body(mut body) = response else {
            panic!("expected a streamed body for status 200");
        };

        let mut content = Vec::new();
        body.read_to_end(&mut content).unwrap();

        assert_eq!(content, b"hello");

        server.join().unwrap();
    }

    #[test]
    fn test_maps_other_success_codes_to_status() {
        let (url, server) = serve_once(b"HTTP/1.1 204 No Content\r\nContent-Length: 0\r\n\r\n");

        let response = UReqFetcher::new().fetch(&url);

        server.join().unwrap();

        assert!(matches!(response, Response::Status(204)));
    }

    fn serve_once(reply: &'static [u8]) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();

            let mut request = [0u8; 1024];
            let _ = stream.read(&mut request);

            stream.write_all(reply).unwrap();
        });

        (format!("http://{}/image.png", address), server)
    }
}
