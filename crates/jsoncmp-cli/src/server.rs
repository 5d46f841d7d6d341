//! Status listener — serves the result collection over plain HTTP
//!
//! Every request, whatever its method or path, gets `200 OK` with the result
//! JSON as a `text/plain` body. Connections are handled one at a time on the
//! calling thread.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::time::Duration;

const IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on request head lines read before answering
const MAX_HEAD_LINES: usize = 100;

pub struct StatusServer {
    listener: TcpListener,
    body: String,
}

impl StatusServer {
    pub fn bind<A: ToSocketAddrs>(addr: A, body: String) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        Ok(Self { listener, body })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Answer requests until `max_requests` have been served (forever if `None`)
    ///
    /// Returns the number of responses written. A failing connection is
    /// logged and does not stop the server.
    pub fn serve(&self, max_requests: Option<usize>) -> io::Result<usize> {
        let mut served = 0;
        while max_requests.map_or(true, |max| served < max) {
            let (stream, peer) = self.listener.accept()?;
            tracing::debug!(%peer, "accepted connection");
            match respond(stream, &self.body) {
                Ok(()) => served += 1,
                Err(err) => tracing::warn!(%peer, error = %err, "connection error"),
            }
        }
        Ok(served)
    }
}

/// Drain the request head, then write the fixed response
fn respond(mut stream: TcpStream, body: &str) -> io::Result<()> {
    stream.set_read_timeout(Some(IO_TIMEOUT))?;
    stream.set_write_timeout(Some(IO_TIMEOUT))?;

    let mut reader = BufReader::new(stream.try_clone()?);
    let mut line = String::new();
    for _ in 0..MAX_HEAD_LINES {
        line.clear();
        if reader.read_line(&mut line)? == 0 || line.trim_end().is_empty() {
            break;
        }
    }

    write!(
        stream,
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )?;
    stream.flush()
}
