use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::error::StartError;
use crate::handler;
use crate::logger;
use crate::serving::SharedServing;

/// A running single-file server: one bound listener, one accept loop.
///
/// The loop reads the shared serving config through per-request snapshots,
/// so config edits reach it without a restart. Dropping the handle does not
/// stop the loop; `stop` is the only release path for the port.
pub struct FileServer {
    local_addr: SocketAddr,
    shutdown: Arc<Notify>,
    task: JoinHandle<()>,
}

impl FileServer {
    /// Bind `port` on all interfaces and start accepting.
    ///
    /// Port 0 is rejected up front; a port already in use surfaces as
    /// `StartError::Bind` from the listener setup.
    pub async fn start(port: u16, shared: Arc<SharedServing>) -> Result<Self, StartError> {
        if port == 0 {
            return Err(StartError::InvalidPort(port));
        }

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = create_reusable_listener(addr).map_err(StartError::Bind)?;
        let local_addr = listener.local_addr().map_err(StartError::Bind)?;

        let shutdown = Arc::new(Notify::new());
        let task = tokio::spawn(accept_loop(listener, shared, Arc::clone(&shutdown)));

        Ok(Self {
            local_addr,
            shutdown,
            task,
        })
    }

    /// Signal the accept loop to exit and wait for it to release the port.
    ///
    /// Returns in bounded time: the loop observes the signal on its next
    /// select poll and drops the listener. In-flight responses finish on
    /// their own tasks.
    pub async fn stop(self) {
        self.shutdown.notify_one();
        let _ = self.task.await;
        logger::log_listener_closed(&self.local_addr);
    }

    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

async fn accept_loop(listener: TcpListener, shared: Arc<SharedServing>, shutdown: Arc<Notify>) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        handle_connection(stream, peer_addr, Arc::clone(&shared));
                    }
                    Err(e) => {
                        logger::log_accept_error(&e);
                    }
                }
            }

            () = shutdown.notified() => {
                break;
            }
        }
    }
}

/// Serve one connection on its own task so a slow client cannot hold up
/// the accept loop. Connection errors are logged and contained here.
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    shared: Arc<SharedServing>,
) {
    tokio::spawn(async move {
        logger::log_connection_accepted(&peer_addr);
        let io = TokioIo::new(stream);

        let service = service_fn(move |req| {
            let shared = Arc::clone(&shared);
            async move { handler::handle_request(req, shared).await }
        });

        if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
            logger::log_connection_error(&err);
        }
    });
}

/// Create a `TcpListener` with `SO_REUSEADDR` enabled, so a port released
/// by `stop` can be rebound immediately instead of waiting out TIME_WAIT.
/// `SO_REUSEPORT` is deliberately not set: a second bind on a live port
/// must fail so start attempts on an occupied port surface an error.
fn create_reusable_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
