use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{ConfigError, StartError};
use crate::logger;
use crate::server::FileServer;
use crate::serving::{ServingConfig, SharedServing};
use crate::url;

/// Whether a listener is currently bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Stopped,
    Running,
}

/// Boundary to the code-rendering collaborator: it receives the latest
/// external URL whenever it changes and turns it into something scannable.
/// This side only supplies the string.
pub trait CodePresenter: Send + Sync {
    fn present(&self, url: &str);
}

impl<T: CodePresenter> CodePresenter for Arc<T> {
    fn present(&self, url: &str) {
        (**self).present(url);
    }
}

/// Mediates operator actions against the server and the serving config.
///
/// Start/stop own the single `FileServer` instance; config edits go through
/// `SharedServing::replace_with` and reach a running listener on its very
/// next request. Every successful action that can change the external URL
/// refreshes the presenter.
pub struct Controller {
    shared: Arc<SharedServing>,
    base_url: String,
    presenter: Box<dyn CodePresenter>,
    server: Option<FileServer>,
}

impl Controller {
    pub fn new(
        shared: Arc<SharedServing>,
        base_url: impl Into<String>,
        presenter: Box<dyn CodePresenter>,
    ) -> Self {
        Self {
            shared,
            base_url: base_url.into(),
            presenter,
            server: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ServerState {
        if self.server.is_some() {
            ServerState::Running
        } else {
            ServerState::Stopped
        }
    }

    /// Start serving on `port`. A no-op while already running; on a bind
    /// failure the state stays `Stopped` and the error is surfaced.
    pub async fn on_start(&mut self, port: u16) -> Result<(), StartError> {
        if self.server.is_some() {
            logger::log_already_running();
            return Ok(());
        }

        let server = match FileServer::start(port, Arc::clone(&self.shared)).await {
            Ok(server) => server,
            Err(err) => {
                logger::log_start_failed(port, &err);
                return Err(err);
            }
        };

        logger::log_server_start(&server.local_addr(), &*self.shared.snapshot().await);
        self.server = Some(server);
        self.refresh_code().await;
        Ok(())
    }

    /// Stop the active server, if any. Idempotent.
    pub async fn on_stop(&mut self) {
        if let Some(server) = self.server.take() {
            server.stop().await;
            logger::log_server_stopped();
        }
    }

    /// Replace the serving config. Works in both states; a running listener
    /// picks the new snapshot up without a restart or a dropped socket.
    pub async fn on_config_change(
        &mut self,
        file_path: impl Into<PathBuf>,
        served_name: Option<&str>,
        mime_type: Option<&str>,
    ) -> Result<Arc<ServingConfig>, ConfigError> {
        let snapshot = self
            .shared
            .replace_with(file_path, served_name, mime_type)
            .await?;
        logger::log_config_updated(&snapshot);
        self.refresh_code().await;
        Ok(snapshot)
    }

    /// Change the operator-supplied base URL and refresh the rendered code.
    pub async fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
        self.refresh_code().await;
    }

    async fn refresh_code(&self) {
        let name = self.shared.snapshot().await.served_name.clone();
        self.presenter.present(&url::compose(&self.base_url, &name));
    }
}
