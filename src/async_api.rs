use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread;
use tokio::sync::oneshot;

use crate::error::{Error, Result};
use crate::export::{ExportPipeline, ExportRequest};
use crate::model::{InvoiceDocument, Theme};
use crate::render::PreviewHost;

enum Command {
    Mount(String, Box<InvoiceDocument>, Theme, oneshot::Sender<()>),
    Export(ExportRequest, oneshot::Sender<Result<PathBuf>>),
    InProgress(oneshot::Sender<bool>),
    Close(oneshot::Sender<()>),
}

/// An async-friendly studio handle backed by a dedicated worker thread.
///
/// The worker thread owns the preview host and a synchronous
/// [`ExportPipeline`] and executes commands sent from async tasks, so
/// callers get an async interface without the pipeline needing to be
/// `Send` across await points. Capture and assembly therefore suspend the
/// caller rather than blocking it. There is no cancellation: a started
/// export runs to completion or failure.
#[derive(Clone)]
pub struct Studio {
    cmd_tx: Sender<Command>,
}

impl Studio {
    /// Create a new studio (spawns the background worker that owns the
    /// host and pipeline).
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();

        thread::spawn(move || {
            let mut host = PreviewHost::new();
            let mut pipeline = ExportPipeline::with_defaults();

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Mount(id, doc, theme, resp) => {
                        host.mount(&id, &doc, theme);
                        let _ = resp.send(());
                    }
                    Command::Export(request, resp) => {
                        let res = pipeline.export(&host, &request);
                        let _ = resp.send(res);
                    }
                    Command::InProgress(resp) => {
                        let _ = resp.send(pipeline.in_progress());
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(());
                        break;
                    }
                }
            }
        });

        Self { cmd_tx }
    }

    /// Render and mount a document snapshot under `id`.
    pub async fn mount(&self, id: &str, doc: InvoiceDocument, theme: Theme) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self
            .cmd_tx
            .send(Command::Mount(id.to_string(), Box::new(doc), theme, tx));
        rx.await
            .map_err(|e| Error::Other(format!("Mount canceled: {}", e)))
    }

    /// Run one export against the mounted target.
    pub async fn export(&self, request: ExportRequest) -> Result<PathBuf> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Export(request, tx));
        rx.await
            .map_err(|e| Error::Other(format!("Export canceled: {}", e)))?
    }

    /// Whether an export is currently in flight on the worker.
    pub async fn in_progress(&self) -> Result<bool> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::InProgress(tx));
        rx.await
            .map_err(|e| Error::Other(format!("InProgress canceled: {}", e)))
    }

    /// Shut down the background worker.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))
    }
}

impl Default for Studio {
    fn default() -> Self {
        Self::new()
    }
}
