//! Backend worker thread: owns the tokio runtime and executes queued commands
//! against the shared console session.

use std::{sync::Arc, thread};

use client_core::ConsoleSession;
use crossbeam_channel::{Receiver, Sender};
use tokio::sync::broadcast::error::RecvError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    session: Arc<ConsoleSession>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let mut events = session.subscribe_events();
            let forward_tx = ui_tx.clone();
            tokio::spawn(async move {
                loop {
                    match events.recv().await {
                        Ok(event) => {
                            if forward_tx.try_send(UiEvent::Console(event)).is_err() {
                                tracing::debug!("ui event queue unavailable; dropping console event");
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "ui event forwarder lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            });

            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend command received");
                let session = session.clone();
                match cmd {
                    BackendCommand::Mount => {
                        tokio::spawn(async move {
                            session.mount().await;
                        });
                    }
                    BackendCommand::Submit { text } => {
                        tokio::spawn(async move {
                            session.lifecycle().submit(&text).await;
                        });
                    }
                    BackendCommand::RefreshHistory => {
                        tokio::spawn(async move {
                            session.roster().load_history().await;
                        });
                    }
                    BackendCommand::RefreshLeaders => {
                        tokio::spawn(async move {
                            session.roster().load_leaders().await;
                        });
                    }
                }
            }
            tracing::info!("backend command queue closed; worker exiting");
        });
    });
}
