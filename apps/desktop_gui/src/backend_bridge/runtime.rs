//! Backend worker: owns the tokio runtime and the protocol client, drains
//! UI commands, and reports outcomes as UI events.

use std::thread;

use client_core::ActivitiesClient;
use crossbeam_channel::{Receiver, Sender};
use tracing::{error, info};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{signup_failure_text, unregister_failure_text, UiEvent};

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::CatalogLoadFailed);
                return;
            }
        };

        let client = match ActivitiesClient::new(&server_url) {
            Ok(client) => client,
            Err(err) => {
                error!("refusing to start backend worker: {err}");
                let _ = ui_tx.try_send(UiEvent::CatalogLoadFailed);
                return;
            }
        };

        // Commands drain one at a time, so mutating requests can never
        // patch the roster out of order relative to their responses.
        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadCatalog => {
                        info!("backend: load_catalog");
                        match client.fetch_catalog().await {
                            Ok(catalog) => {
                                let _ = ui_tx.try_send(UiEvent::CatalogLoaded(catalog));
                            }
                            Err(err) => {
                                error!("backend: load_catalog failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::CatalogLoadFailed);
                            }
                        }
                    }
                    BackendCommand::Signup { activity, email } => {
                        info!(%activity, %email, "backend: signup");
                        match client.signup(&activity, &email).await {
                            Ok(response) => {
                                let _ = ui_tx.try_send(UiEvent::SignupConfirmed {
                                    activity,
                                    email,
                                    message: response.message,
                                });
                            }
                            Err(err) => {
                                error!("backend: signup failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::SignupFailed {
                                    message: signup_failure_text(&err),
                                });
                            }
                        }
                    }
                    BackendCommand::Unregister { activity, email } => {
                        info!(%activity, %email, "backend: unregister");
                        match client.unregister(&activity, &email).await {
                            Ok(()) => {
                                let _ = ui_tx
                                    .try_send(UiEvent::UnregisterConfirmed { activity, email });
                            }
                            Err(err) => {
                                error!("backend: unregister failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::UnregisterFailed {
                                    message: unregister_failure_text(&err),
                                });
                            }
                        }
                    }
                }
            }
        });
    });
}
