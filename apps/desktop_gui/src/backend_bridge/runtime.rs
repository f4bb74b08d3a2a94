//! Backend worker: a plain thread that owns a tokio runtime and serves
//! [`BackendCommand`]s one at a time, replying with [`UiEvent`]s.

use std::{sync::Arc, thread};

use anyhow::{bail, Context};
use client_core::{HttpTransport, Settings, Transport};
use crossbeam_channel::{Receiver, Sender};
use shared::presets::PresetKind;
use storage::{MemoryPresetStore, PresetStore, SqlitePresetStore};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::deliver_ui_event;
use crate::media::decode_preview_image;

struct Backend {
    transport: HttpTransport,
    http: reqwest::Client,
    presets: Arc<dyn PresetStore>,
    ui_tx: Sender<UiEvent>,
}

pub fn spawn_backend_thread(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    settings: Settings,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let presets = open_preset_store(&settings.database_url, &ui_tx).await;
            let http = reqwest::Client::new();
            let backend = Backend {
                transport: HttpTransport::with_client(http.clone()),
                http,
                presets,
                ui_tx,
            };
            for kind in PresetKind::ALL {
                backend.list_presets(kind).await;
            }

            // Commands are served in order; only image fetches run detached.
            while let Ok(cmd) = cmd_rx.recv() {
                backend.handle(cmd).await;
            }
            tracing::info!("ui command channel closed; backend worker exiting");
        });
    });
}

async fn open_preset_store(database_url: &str, ui_tx: &Sender<UiEvent>) -> Arc<dyn PresetStore> {
    match SqlitePresetStore::open(database_url).await {
        Ok(store) => {
            tracing::info!(%database_url, "opened preset store");
            Arc::new(store)
        }
        Err(err) => {
            tracing::error!(%database_url, "failed to open preset store: {err:#}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!(
                    "preset database unavailable ({err}); presets are kept in memory until restart"
                ),
            )));
            Arc::new(MemoryPresetStore::new())
        }
    }
}

impl Backend {
    async fn handle(&self, cmd: BackendCommand) {
        match cmd {
            BackendCommand::Send(ticket) => {
                let result = self
                    .transport
                    .send(&ticket.endpoint_url, &ticket.payload)
                    .await;
                deliver_ui_event(&self.ui_tx, UiEvent::SendFinished(result));
            }
            BackendCommand::ListPresets(kind) => self.list_presets(kind).await,
            BackendCommand::AddPreset(preset) => {
                let kind = preset.kind();
                match self.presets.add(preset).await {
                    Ok(record) => {
                        tracing::info!(kind = %kind, id = record.id(), "saved preset");
                        let _ = self
                            .ui_tx
                            .try_send(UiEvent::Info(format!("Saved {kind} \"{}\"", record.name())));
                        self.list_presets(kind).await;
                    }
                    Err(err) => self.report(UiErrorContext::Presets, err.to_string()),
                }
            }
            BackendCommand::RemovePreset { kind, id } => match self.presets.remove(kind, &id).await {
                Ok(removed) => {
                    tracing::info!(kind = %kind, %id, removed, "removed preset");
                    self.list_presets(kind).await;
                }
                Err(err) => self.report(UiErrorContext::Presets, err.to_string()),
            },
            BackendCommand::FetchImage { url } => {
                let http = self.http.clone();
                let ui_tx = self.ui_tx.clone();
                tokio::spawn(async move {
                    let event = match fetch_image(&http, &url).await {
                        Ok(image) => UiEvent::ImageLoaded { url, image },
                        Err(err) => {
                            tracing::warn!(%url, "preview image failed to load: {err:#}");
                            UiEvent::ImageFailed {
                                url,
                                reason: format!("{err:#}"),
                            }
                        }
                    };
                    let _ = ui_tx.try_send(event);
                });
            }
        }
    }

    async fn list_presets(&self, kind: PresetKind) {
        match self.presets.list(kind).await {
            Ok(records) => {
                tracing::debug!(kind = %kind, count = records.len(), "loaded presets");
                let _ = self.ui_tx.try_send(UiEvent::PresetsLoaded { kind, records });
            }
            Err(err) => self.report(UiErrorContext::Presets, err.to_string()),
        }
    }

    fn report(&self, context: UiErrorContext, message: String) {
        tracing::warn!(?context, "{message}");
        let _ = self
            .ui_tx
            .try_send(UiEvent::Error(UiError::from_message(context, message)));
    }
}

async fn fetch_image(http: &reqwest::Client, url: &str) -> anyhow::Result<crate::media::PreviewImage> {
    let response = http
        .get(url)
        .send()
        .await
        .with_context(|| format!("request for {url} failed"))?;
    let status = response.status();
    if !status.is_success() {
        bail!("image server answered {status}");
    }
    let bytes = response.bytes().await.context("failed to read image body")?;
    let image = tokio::task::spawn_blocking(move || decode_preview_image(&bytes))
        .await
        .context("image decode task panicked")?
        .map_err(anyhow::Error::msg)?;
    Ok(image)
}
