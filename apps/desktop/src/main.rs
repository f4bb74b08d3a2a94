use std::{io::IsTerminal, path::PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use client_core::{load_settings, HttpTransport, NoticeKind, SubmitSession};
use composer::{timestamp, TimestampStyle};
use shared::presets::{NewPreset, PresetKind, PresetRecord};
use storage::{PresetStore, SqlitePresetStore};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod draft;
mod render;

use draft::Draft;
use render::TextRenderer;

#[derive(Parser, Debug)]
#[command(about = "Compose and send rich webhook messages")]
struct Cli {
    /// Preset database; defaults to the configured location.
    #[arg(long, global = true)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print how a draft will look in the chat client.
    Preview { draft: PathBuf },
    /// Print the JSON body that would be posted for a draft.
    Payload {
        draft: PathBuf,
        #[arg(long)]
        compact: bool,
    },
    /// Build a draft and post it to a webhook.
    Send {
        draft: PathBuf,
        #[arg(long, conflicts_with = "preset")]
        webhook: Option<String>,
        /// Name of a saved webhook preset.
        #[arg(long)]
        preset: Option<String>,
    },
    /// Generate a dynamic timestamp token.
    Timestamp {
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "")]
        time: String,
        #[arg(long, default_value_t = TimestampStyle::default())]
        style: TimestampStyle,
        /// Interpret date and time as UTC instead of local time.
        #[arg(long)]
        utc: bool,
    },
    #[command(subcommand)]
    Presets(PresetsCommand),
}

#[derive(Subcommand, Debug)]
enum PresetsCommand {
    List {
        #[arg(value_parser = parse_kind)]
        kind: PresetKind,
    },
    AddWebhook {
        name: String,
        url: String,
    },
    AddRole {
        name: String,
        format: String,
    },
    SaveEmbed {
        name: String,
        draft: PathBuf,
    },
    Remove {
        #[arg(value_parser = parse_kind)]
        kind: PresetKind,
        id: String,
    },
}

fn parse_kind(raw: &str) -> Result<PresetKind, String> {
    PresetKind::parse(raw).ok_or_else(|| format!("unknown preset kind '{raw}', expected webhooks, roles or embeds"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let settings = load_settings();
    let database_url = cli.database_url.unwrap_or(settings.database_url);

    match cli.command {
        Command::Preview { draft } => {
            let form = Draft::load(&draft)?.into_form()?;
            let preview = composer::render_form_preview(&form);
            let renderer = TextRenderer::new(std::io::stdout().is_terminal());
            print!("{}", renderer.render(&preview));
        }
        Command::Payload { draft, compact } => {
            let form = Draft::load(&draft)?.into_form()?;
            let payload = composer::build_form_payload(&form);
            let json = if compact {
                payload.to_json()?
            } else {
                payload.to_json_pretty()?
            };
            println!("{json}");
        }
        Command::Send {
            draft,
            webhook,
            preset,
        } => {
            let mut form = Draft::load(&draft)?.into_form()?;
            let endpoint = match (webhook, preset) {
                (Some(url), _) => Some(url),
                (None, Some(name)) => Some(webhook_preset_url(&database_url, &name).await?),
                (None, None) if form.identity().has_endpoint() => None,
                (None, None) => settings.default_webhook_url.clone(),
            };
            if let Some(endpoint_url) = endpoint {
                let mut identity = form.identity().clone();
                identity.endpoint_url = endpoint_url;
                form.set_identity(identity);
            }

            let mut session = SubmitSession::new();
            let notice = session
                .submit(&form, &HttpTransport::new())
                .await
                .context("message was not sent")?;
            match notice.kind {
                NoticeKind::Success => println!("{}", notice.message),
                NoticeKind::Error => bail!("{}", notice.message),
            }
        }
        Command::Timestamp {
            date,
            time,
            style,
            utc,
        } => {
            let (token, rendered) = if utc {
                let token = timestamp::generate(&date, &time, style, &Utc)?;
                let rendered = token.and_then(|token| token.preview(&Utc, &Utc::now()));
                (token, rendered)
            } else {
                let token = timestamp::generate(&date, &time, style, &Local)?;
                let rendered = token.and_then(|token| token.preview(&Local, &Local::now()));
                (token, rendered)
            };
            let token = token.ok_or_else(|| anyhow!("pick a date first"))?;
            println!("{token}");
            if let Some(rendered) = rendered {
                println!("{} ({})", rendered, style.label());
            }
        }
        Command::Presets(command) => run_presets(&database_url, command).await?,
    }

    Ok(())
}

async fn webhook_preset_url(database_url: &str, name: &str) -> Result<String> {
    let store = SqlitePresetStore::open(database_url).await?;
    let webhooks = store.list(PresetKind::Webhooks).await?;
    webhooks
        .into_iter()
        .find_map(|record| match record {
            PresetRecord::Webhook(preset) if preset.name == name => Some(preset.url),
            _ => None,
        })
        .ok_or_else(|| anyhow!("no saved webhook named '{name}'"))
}

async fn run_presets(database_url: &str, command: PresetsCommand) -> Result<()> {
    let store = SqlitePresetStore::open(database_url).await?;
    debug!(%database_url, "opened preset store");

    let new_preset = match command {
        PresetsCommand::List { kind } => {
            for record in store.list(kind).await? {
                println!("{}", describe(&record));
            }
            return Ok(());
        }
        PresetsCommand::Remove { kind, id } => {
            if !store.remove(kind, &id).await? {
                bail!("no {kind} preset with id '{id}'");
            }
            println!("removed {kind} {id}");
            return Ok(());
        }
        PresetsCommand::AddWebhook { name, url } => NewPreset::Webhook { name, url },
        PresetsCommand::AddRole { name, format } => NewPreset::Role { name, format },
        PresetsCommand::SaveEmbed { name, draft } => NewPreset::Embed {
            name,
            data: Draft::load(&draft)?.embed,
        },
    };

    let record = store.add(new_preset).await?;
    println!("saved {} {}", record.kind(), describe(&record));
    Ok(())
}

fn describe(record: &PresetRecord) -> String {
    match record {
        PresetRecord::Webhook(preset) => format!("{}\t{}\t{}", preset.id, preset.name, preset.url),
        PresetRecord::Role(preset) => format!("{}\t{}\t{}", preset.id, preset.name, preset.format),
        PresetRecord::Embed(template) => format!(
            "{}\t{}\t{}\t{}",
            template.id,
            template.name,
            template.created_at,
            if template.data.title.is_empty() {
                "(untitled)"
            } else {
                template.data.title.as_str()
            }
        ),
    }
}
