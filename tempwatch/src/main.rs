//! Entry point for the tempwatch TUI. Parses args, resolves settings and runs the App.

use std::env;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Notify;
use tracing::{info, warn};

use tempwatch::app::App;
use tempwatch::cli::{parse_args, ArgError, ParsedArgs};
use tempwatch::config::{config_dir, load_settings, save_settings, settings_path, Settings};
use tempwatch::logging::{self, LogTarget};
use tempwatch::presenter::Presenter;
use tempwatch::sampler::{spawn_sampler, Sampler};
use tempwatch::source::{HtmlSource, OfflineSource, TemperatureSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(ArgError::Help(msg)) => {
            println!("{msg}");
            return Ok(());
        }
        Err(ArgError::Invalid(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    let target = if parsed.once {
        LogTarget::Stderr
    } else {
        LogTarget::File(logging::log_path(&config_dir()))
    };
    let default_level = if parsed.once { "warn" } else { "info" };
    if let Some(e) = logging::init(target, default_level)? {
        eprintln!("warning: logging disabled: {e:#}");
    }

    let mut settings = load_settings();
    settings.apply(&parsed.overrides);
    settings.validate().context("invalid settings")?;

    if parsed.save {
        save_settings(&settings)
            .with_context(|| format!("saving {}", settings_path().display()))?;
        info!("settings saved to {}", settings_path().display());
    }

    if parsed.offline {
        run(OfflineSource, "offline".into(), &settings, &parsed).await
    } else {
        let source = HtmlSource::new(&settings.url, &settings.selector, settings.timeout())?;
        let label = source.url().host_str().unwrap_or("source").to_string();
        run(source, label, &settings, &parsed).await
    }
}

async fn run<S>(source: S, label: String, settings: &Settings, args: &ParsedArgs) -> anyhow::Result<()>
where
    S: TemperatureSource + Send + Sync + 'static,
{
    let (mut sampler, rx) = Sampler::new(source, settings.capacity, settings.unit);
    let presenter = Presenter::new(rx, settings.unit, settings.location.clone());

    if args.once {
        let mut presenter = presenter;
        let snap = sampler.sample().await;
        presenter.refresh();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&*snap)?);
        } else {
            print!("{}", presenter.render_text());
        }
        return Ok(());
    }

    info!(
        location = %settings.location,
        interval = settings.interval_secs,
        capacity = settings.capacity,
        "starting"
    );
    let wake = Arc::new(Notify::new());
    let handle = spawn_sampler(sampler, settings.interval(), Arc::clone(&wake));
    let mut app = App::new(presenter, wake, settings.interval(), label);
    let res = app.run().await;
    handle.abort();
    if let Err(e) = &res {
        warn!("exiting with error: {e:#}");
    }
    res
}
