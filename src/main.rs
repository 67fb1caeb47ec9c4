// SPDX-License-Identifier: MPL-2.0
use lightbox_gallery::app::{parse_script, App, Flags};
use lightbox_gallery::error::{Error, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const HELP: &str = "\
lightbox-gallery: play a scripted lightbox session against a gallery page

USAGE:
  lightbox-gallery <PAGE.html> [OPTIONS]

OPTIONS:
  --lang LANG           Locale for control labels (e.g. en-US, fr)
  --config PATH         Settings file (defaults to the per-user settings.toml)
  --toolbar-bottom PX   Bottom edge of the host toolbar in pixels
  --script STEPS        Comma-separated steps, e.g. \"open:0,wait,next,key:Escape\"
  -h, --help            Print this help
";

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "lightbox_gallery=info".into());
    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if let Err(err) = result {
        eprintln!("Failed to initialise logging: {err}");
    }
}

fn parse_flags() -> Result<Option<(Flags, String)>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let lang = args.opt_value_from_str("--lang")?;
    let config_path = args.opt_value_from_str::<_, PathBuf>("--config")?;
    let toolbar_bottom = args.opt_value_from_str::<_, f32>("--toolbar-bottom")?;
    let script = args
        .opt_value_from_str::<_, String>("--script")?
        .unwrap_or_default();
    let page = args
        .finish()
        .into_iter()
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| Error::Cli("missing gallery page".into()))?;

    Ok(Some((
        Flags {
            lang,
            page,
            config_path,
            toolbar_bottom,
        },
        script,
    )))
}

async fn run() -> Result<()> {
    let Some((flags, script)) = parse_flags()? else {
        print!("{HELP}");
        return Ok(());
    };
    let steps = parse_script(&script)?;

    let mut app = App::new(flags)?;
    for snapshot in app.run(&steps).await? {
        println!("{snapshot}");
    }
    if let Some(html) = app.overlay_html() {
        println!("{html}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "lightbox-gallery failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
