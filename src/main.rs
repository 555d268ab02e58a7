// Entrypoint for the CLI application.
// - Keeps `main` small: build settings, a fetcher and a prompter, then hand
//   them to the UI flow.
// - Any error ends the run with exit status 1; nothing is rolled back.

use crossterm::style::Stylize;
use post_image::{config::Settings, fetch::ImageFetcher, logger, prompt::DialoguerPrompter, ui};

fn main() {
    logger::init_cli_logger();

    if let Err(e) = run() {
        tracing::debug!("run failed: {e}");
        eprintln!("{}", format!("❌ Error: {e}").red());
        if let Some(hint) = e.downcast_ref::<post_image::ImageError>().and_then(|e| e.guidance()) {
            eprintln!("💡 {hint}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let settings = Settings::from_current_dir()?;
    let fetcher = ImageFetcher::new(settings.fetch.clone())?;
    ui::run(&settings, &DialoguerPrompter, &fetcher)?;
    Ok(())
}
