use log::info;
use std::env;
use std::path::Path;
use tabscan::config::{load_config, ToolConfig};
use tabscan::image::io::{load_grayscale_image, write_json_file};
use tabscan::{Reconstructor, RunLengthDetector, TabError, TokenFile};

fn main() {
    env_logger::init();
    let Some(image_path) = env::args().nth(1) else {
        eprintln!("{}", usage());
        std::process::exit(1);
    };
    if let Err(err) = run(Path::new(&image_path), env::args().nth(2)) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(image_path: &Path, config_path: Option<String>) -> Result<(), TabError> {
    let config = match config_path {
        Some(path) => load_config(Path::new(&path))?,
        None => ToolConfig::default(),
    };

    let gray = load_grayscale_image(image_path)?;
    let tokens = match &config.tokens {
        Some(path) => TokenFile::new(path),
        None => TokenFile::sidecar_for(image_path),
    };
    info!(
        "tabscan: {}x{} image, tokens from {}",
        gray.width(),
        gray.height(),
        tokens.path().display()
    );

    let reconstructor = Reconstructor::new(
        config.reconstruct,
        RunLengthDetector::new(config.detector),
        tokens,
    )?;
    let report = reconstructor.process(gray.as_view())?;
    println!("{}", report.document);

    if let Some(path) = &config.report_json {
        write_json_file(path, &report.trace)?;
        info!("tabscan: wrote trace to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: tabscan <image> [config.json]".to_string()
}
