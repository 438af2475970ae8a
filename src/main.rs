// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    // Optional first argument: the data directory holding
    // listings.csv, reviews.csv, and neighbourhoods.geojson
    let data_dir = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    run_ui_mode(data_dir)
}

#[cfg(feature = "tui")]
fn run_ui_mode(data_dir: PathBuf) -> Result<()> {
    println!("🏙️  Loading StayScope v{}...\n", stayscope::VERSION);

    if !data_dir.exists() {
        eprintln!("❌ Data directory not found: {}", data_dir.display());
        eprintln!("   Expected flat files:");
        eprintln!("     {}/listings.csv", data_dir.display());
        eprintln!("     {}/reviews.csv", data_dir.display());
        eprintln!("     {}/neighbourhoods.geojson", data_dir.display());
        eprintln!("   Usage: stayscope [DATA_DIR]");
        std::process::exit(1);
    }

    println!("📂 Data directory: {}", data_dir.display());
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = stayscope::App::new(data_dir);
    ui::run_ui(&mut app)?;

    println!("\n✅ Viewer closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_data_dir: PathBuf) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
