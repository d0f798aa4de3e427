use std::path::PathBuf;

use dicom_mpr::{MprEngine, Orientation};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let directory = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dicom"));

    let mut engine = MprEngine::default();
    if let Err(err) = engine.load_directory(&directory) {
        error!(%err, directory = %directory.display(), "Failed to load volume");
        std::process::exit(1);
    }
    println!("{}", engine.volume_summary());

    let params = engine.default_view();
    for orientation in Orientation::ALL {
        let Some(view) = engine.render_view(orientation, &params) else {
            continue;
        };
        let file_name = format!("{orientation:?}.png").to_lowercase();
        if let Err(err) = view.image.save(&file_name) {
            error!(%err, %file_name, "Failed to save view");
        }
    }
}
