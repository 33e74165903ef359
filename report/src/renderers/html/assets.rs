//! Static files shipped next to every generated page

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory of the scripts, relative to the page
pub const SCRIPT_DIR: &str = "_scripts";

/// Directory of the logo, relative to the page
pub const IMAGE_DIR: &str = "_images";

pub const STYLESHEET: &str = "report.css";

pub const LOGO: &str = "inviwo.png";

/// Scripts in load order, with their content
pub const SCRIPTS: [(&str, &[u8]); 5] = [
    ("sparkline.js", include_bytes!("../../../resources/scripts/sparkline.js")),
    ("zoom.js", include_bytes!("../../../resources/scripts/zoom.js")),
    ("list.js", include_bytes!("../../../resources/scripts/list.js")),
    ("make-list.js", include_bytes!("../../../resources/scripts/make-list.js")),
    ("main.js", include_bytes!("../../../resources/scripts/main.js")),
];

const STYLESHEET_DATA: &[u8] = include_bytes!("../../../resources/report.css");

const LOGO_DATA: &[u8] = include_bytes!("../../../resources/images/inviwo.png");

/// Script file names in load order
pub fn script_names() -> impl Iterator<Item = &'static str> {
    SCRIPTS.iter().map(|(name, _)| *name)
}

fn write(path: PathBuf, data: &[u8]) -> Result<()> {
    fs::write(&path, data)?;
    tracing::debug!(path = %path.display(), "wrote asset");
    Ok(())
}

/// Copy scripts, stylesheet and logo into `base_dir`, replacing existing
/// copies
pub fn save_assets(base_dir: &Path) -> Result<()> {
    let script_dir = base_dir.join(SCRIPT_DIR);
    fs::create_dir_all(&script_dir)?;
    for (name, data) in SCRIPTS {
        write(script_dir.join(name), data)?;
    }

    let image_dir = base_dir.join(IMAGE_DIR);
    fs::create_dir_all(&image_dir)?;
    write(image_dir.join(LOGO), LOGO_DATA)?;

    write(base_dir.join(STYLESHEET), STYLESHEET_DATA)
}
