use crate::error::{FileContext, Result};
use crate::ui;
use report::ReportConfig;
use std::path::Path;

/// Write the default configuration to `config`
pub fn execute(config: &Path, force: bool) -> Result<()> {
    if ReportConfig::write_default(config, force).for_file("write", config)? {
        ui::config_written(config);
    } else {
        ui::config_kept(config);
    }
    Ok(())
}
