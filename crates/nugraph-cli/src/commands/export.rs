//! Handler for `nugraph export`.

use miette::Result;

use nugraph_core::config::Config;
use nugraph_ops::ops_export::{self, ExportFormat};

pub async fn exec(config: &Config, format: ExportFormat) -> Result<()> {
    ops_export::export(config, format).await
}
