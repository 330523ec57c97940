//! Handler for `nugraph tree`.

use miette::Result;

use nugraph_core::config::Config;
use nugraph_ops::ops_tree::{self, TreeOptions};

pub async fn exec(config: &Config, why: Option<String>) -> Result<()> {
    ops_tree::tree(config, &TreeOptions { why }).await
}
