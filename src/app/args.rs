use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "pod-chaos")]
#[command(about = "Click the pods floating around your terminal to delete them")]
pub struct AppArgs {
    #[arg(long, help = "Namespace whose pods are shown [default: default]")]
    pub namespace: Option<String>,

    #[arg(long, help = "Seconds between pod list refreshes [default: 5]")]
    pub refresh_secs: Option<u64>,

    #[arg(long, help = "Milliseconds between label re-scrambles [default: 1000]")]
    pub layout_ms: Option<u64>,

    #[arg(long, help = "JSON config file path")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Kubeconfig path (standard discovery if not specified)")]
    pub kubeconfig: Option<PathBuf>,

    #[arg(long, help = "Seed for reproducible label placement")]
    pub seed: Option<u64>,
}

impl AppArgs {
    pub fn from_cli() -> Self {
        <Self as Parser>::parse()
    }
}
