// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// WebView communicator demo.
//
// Entry point. Initialises logging, loads the configuration, wires a page
// bridge to a host communicator in-process and runs one exchange in each
// direction.
//
// Usage: wvcomm-demo [android|ios|none] [--config <path>]

mod demo;
mod loopback;

use std::path::{Path, PathBuf};

use wvcomm_core::CommunicatorConfig;
use wvcomm_core::types::Platform;

use loopback::Loopback;

const CONFIG_FILE: &str = "wvcomm.json";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let (platform, config_path) = parse_args(std::env::args().skip(1));
    let config = load_config(&config_path);

    tracing::info!(
        %platform,
        config = %config_path.display(),
        "WebView communicator demo starting"
    );

    let loopback = Loopback::new(config, &platform);
    let outcome = demo::run(&loopback);

    tracing::info!(
        platform = %loopback.bridge.platform(),
        host_calls = outcome.host_calls,
        answers = outcome.answers.len(),
        toasts = outcome.toasts.len(),
        pending = loopback.bridge.pending_callbacks(),
        "demo finished"
    );
    for answer in &outcome.answers {
        tracing::info!(%answer, "callback answer");
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> (Platform, PathBuf) {
    let mut platform = Platform::Android;
    let mut config_path = PathBuf::from(CONFIG_FILE);

    while let Some(arg) = args.next() {
        if arg == "--config" {
            match args.next() {
                Some(path) => config_path = PathBuf::from(path),
                None => tracing::warn!("--config needs a path; using {CONFIG_FILE}"),
            }
        } else {
            platform = Platform::from_tag(&arg);
        }
    }
    (platform, config_path)
}

fn load_config(path: &Path) -> CommunicatorConfig {
    match CommunicatorConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!(error = %e, path = %path.display(), "using default configuration");
            CommunicatorConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn defaults_to_android_and_local_config() {
        let (platform, path) = parse_args(args(&[]));
        assert_eq!(platform, Platform::Android);
        assert_eq!(path, PathBuf::from(CONFIG_FILE));
    }

    #[test]
    fn reads_platform_and_config_path() {
        let (platform, path) = parse_args(args(&["--config", "/tmp/x.json", "ios"]));
        assert_eq!(platform, Platform::Ios);
        assert_eq!(path, PathBuf::from("/tmp/x.json"));
    }

    #[test]
    fn unreadable_config_falls_back_to_defaults() {
        let config = load_config(Path::new("/nonexistent/wvcomm.json"));
        assert_eq!(config, CommunicatorConfig::default());
    }
}
