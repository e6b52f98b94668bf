//! Bridge configuration loaded from environment variables

use std::env;
use std::time::Duration;

/// 橋接器設定
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Base URL of the order server API
    pub api_base_url: String,
    /// Seconds between polls of the pending-print queue
    pub poll_interval: Duration,
    /// Pause between consecutive receipts so the cutter keeps up
    pub print_pacing: Duration,
    /// Printer address as "host:port" (TCP 9100). None falls back to
    /// console output for running without hardware.
    pub printer_addr: Option<String>,
    /// Paper width in Big5 columns (58mm paper is 32)
    pub paper_width: usize,
    /// Shop name printed at the top of every receipt
    pub shop_name: String,
}

impl BridgeConfig {
    /// 從環境變數載入設定
    pub fn from_env() -> Self {
        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());

        let poll_secs = env::var("POLL_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(10);

        let pacing_ms = env::var("PRINT_PACING_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(1000);

        let printer_addr = env::var("PRINTER_ADDR").ok().filter(|v| !v.is_empty());

        let paper_width = env::var("PAPER_WIDTH")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(32);

        let shop_name =
            env::var("SHOP_NAME").unwrap_or_else(|_| "水最美-熊哥滷味".to_string());

        Self {
            api_base_url,
            poll_interval: Duration::from_secs(poll_secs),
            print_pacing: Duration::from_millis(pacing_ms),
            printer_addr,
            paper_width,
            shop_name,
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
