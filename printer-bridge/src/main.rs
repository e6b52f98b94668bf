use printer_bridge::{
    ApiClient, BridgeConfig, ConsolePrinter, NetworkPrinter, PrintWorker, PrinterDevice, Printer,
    ReceiptRenderer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 載入環境變數與日誌
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. 載入設定
    let config = BridgeConfig::from_env();
    info!(api = %config.api_base_url, "Printer bridge starting");

    // 3. 選擇印表機（無設定則輸出到主控台）
    let device = match &config.printer_addr {
        Some(addr) => {
            let printer = NetworkPrinter::new(addr)?;
            if !printer.is_online().await {
                warn!(addr = %addr, "Printer is not reachable, will retry during polling");
            }
            PrinterDevice::Network(printer)
        }
        None => {
            warn!("PRINTER_ADDR not set, printing to console");
            PrinterDevice::Console(ConsolePrinter)
        }
    };

    // 4. 啟動輪詢迴圈
    let client = ApiClient::new(&config.api_base_url);
    let renderer = ReceiptRenderer::new(config.paper_width, &config.shop_name);
    let worker = PrintWorker::new(client, renderer, device, config);

    worker.run().await;
    Ok(())
}
