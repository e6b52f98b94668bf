use order_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 設定環境 (dotenv, 日誌)
    setup_environment();

    tracing::info!("Luwei order server starting...");

    // 2. 載入配置
    let config = Config::from_env();

    // 3. 初始化狀態 (建立工作目錄與資料庫)
    let state = ServerState::initialize(&config)?;

    // 4. 啟動 HTTP 伺服器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
