//! Printer transports
//!
//! Network printers speak raw TCP on port 9100. A console transport is
//! provided so the bridge can run without hardware attached.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::info;

use crate::error::{PrintError, PrintResult};

/// Printer abstraction
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw ESC/POS data to the printer
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the printer is reachable
    async fn is_online(&self) -> bool;
}

/// 網路印表機 (TCP 9100)
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    addr: SocketAddr,
    timeout: Duration,
}

impl NetworkPrinter {
    /// Create a printer from "host:port"
    pub fn new(addr: &str) -> PrintResult<Self> {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid printer address: {addr}")))?;
        Ok(Self {
            addr,
            timeout: Duration::from_secs(5),
        })
    }

    pub fn from_addr(addr: SocketAddr) -> Self {
        Self {
            addr,
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn connect(&self) -> PrintResult<TcpStream> {
        tokio::time::timeout(self.timeout, TcpStream::connect(self.addr))
            .await
            .map_err(|_| PrintError::Timeout(format!("Connect to {} timed out", self.addr)))?
            .map_err(|e| PrintError::Connection(format!("{}: {e}", self.addr)))
    }
}

impl Printer for NetworkPrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        let mut stream = self.connect().await?;
        stream.write_all(data).await?;
        stream.flush().await?;
        Ok(())
    }

    async fn is_online(&self) -> bool {
        self.connect().await.is_ok()
    }
}

/// 主控台輸出（無硬體時使用）
#[derive(Debug, Clone, Default)]
pub struct ConsolePrinter;

impl Printer for ConsolePrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        info!(bytes = data.len(), "Console printer output:");
        info!("\n{}", String::from_utf8_lossy(data));
        Ok(())
    }

    async fn is_online(&self) -> bool {
        true
    }
}

/// Runtime-selected printer transport
#[derive(Debug, Clone)]
pub enum PrinterDevice {
    Network(NetworkPrinter),
    Console(ConsolePrinter),
}

impl Printer for PrinterDevice {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        match self {
            Self::Network(p) => p.print(data).await,
            Self::Console(p) => p.print(data).await,
        }
    }

    async fn is_online(&self) -> bool {
        match self {
            Self::Network(p) => p.is_online().await,
            Self::Console(p) => p.is_online().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_printer_parses_addr() {
        let printer = NetworkPrinter::new("192.168.1.50:9100").unwrap();
        assert_eq!(printer.addr.port(), 9100);
    }

    #[test]
    fn test_network_printer_rejects_bad_addr() {
        assert!(NetworkPrinter::new("not-an-address").is_err());
    }

    #[tokio::test]
    async fn test_console_printer_always_succeeds() {
        let printer = ConsolePrinter;
        assert!(printer.is_online().await);
        assert!(printer.print(b"hello").await.is_ok());
    }
}
