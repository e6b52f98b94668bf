//! 出單橋接器
//!
//! Sits between the order server and the shop's thermal printer. Polls the
//! pending-print queue over HTTP, renders each order as a Big5 ESC/POS
//! receipt, sends it to the printer, and acknowledges the print back to
//! the server.

pub mod client;
pub mod config;
pub mod encoding;
pub mod error;
pub mod escpos;
pub mod printer;
pub mod receipt;
pub mod worker;

pub use client::ApiClient;
pub use config::BridgeConfig;
pub use error::{BridgeError, BridgeResult, PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use printer::{ConsolePrinter, NetworkPrinter, Printer, PrinterDevice};
pub use receipt::ReceiptRenderer;
pub use worker::PrintWorker;
