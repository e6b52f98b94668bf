//! Print worker
//!
//! Polls the order server for orders awaiting a receipt, prints each one,
//! then acknowledges it. The server keeps an order in the queue until the
//! acknowledgement lands, so a crash at any point is retried on the next
//! poll. The occasional duplicate receipt is the accepted cost of never
//! losing one.

use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::client::ApiClient;
use crate::config::BridgeConfig;
use crate::printer::{Printer, PrinterDevice};
use crate::receipt::ReceiptRenderer;

/// 列印工作者
pub struct PrintWorker {
    client: ApiClient,
    renderer: ReceiptRenderer,
    device: PrinterDevice,
    config: BridgeConfig,
}

impl PrintWorker {
    pub fn new(
        client: ApiClient,
        renderer: ReceiptRenderer,
        device: PrinterDevice,
        config: BridgeConfig,
    ) -> Self {
        Self {
            client,
            renderer,
            device,
            config,
        }
    }

    /// Run the poll loop forever
    pub async fn run(&self) {
        info!(
            interval_secs = self.config.poll_interval.as_secs(),
            "Print worker started"
        );

        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.poll_once().await;
        }
    }

    /// One poll cycle: fetch the queue and work through it
    pub async fn poll_once(&self) {
        let orders = match self.client.fetch_pending_print().await {
            Ok(orders) => orders,
            Err(e) => {
                error!("Failed to fetch pending orders: {e}");
                return;
            }
        };

        if orders.is_empty() {
            debug!("Print queue empty");
            return;
        }

        info!(count = orders.len(), "Processing print queue");

        for detail in &orders {
            let order_id = detail.order.id.as_str();
            let data = self.renderer.render(detail);

            if let Err(e) = self.device.print(&data).await {
                // Not acknowledged, stays in the queue for the next poll
                error!(order_id = %order_id, "Print failed: {e}");
                continue;
            }

            match self.client.mark_as_printed(order_id).await {
                Ok(()) => {
                    info!(
                        order_id = %order_id,
                        order_number = %detail.order.order_number,
                        "Receipt printed"
                    );
                }
                Err(e) => {
                    // Printed but not acknowledged, will print again next poll
                    warn!(order_id = %order_id, "Failed to acknowledge print: {e}");
                }
            }

            tokio::time::sleep(self.config.print_pacing).await;
        }
    }
}
