use crate::broadcast::BroadcastHub;
use crate::core::Config;
use crate::db::repository::{MemberRepository, OrderRepository, ProductRepository};
use crate::db::{Store, StoreResult};
use crate::orders::OrderPipeline;

/// Shared server state, one instance cloned into every handler
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | Immutable configuration |
/// | store | Embedded redb database |
/// | hub | Realtime viewer fan-out |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Store,
    pub hub: BroadcastHub,
}

impl ServerState {
    /// Initialize state for production: on-disk database under work_dir
    pub fn initialize(config: &Config) -> StoreResult<Self> {
        std::fs::create_dir_all(&config.work_dir).map_err(|err| {
            redb::DatabaseError::Storage(redb::StorageError::Io(err))
        })?;

        let store = Store::open(config.database_path())?;
        Ok(Self::with_store(config.clone(), store))
    }

    /// Build state around an existing store (tests use an in-memory one)
    pub fn with_store(config: Config, store: Store) -> Self {
        let hub = BroadcastHub::new(config.broadcast_capacity);
        Self { config, store, hub }
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.store.clone())
    }

    pub fn members(&self) -> MemberRepository {
        MemberRepository::new(self.store.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.store.clone())
    }

    pub fn pipeline(&self) -> OrderPipeline {
        OrderPipeline::new(
            self.products(),
            self.members(),
            self.orders(),
            self.hub.clone(),
        )
    }
}
