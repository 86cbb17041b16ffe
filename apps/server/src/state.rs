//! Shared application state.

use std::sync::Arc;

use crosslist_core::events::AuditSink;
use crosslist_core::listings::ListingRepositoryTrait;
use crosslist_core::sync::{SyncOrchestrator, SyncStateRepositoryTrait};
use crosslist_marketplace::{CatalogSourceFactory, GatewayFactory};
use crosslist_storage_sqlite::audit::spawn_audit_sink;
use crosslist_storage_sqlite::db::{init, spawn_writer};
use crosslist_storage_sqlite::listings::ListingRepository;
use crosslist_storage_sqlite::sync::SyncStateRepository;

pub struct AppState {
    pub listings: Arc<dyn ListingRepositoryTrait>,
    pub sync_state: Arc<dyn SyncStateRepositoryTrait>,
    pub audit: Arc<dyn AuditSink>,
    pub catalog_factory: Arc<dyn CatalogSourceFactory>,
    pub orchestrator: SyncOrchestrator,
}

impl AppState {
    /// Opens the database, spawns the writer actor and audit drain, and
    /// wires the engine services.
    pub fn initialize(db_path: &str, gateway_url: &str) -> anyhow::Result<Self> {
        let pool = init(db_path)?;
        let writer = spawn_writer(pool.clone());

        let listings: Arc<dyn ListingRepositoryTrait> =
            Arc::new(ListingRepository::new(pool.clone(), writer.clone()));
        let sync_state: Arc<dyn SyncStateRepositoryTrait> =
            Arc::new(SyncStateRepository::new(pool.clone(), writer.clone()));
        let audit: Arc<dyn AuditSink> = Arc::new(spawn_audit_sink(writer));
        let catalog_factory: Arc<dyn CatalogSourceFactory> =
            Arc::new(GatewayFactory::new(gateway_url));

        let orchestrator = SyncOrchestrator::new(
            catalog_factory.clone(),
            listings.clone(),
            sync_state.clone(),
            audit.clone(),
        );

        Ok(Self {
            listings,
            sync_state,
            audit,
            catalog_factory,
            orchestrator,
        })
    }
}
