mod model;
mod repository;

pub use model::SyncStatusDB;
pub use repository::SyncStateRepository;
