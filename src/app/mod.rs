pub mod serve;

// re-export
pub use serve::serve;

use std::{net::SocketAddr, sync::Arc};

use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    config::{AppConfig, StoreBackend},
    database::DbManager,
    model::{MemorySubscriberStore, PgSubscriberStore, SubscriberStore},
    templ_manager::TemplateManager,
    Result,
};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    pub async fn build_from_config(config: &AppConfig) -> Result<Self> {
        let store: Box<dyn SubscriberStore> = match config.store_backend {
            StoreBackend::Postgres => {
                let dm = DbManager::init(&config.db_config).await?;
                Box::new(PgSubscriberStore::new(dm.db().clone()))
            }
            StoreBackend::Memory => {
                warn!("{:<20} - Subscribers are kept in memory only", "store");
                Box::new(MemorySubscriberStore::new())
            }
        };
        let tm = TemplateManager::init().map_err(crate::web::Error::from)?;

        let app_state = AppState::new(store, tm);

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        Ok(App::new(app_state, listener))
    }
}

pub struct InternalState {
    pub store: Box<dyn SubscriberStore>,
    pub templ_mgr: TemplateManager,
}

/// Application state shared by every handler.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(store: Box<dyn SubscriberStore>, templ_mgr: TemplateManager) -> Self {
        AppState(Arc::new(InternalState { store, templ_mgr }))
    }
}
