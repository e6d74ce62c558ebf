use std::sync::Arc;

use rand::rngs::StdRng;
use tokio::sync::Mutex;

use crate::catalog::CatalogClient;
use crate::storage::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub catalog: Arc<dyn CatalogClient>,
    pub rng: Arc<Mutex<StdRng>>,

    /// Size of a random team
    pub sample_size: usize,
}
