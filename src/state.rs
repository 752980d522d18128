use crate::dataset::Dataset;
use crate::session::Session;
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub dataset: Option<Arc<Dataset>>,
    pub poll_every: Duration,
}

impl AppState {
    pub fn new(session: Session, dataset: Option<Dataset>, poll_every: Duration) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            dataset: dataset.map(Arc::new),
            poll_every,
        }
    }
}
