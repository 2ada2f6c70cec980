use crate::{db::TripStore, services::trips::TripRepository};

#[derive(Debug, Clone)]
pub struct AppState {
    pub trips: TripRepository,
}

impl AppState {
    pub fn new(store: TripStore) -> Self {
        Self {
            trips: TripRepository::new(store),
        }
    }
}
