use crate::locator::LocationFinder;
use std::sync::Mutex;

pub struct AppState {
    pub finder: Mutex<LocationFinder>,
}
