// Application state for HTTP handlers
use crate::application::profile_service::ProfileService;

#[derive(Clone)]
pub struct AppState {
    pub profile_service: ProfileService,
}
