use backend::Backend;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub backend: Backend,
    pub config: AppConfig,
}
