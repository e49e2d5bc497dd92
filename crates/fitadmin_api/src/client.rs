use std::sync::Arc;

use auth_client::{ApiClient, Config, SessionObserver, TokenStore};

use crate::auth::AuthApi;
use crate::dashboard::DashboardApi;
use crate::dishes::DishesApi;
use crate::exercises::ExercisesApi;
use crate::menus::MenusApi;
use crate::users::UsersApi;

/// One client per backend; hands out the feature APIs sharing a single
/// authenticated pipeline (and therefore a single refresh coordinator).
pub struct FitAdminClient {
    auth: AuthApi,
    users: UsersApi,
    dishes: DishesApi,
    exercises: ExercisesApi,
    menus: MenusApi,
    dashboard: DashboardApi,
}

impl FitAdminClient {
    pub fn new(
        config: &Config,
        store: Arc<dyn TokenStore>,
        observer: Arc<dyn SessionObserver>,
    ) -> anyhow::Result<Self> {
        let api = Arc::new(ApiClient::new(config, store, observer)?);
        Ok(FitAdminClient {
            auth: AuthApi::new(Arc::clone(&api)),
            users: UsersApi::new(Arc::clone(&api)),
            dishes: DishesApi::new(Arc::clone(&api)),
            exercises: ExercisesApi::new(Arc::clone(&api)),
            menus: MenusApi::new(Arc::clone(&api)),
            dashboard: DashboardApi::new(api),
        })
    }

    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    pub fn users(&self) -> &UsersApi {
        &self.users
    }

    pub fn dishes(&self) -> &DishesApi {
        &self.dishes
    }

    pub fn exercises(&self) -> &ExercisesApi {
        &self.exercises
    }

    pub fn menus(&self) -> &MenusApi {
        &self.menus
    }

    pub fn dashboard(&self) -> &DashboardApi {
        &self.dashboard
    }
}
