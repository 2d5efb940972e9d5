use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use epms_core::{
    db,
    goals::{GoalRepository, GoalService, GoalServiceTrait},
    notifications::{NotificationRepository, NotificationService, NotificationServiceTrait},
    reviews::{ReviewRepository, ReviewService, ReviewServiceTrait},
    users::{UserRepository, UserService, UserServiceTrait},
};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub review_service: Arc<dyn ReviewServiceTrait>,
    pub notification_service: Arc<dyn NotificationServiceTrait>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let goal_repo = Arc::new(GoalRepository::new(pool.clone()));
    let review_repo = Arc::new(ReviewRepository::new(pool.clone()));
    let notification_repo = Arc::new(NotificationRepository::new(pool.clone()));

    // The notification store doubles as the sink for goal lifecycle events
    let notification_service = Arc::new(NotificationService::new(notification_repo));

    let user_service = Arc::new(UserService::new(user_repo.clone()));
    let goal_service = Arc::new(GoalService::new(
        goal_repo.clone(),
        user_repo.clone(),
        notification_service.clone(),
    ));
    let review_service = Arc::new(ReviewService::new(review_repo, goal_repo));

    Ok(Arc::new(AppState {
        user_service,
        goal_service,
        review_service,
        notification_service,
    }))
}
