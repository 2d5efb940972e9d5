pub mod notifications_model;
pub mod notifications_repository;
pub mod notifications_service;
pub mod notifications_traits;

#[cfg(test)]
mod notifications_service_tests;

pub use notifications_model::{NewNotification, Notification, NotificationType};
pub use notifications_repository::NotificationRepository;
pub use notifications_service::NotificationService;
pub use notifications_traits::{NotificationRepositoryTrait, NotificationServiceTrait};
