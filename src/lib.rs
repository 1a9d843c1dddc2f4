pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

pub use config::Config;
pub use database::repositories::{
    ActivityRepository, EmployeeRepository, LeaveBalanceRepository, LeaveRepository,
    NotificationRepository,
};
pub use services::{AuthService, LeavePolicy, Notifier};

pub struct AppState {
    pub auth_service: AuthService,
}
