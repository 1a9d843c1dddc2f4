pub mod activity;
pub mod balance;
pub mod employee;
pub mod leave;
pub mod notification;

// Re-export all repositories for easy importing
pub use activity::ActivityRepository;
pub use balance::LeaveBalanceRepository;
pub use employee::EmployeeRepository;
pub use leave::LeaveRepository;
pub use notification::NotificationRepository;
