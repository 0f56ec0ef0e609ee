/// Service modules holding the run's business logic
pub mod birthday_service;

pub use birthday_service::BirthdayService;
