pub mod hiring_service;
pub mod notification_service;
pub mod principal_service;
pub mod submission_service;
