pub mod account_dto;
pub mod hiring_dto;
pub mod notification_dto;
pub mod submission_dto;
