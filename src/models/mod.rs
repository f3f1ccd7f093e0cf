pub mod hiring_request;
pub mod notification;
pub mod principal;
pub mod submission;
