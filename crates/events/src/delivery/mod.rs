pub mod email;
pub mod sendgrid;
pub mod smtp;
