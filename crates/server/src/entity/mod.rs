pub mod blocked_ip;
pub mod telegram_admin;
pub mod visit;
