mod console;
mod mail;

pub use console::LogNotifier;
pub use mail::MailApiNotifier;
