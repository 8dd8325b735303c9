pub mod sender;

pub use sender::{parse_recipient, TelegramNotifier};
