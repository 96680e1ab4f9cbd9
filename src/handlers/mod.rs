pub mod webhook;

pub async fn hello() -> &'static str {
    "Hello from catatan-bot! 📒"
}
