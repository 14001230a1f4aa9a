pub mod common;
pub mod vless;

pub use common::{decode_subscription, explode_sub, SubscriptionPayload};
pub use vless::{explode_vless, LineParseError};
