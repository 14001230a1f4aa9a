pub mod explodes;

// Re-export the subscription entry points
pub use explodes::{
    decode_subscription, explode_sub, explode_vless, LineParseError, SubscriptionPayload,
};
