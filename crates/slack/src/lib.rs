//! Slack interface for the tododo bot:
//! - **Slash Commands** (`commands`) - parsing, validation and routing for
//!   the `/tododo-*` command family
//! - **Block Kit** (`blocks`) - fixed-schema visual responses rendered as
//!   `{"blocks": [...]}` payloads
//!
//! The webhook transport lives in the server crate; this crate is pure
//! data-shaping and dispatch.

pub mod blocks;
pub mod commands;
