//! Outbound notification delivery for unlock events.
//!
//! Currently one channel: HTTP webhooks ([`WebhookNotifier`]). Each
//! newly discovered unlock is posted to every registered target with
//! per-target failure isolation.

pub mod webhook;

pub use webhook::{DeliveryReport, WebhookNotifier};
