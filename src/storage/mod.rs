//! Tenant-scoped persistence gateway.
//!
//! Every function here is a synchronous diesel call over a pooled
//! connection; async handlers wrap them in `spawn_blocking`. Reads take
//! the caller's client id and return only matching rows — the
//! authorization boundary lives upstream, this layer trusts its caller.

pub mod action_items;
pub mod activities;
pub mod call_agents;
pub mod clients;
pub mod comments;
pub mod files;
pub mod metrics;
pub mod users;

pub use action_items::{get_action_items, insert_action_item, toggle_action_item};
pub use activities::{get_activities, insert_activity};
pub use call_agents::{get_call_agents, upsert_call_agent};
pub use clients::{create_client, get_client, get_client_by_subdomain, update_client};
pub use comments::{get_comments, insert_comment};
pub use files::{delete_file, get_file, get_files, insert_file};
pub use metrics::{get_metrics, insert_metric, insert_metrics};
pub use users::{get_user, upsert_user};
