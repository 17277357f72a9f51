pub mod api;
pub mod api_router;
pub mod auth;
pub mod realtime;
pub mod shared;
pub mod storage;
