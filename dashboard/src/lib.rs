//! Headless core of the business-administration dashboard.
//!
//! This crate owns everything a CRUD screen needs except drawing it: the
//! REST adapter, per-resource dispatchers, list state with sorting and column
//! visibility, create forms with validation, the navigation tree and CSV
//! export. A front-end (the `backoffice` terminal binary, or any other)
//! renders [`list::TableProjection`]s and [`menu::NavMenu`]s and forwards
//! [`notify::Notice`]s to the user.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`http`] | [`http::Transport`] seam and its `reqwest` implementation |
//! | [`dispatch`] | Fetch-all and create calls for one resource |
//! | [`record`] | Opaque backend records keyed by id |
//! | [`list`] | Collection state, sort and visible columns |
//! | [`columns`] | Column descriptors, comparators and date rendering |
//! | [`form`] | Create form values, validation and submit state |
//! | [`page`] | Per-screen container wiring list, form and dispatcher |
//! | [`menu`] | Validated sidebar navigation tree |
//! | [`resource`] | Registry of resource screens |
//! | [`export`] | CSV export of a collection |
//! | [`notify`] | User-facing notices |
//! | [`config`] | Environment configuration |
//! | `testing` | Scripted [`http::Transport`] double (`test-util` feature) |

pub mod columns;
pub mod config;
pub mod dispatch;
pub mod export;
pub mod form;
pub mod http;
pub mod list;
pub mod menu;
pub mod notify;
pub mod page;
pub mod record;
pub mod resource;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use config::{Config, ConfigError};
pub use dispatch::{DispatchError, Dispatcher};
pub use http::{HttpClient, HttpError, Method, Transport};
pub use menu::{NavMenu, NavNode};
pub use notify::{Notice, NoticeLevel, Notifier};
pub use page::{CreatePolicy, ResourcePage, SubmitOutcome};
pub use record::{Record, RecordId};
pub use resource::{Registry, ResourceSpec};
