//! Tracker API
//!
//! Typed client for the remote tracker service and the transport seam it
//! sends through.
//!
//! | Call | Endpoint | Auth |
//! |---|---|---|
//! | `check_session` / `fetch_dashboard` | `GET /dashboard` | Bearer |
//! | `login` | `POST /login` | - |
//! | `register` | `POST /register` | - |
//! | `add_problem` | `POST /problems` | Bearer |
//! | `fetch_leaderboard` | `GET /leaderboard` | - |

mod client;
mod transport;

#[cfg(feature = "native")]
mod reqwest_transport;

#[cfg(test)]
pub(crate) mod stub;

pub use client::ApiClient;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

#[cfg(feature = "native")]
pub use reqwest_transport::ReqwestTransport;
