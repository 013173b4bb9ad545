//! CustomFit Booking - Form Controller Core
//!
//! Client-side control flow of the tailoring booking page: field validation,
//! submit button busy state, the single booking request, and inline errors.
//! The crate never touches a document; hosts implement the [`dom`] traits.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │                          BOOKING CONTROLLER                           │
//! │                                                                       │
//! │  submit ──▶ in-flight? ──▶ hide banner ──▶ busy ──▶ validate          │
//! │                                                      │                │
//! │                                   ┌──── invalid ◀────┤                │
//! │                                   ▼                  ▼                │
//! │  ┌──────────────┐   show    ┌──────────────┐   POST /api/book         │
//! │  │ Error Banner │◀──────────│   restore    │◀── rejected / failed     │
//! │  │ (5s dismiss) │           │  busy state  │                          │
//! │  └──────────────┘           └──────────────┘   accepted ──▶ navigate  │
//! │                                                                       │
//! │  time change ──▶ business hours? ──▶ banner + clear input             │
//! └───────────────────────────────────────────────────────────────────────┘
//!         ▲                 ▲                 ▲                ▲
//!     dom traits        Transport         Scheduler          Clock
//! ```
//!
//! Everything is single-threaded: shared state lives in `Rc`/`Cell`/`RefCell`.

pub mod banner;
pub mod busy;
pub mod clock;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod schedule;
pub mod transport;
pub mod validation;

pub use banner::ErrorBanner;
pub use busy::{BusyState, SubmissionUi};
pub use clock::{Clock, FixedClock, LocalClock};
pub use config::BookingConfig;
pub use controller::{BookingController, PageHandles, Services, SubmitDisposition};
pub use error::{BookingError, Result, TransportError};
#[cfg(not(target_arch = "wasm32"))]
pub use schedule::TokioScheduler;
pub use schedule::{ManualScheduler, Scheduler, TimerHandle};
pub use transport::{FormPayload, ReqwestTransport, SubmissionOutcome, Transport, TransportResponse};
pub use validation::{BookingValidator, FieldSnapshot, Measurement, ValidationError};
