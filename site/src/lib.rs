//! Waves marketing site page behaviors
//!
//! Navigation, scroll effects, entrance animations, stat counters, form
//! validation, accessibility helpers, swipe navigation, app download
//! routing and analytics for the Waves static pages.
//!
//! The browser is reached only through two ports: [`Dom`] for the document
//! tree and [`Host`] for window services. [`SiteController`] is built
//! explicitly from both and driven by event calls carrying the time since
//! page start, so the whole layer runs headless against [`MemoryDom`] and
//! [`RecordingHost`].

pub mod analytics;
pub mod controller;
pub mod counter;
pub mod device;
pub mod dom;
pub mod error;
pub mod forms;
pub mod gestures;
pub mod host;
pub mod page;
pub mod timing;

pub use controller::{Platform, SiteController, UiState};
pub use device::{Capabilities, DeviceProfile, FixedCapabilities, UserAgentCapabilities};
pub use dom::{Dom, MemoryDom, NodeId};
pub use error::{SiteError, SubmitError};
pub use forms::{FormSubmission, FormTransport, PendingSubmission, SimulatedTransport};
pub use host::{Host, IntersectionEntry, ObserverKind, RecordingHost, ScrollBehavior};
pub use page::Page;
