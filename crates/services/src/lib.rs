pub mod dao;
pub mod notify;
pub mod push;

pub use dao::*;
pub use notify::{
    DeviceTokenStore, DispatchError, DispatchSummary, NotificationDispatcher, NotificationRequest,
    NotificationStore, reconciler::FailureReconciler,
};
pub use push::{DeliveryFailure, DeliveryOutcome, PushError, PushMessage, PushTransport};
