//! Real-time notification events for subscribers (push bridge, UI feed)

pub mod dispatcher;
pub mod event_bus;
pub mod events;

pub use dispatcher::{EventBusDispatcher, NotificationDispatcher};
pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::{Event, EventMessage};
