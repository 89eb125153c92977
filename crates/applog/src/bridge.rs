//! Bridge from `tracing` into the logger registry
//!
//! Libraries instrumented with `tracing` emit events with a module-path
//! target (`db::pool`). [`RegistryLayer`] turns each event into a record on
//! the logger of the same dotted name (`db.pool`), so per-logger overrides
//! and the configured sinks apply to them too.

use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::domain::LogLevel;
use crate::registry::LoggerRegistry;

/// Events from this crate are never fed back into its own sinks
const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");

/// `tracing_subscriber` layer forwarding events to a [`LoggerRegistry`]
#[derive(Debug, Clone)]
pub struct RegistryLayer {
    registry: LoggerRegistry,
}

impl RegistryLayer {
    pub fn new(registry: LoggerRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &LoggerRegistry {
        &self.registry
    }
}

/// `a::b::c` -> `a.b.c`
pub fn logger_name_for_target(target: &str) -> String {
    target.replace("::", ".")
}

fn is_own_target(target: &str) -> bool {
    target == OWN_TARGET
        || target
            .strip_prefix(OWN_TARGET)
            .is_some_and(|rest| rest.starts_with("::"))
}

impl<S> Layer<S> for RegistryLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_own_target(metadata.target()) {
            return;
        }

        let logger = self
            .registry
            .logger(&logger_name_for_target(metadata.target()));
        let level = LogLevel::from(*metadata.level());
        if !logger.is_enabled_for(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        logger.log(level, visitor.finish());
    }
}

/// Collects the `message` field plus any other fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }

    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{}", value));
        }
    }
}
