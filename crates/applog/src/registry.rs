//! Logger registry - named, hierarchical loggers
//!
//! Loggers are keyed by dotted name (`services.issue_service`). Looking a
//! name up creates the logger on first use; later lookups share it. A
//! logger without its own level inherits the level of its nearest existing
//! ancestor, ending at the root.
//!
//! Records travel from the originating logger up through its ancestors,
//! handing themselves to every sink on the way, until a logger with
//! propagation disabled is reached. The root may in turn sit below a logger
//! of another registry (see [`LoggerRegistry::attach_upstream`]).

use dashmap::DashMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::warn;

use crate::domain::{LogLevel, LogRecord};
use crate::sink::Sink;

/// Name of the root logger, as it shows up in formatted lines
pub const ROOT_LOGGER: &str = "root";

/// Level of the root logger before anything configures it
pub const DEFAULT_ROOT_LEVEL: LogLevel = LogLevel::Warning;

static GLOBAL: OnceLock<LoggerRegistry> = OnceLock::new();

struct LoggerNode {
    name: String,
    level: RwLock<Option<LogLevel>>,
    sinks: RwLock<Vec<Arc<dyn Sink>>>,
    propagate: AtomicBool,
}

impl LoggerNode {
    fn new(name: impl Into<String>, level: Option<LogLevel>) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(level),
            sinks: RwLock::new(Vec::new()),
            propagate: AtomicBool::new(true),
        }
    }

    fn handle(&self, record: &LogRecord) {
        // Snapshot so no lock is held while sinks do I/O
        let sinks: Vec<Arc<dyn Sink>> = self.sinks.read().clone();
        for sink in sinks {
            sink.handle(record);
        }
    }
}

struct RegistryInner {
    root: Arc<LoggerNode>,
    loggers: DashMap<String, Arc<LoggerNode>>,
    upstream: RwLock<Option<Logger>>,
}

/// Handle to a logger registry; clones share the same loggers
#[derive(Clone)]
pub struct LoggerRegistry {
    inner: Arc<RegistryInner>,
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerRegistry {
    /// Create an isolated registry with an unconfigured root
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                root: Arc::new(LoggerNode::new(ROOT_LOGGER, Some(DEFAULT_ROOT_LEVEL))),
                loggers: DashMap::new(),
                upstream: RwLock::new(None),
            }),
        }
    }

    /// The process-wide registry
    pub fn global() -> &'static LoggerRegistry {
        GLOBAL.get_or_init(LoggerRegistry::new)
    }

    pub fn root(&self) -> Logger {
        Logger {
            node: self.inner.root.clone(),
            registry: self.clone(),
        }
    }

    /// Look up a logger by dotted name, creating it if needed.
    ///
    /// An empty name or `root` yields the root logger.
    pub fn logger(&self, name: &str) -> Logger {
        if name.is_empty() || name == ROOT_LOGGER {
            return self.root();
        }

        let node = self
            .inner
            .loggers
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(LoggerNode::new(name, None)))
            .clone();

        Logger {
            node,
            registry: self.clone(),
        }
    }

    /// Whether a logger with this name has been looked up before
    pub fn contains(&self, name: &str) -> bool {
        name.is_empty() || name == ROOT_LOGGER || self.inner.loggers.contains_key(name)
    }

    /// Names of every non-root logger created so far, sorted
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .inner
            .loggers
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Place this registry's root below `parent`.
    ///
    /// Records that leave the root (propagation enabled) continue at
    /// `parent` and its ancestors. Attaching is refused if it would make
    /// the chain loop back to this registry.
    pub fn attach_upstream(&self, parent: Logger) -> bool {
        if parent.registry.reaches(self) {
            warn!(
                "Refusing to attach logger registry below {:?}: would form a cycle",
                parent.name()
            );
            return false;
        }
        *self.inner.upstream.write() = Some(parent);
        true
    }

    pub fn detach_upstream(&self) -> Option<Logger> {
        self.inner.upstream.write().take()
    }

    pub fn upstream(&self) -> Option<Logger> {
        self.inner.upstream.read().clone()
    }

    fn same(&self, other: &LoggerRegistry) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// True if `target` is this registry or one of its upstreams
    fn reaches(&self, target: &LoggerRegistry) -> bool {
        let mut current = Some(self.clone());
        while let Some(registry) = current {
            if registry.same(target) {
                return true;
            }
            current = registry.upstream().map(|logger| logger.registry);
        }
        false
    }

    /// Existing ancestors of `name`, nearest first, excluding the root
    fn ancestors(&self, name: &str) -> Vec<Arc<LoggerNode>> {
        let mut found = Vec::new();
        let mut rest = name;
        while let Some((parent, _)) = rest.rsplit_once('.') {
            if let Some(node) = self.inner.loggers.get(parent) {
                found.push(node.clone());
            }
            rest = parent;
        }
        found
    }

    /// `node`, its existing ancestors, then the root
    fn chain(&self, node: &Arc<LoggerNode>) -> Vec<Arc<LoggerNode>> {
        if Arc::ptr_eq(node, &self.inner.root) {
            return vec![node.clone()];
        }
        let mut chain = vec![node.clone()];
        chain.extend(self.ancestors(&node.name));
        chain.push(self.inner.root.clone());
        chain
    }

    fn effective_level(&self, node: &Arc<LoggerNode>) -> LogLevel {
        self.chain(node)
            .iter()
            .find_map(|n| *n.level.read())
            .unwrap_or(DEFAULT_ROOT_LEVEL)
    }

    fn dispatch(&self, origin: &Arc<LoggerNode>, record: &LogRecord) {
        let mut registry = self.clone();
        let mut node = origin.clone();

        loop {
            for current in registry.chain(&node) {
                current.handle(record);
                if !current.propagate.load(Ordering::Relaxed) {
                    return;
                }
            }

            match registry.upstream() {
                Some(parent) => {
                    node = parent.node;
                    registry = parent.registry;
                }
                None => return,
            }
        }
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("loggers", &self.inner.loggers.len())
            .field("upstream", &self.upstream().map(|l| l.name().to_string()))
            .finish()
    }
}

/// Handle to a named logger
#[derive(Clone)]
pub struct Logger {
    node: Arc<LoggerNode>,
    registry: LoggerRegistry,
}

impl Logger {
    pub fn name(&self) -> &str {
        &self.node.name
    }

    pub fn is_root(&self) -> bool {
        Arc::ptr_eq(&self.node, &self.registry.inner.root)
    }

    /// Explicit level, if one was set on this logger
    pub fn level(&self) -> Option<LogLevel> {
        *self.node.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.node.level.write() = Some(level);
    }

    /// Go back to inheriting the level. The root always keeps one.
    pub fn clear_level(&self) {
        if !self.is_root() {
            *self.node.level.write() = None;
        }
    }

    pub fn effective_level(&self) -> LogLevel {
        self.registry.effective_level(&self.node)
    }

    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= self.effective_level()
    }

    pub fn add_sink(&self, sink: Arc<dyn Sink>) {
        self.node.sinks.write().push(sink);
    }

    /// Detach every sink; returns how many were removed
    pub fn clear_sinks(&self) -> usize {
        let mut sinks = self.node.sinks.write();
        let removed = sinks.len();
        sinks.clear();
        removed
    }

    pub fn sink_count(&self) -> usize {
        self.node.sinks.read().len()
    }

    pub fn propagate(&self) -> bool {
        self.node.propagate.load(Ordering::Relaxed)
    }

    pub fn set_propagate(&self, propagate: bool) {
        self.node.propagate.store(propagate, Ordering::Relaxed);
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.is_enabled_for(level) {
            return;
        }
        let record = LogRecord::new(level, self.name(), message);
        self.registry.dispatch(&self.node, &record);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, message);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("level", &self.level())
            .field("sinks", &self.sink_count())
            .field("propagate", &self.propagate())
            .finish()
    }
}
