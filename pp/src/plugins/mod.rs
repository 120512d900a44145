//! Built-in plugins
//!
//! | category  | name      | behavior                          |
//! |-----------|-----------|-----------------------------------|
//! | source    | `hello`   | emits "Hello World"               |
//! | source    | `msg`     | emits "Msg Send"                  |
//! | transform | `upper`   | uppercases every body record      |
//! | transform | `noop`    | passes messages through           |
//! | sink      | `console` | prints one line per message       |
//!
//! [`MemorySink`] is exported but not registered; it needs a caller-owned
//! [`Delivered`] handle.

mod sink;
mod source;
mod transform;

pub use sink::{ConsoleSink, Delivered, MemorySink, OutputFormat};
pub use source::LiteralSource;
pub use transform::{NoopTransform, UpperTransform};

use tracing::debug;

use crate::registry::Registry;

/// Register every built-in plugin into `registry`, with `console` rendering
/// in `format`
pub fn register_builtins(registry: &mut Registry, format: OutputFormat) {
    debug!(?format, "register_builtins: called");
    registry.register_source(LiteralSource::HELLO, || Box::new(LiteralSource::hello()));
    registry.register_source(LiteralSource::MSG, || Box::new(LiteralSource::msg()));

    registry.register_transform(UpperTransform::NAME, || Box::new(UpperTransform::new()));
    registry.register_transform(NoopTransform::NAME, || Box::new(NoopTransform::new()));

    registry.register_sink(ConsoleSink::NAME, move || Box::new(ConsoleSink::stdout(format)));
}
