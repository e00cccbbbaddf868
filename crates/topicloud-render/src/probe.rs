/// Reports whether the word-cloud layout can run in the current environment.
///
/// Probes are passed to each [`TopicCloud`](crate::TopicCloud) construction and consulted every
/// time, so tests and embedders can swap them freely.
pub trait CapabilityProbe {
    fn is_supported(&self) -> bool;
}

impl<F> CapabilityProbe for F
where
    F: Fn() -> bool,
{
    fn is_supported(&self) -> bool {
        self()
    }
}

/// The built-in layout is pure Rust and always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessProbe;

impl CapabilityProbe for HeadlessProbe {
    fn is_supported(&self) -> bool {
        true
    }
}
