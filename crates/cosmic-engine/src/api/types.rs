use bytemuck::{Pod, Zeroable};

/// Events the core raises for the presentation layer. The host reads
/// these once per tick and reacts (navigation on completion, a one-shot
/// full-surface flash overlay on explosion).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// The orbital transition finished; fired exactly once per run.
    TransitionComplete,
    /// The collision happened this tick; the host should flash.
    FlashRequested,
}

/// Flat encoding of a `SceneEvent` for the bridge buffer, mirroring the
/// 4-float event records the host-side reader expects.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct PackedEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl PackedEvent {
    pub const FLOATS: usize = 4;

    pub const KIND_TRANSITION_COMPLETE: f32 = 1.0;
    pub const KIND_FLASH_REQUESTED: f32 = 2.0;
}

impl From<SceneEvent> for PackedEvent {
    fn from(event: SceneEvent) -> Self {
        let kind = match event {
            SceneEvent::TransitionComplete => PackedEvent::KIND_TRANSITION_COMPLETE,
            SceneEvent::FlashRequested => PackedEvent::KIND_FLASH_REQUESTED,
        };
        PackedEvent {
            kind,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_pack_to_distinct_kinds() {
        let complete = PackedEvent::from(SceneEvent::TransitionComplete);
        let flash = PackedEvent::from(SceneEvent::FlashRequested);
        assert_ne!(complete.kind, flash.kind);
    }
}
