use crate::host::SceneGraph;
use crate::registry::SleepableRegistry;

/// Advances the time-since-wake-up of every tracked group by its context's
/// time step, or zeroes it when the group ended the step asleep.
pub fn update_time_since_wake_up<S: SceneGraph + ?Sized>(
    registry: &mut SleepableRegistry,
    scene: &S,
) {
    for group in registry.groups_mut() {
        if scene.is_sleeping(group.context) {
            group.time_since_wake_up = 0.0;
        } else {
            group.time_since_wake_up += scene.dt(group.context);
        }
    }
}
