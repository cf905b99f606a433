use crate::config::SleepConfig;
use crate::host::SceneGraph;
use crate::registry::SleepableRegistry;
use dormancy_data::ContextId;

/// Puts to sleep every awake tracked group that has been awake long enough
/// and whose velocities are under the thresholds.
///
/// A single pass in tracked order; each group is judged on its own state.
/// Returns the groups that fell asleep.
pub fn put_groups_to_sleep<S: SceneGraph + ?Sized>(
    registry: &SleepableRegistry,
    scene: &mut S,
    config: &SleepConfig,
) -> Vec<ContextId> {
    let mut asleep = Vec::new();

    for group in registry.groups() {
        if scene.is_sleeping(group.context)
            || group.time_since_wake_up < config.min_time_since_wake_up
        {
            continue;
        }

        let wants_to_sleep = scene.velocities(group.context).is_some_and(|v| {
            group
                .tester
                .wants_to_sleep(v, config.speed_threshold, config.rotation_threshold)
        });
        if !wants_to_sleep {
            continue;
        }

        scene.set_sleeping(group.context, true);
        asleep.push(group.context);

        if config.verbose {
            tracing::info!("Put node {} to sleep", scene.name(group.context));
        } else {
            tracing::debug!(context = %group.context, "Put node {} to sleep", scene.name(group.context));
        }
    }

    asleep
}
