use dormancy_lib::model::config::SleepConfig;
use dormancy_lib::model::controller::SleepController;
use dormancy_lib::model::scene::{ContactList, Scene};
use dormancy_lib::model::state::{ContextId, Velocities};
use dormancy_lib::model::SceneGraph;
use proptest::prelude::*;

prop_compose! {
    fn arb_pile()(count in 2usize..12)(
        sleeping in prop::collection::vec(any::<bool>(), count),
        pairs in prop::collection::vec((0..count, 0..count), 0..24)
    ) -> (Vec<bool>, Vec<(usize, usize)>) {
        (sleeping, pairs)
    }
}

fn build_pile(sleeping: &[bool], pairs: &[(usize, usize)]) -> (Scene, Vec<ContextId>) {
    let mut scene = Scene::new("root", 0.01);
    let root = scene.root();
    scene.set_contact_manager(Some(ContactList::default()));

    let bodies: Vec<ContextId> = sleeping
        .iter()
        .enumerate()
        .map(|(i, &asleep)| {
            let id = scene
                .add_body(&format!("body{i}"), root, Velocities::Vec3(vec![[0.0; 3]]))
                .unwrap();
            scene.set_sleeping(id, asleep);
            id
        })
        .collect();

    for &(a, b) in pairs {
        let contact = scene.touch(bodies[a], bodies[b]).unwrap();
        scene.add_contact(contact).unwrap();
    }
    (scene, bodies)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_wake_propagation_only_wakes((sleeping, pairs) in arb_pile()) {
        let (mut scene, bodies) = build_pile(&sleeping, &pairs);
        let mut controller = SleepController::new(SleepConfig::default());
        controller.init(&scene);

        let woken = controller.wake_up_nodes(&mut scene);

        for (i, &id) in bodies.iter().enumerate() {
            if !sleeping[i] {
                prop_assert!(!scene.is_sleeping(id), "awake body {} was put to sleep", i);
            }
        }
        for id in &woken {
            let i = bodies.iter().position(|b| b == id).unwrap();
            prop_assert!(sleeping[i], "body {} reported woken but was awake", i);
        }
    }

    #[test]
    fn test_no_sleeper_touches_awake_body((sleeping, pairs) in arb_pile()) {
        let (mut scene, bodies) = build_pile(&sleeping, &pairs);
        let mut controller = SleepController::new(SleepConfig::default());
        controller.init(&scene);

        controller.wake_up_nodes(&mut scene);

        for &(a, b) in &pairs {
            let (a, b) = (bodies[a], bodies[b]);
            prop_assert_eq!(scene.is_sleeping(a), scene.is_sleeping(b));
        }
    }

    #[test]
    fn test_wake_propagation_is_idempotent((sleeping, pairs) in arb_pile()) {
        let (mut scene, _) = build_pile(&sleeping, &pairs);
        let mut controller = SleepController::new(SleepConfig::default());
        controller.init(&scene);

        controller.wake_up_nodes(&mut scene);
        let second = controller.wake_up_nodes(&mut scene);

        prop_assert!(second.is_empty());
    }

    #[test]
    fn test_recently_woken_groups_stay_awake(
        steps in 0usize..9,
        count in 1usize..6
    ) {
        let mut scene = Scene::new("root", 0.01);
        let root = scene.root();
        for i in 0..count {
            scene
                .add_body(&format!("body{i}"), root, Velocities::Vec3(vec![[0.0; 3]]))
                .unwrap();
        }
        let mut controller = SleepController::new(SleepConfig {
            min_time_since_wake_up: 0.1,
            ..Default::default()
        });
        controller.init(&scene);

        for _ in 0..steps {
            controller.update_time_since_wake_up(&scene);
        }
        let asleep = controller.put_nodes_to_sleep(&mut scene);

        prop_assert!(asleep.is_empty());
        prop_assert_eq!(controller.registry().sleeping_count(&scene), 0);
    }

    #[test]
    fn test_empty_state_sleeps_for_any_positive_threshold(
        speed_threshold in 1e-9f64..10.0
    ) {
        let mut scene = Scene::new("root", 0.01);
        let root = scene.root();
        let empty = scene.add_body("empty", root, Velocities::Vec6(Vec::new())).unwrap();
        let mut controller = SleepController::new(SleepConfig {
            speed_threshold,
            min_time_since_wake_up: 0.0,
            ..Default::default()
        });
        controller.init(&scene);

        let asleep = controller.put_nodes_to_sleep(&mut scene);

        prop_assert_eq!(asleep, vec![empty]);
    }

    #[test]
    fn test_speed_above_threshold_keeps_awake(
        speed_threshold in 1e-6f64..1.0,
        excess in 1.0f64..100.0
    ) {
        let mut scene = Scene::new("root", 0.01);
        let root = scene.root();
        scene
            .add_body("fast", root, Velocities::Vec2(vec![[0.0, speed_threshold * excess]]))
            .unwrap();
        let mut controller = SleepController::new(SleepConfig {
            speed_threshold,
            min_time_since_wake_up: 0.0,
            ..Default::default()
        });
        controller.init(&scene);

        prop_assert!(controller.put_nodes_to_sleep(&mut scene).is_empty());
    }
}
