#[cfg(test)]
mod tests {
    use std::f64::consts::{PI, TAU};

    use glam::{DQuat, DVec3};

    use skypatrol_core::components::AgentState;
    use skypatrol_core::config::AgentTuning;
    use skypatrol_core::enums::{BehaviorState, PatrolPattern};
    use skypatrol_core::math::{FrameRateMode, FORWARD};
    use skypatrol_core::types::{ObstacleSnapshot, Pose};

    use crate::fsm::{decide, evaluate, player_repulsion, AgentContext, Decision};
    use crate::patrol::{hover_offset, patrol_target};

    const DT: f64 = 1.0 / 60.0;

    fn patrol_state(pattern: PatrolPattern) -> AgentState {
        AgentState {
            patrol_angle: 0.0,
            patrol_speed: 0.2,
            patrol_height: 35.0,
            patrol_radius: 60.0,
            patrol_pattern: pattern,
            ..Default::default()
        }
    }

    fn context<'a>(
        position: DVec3,
        state: &'a AgentState,
        player: DVec3,
        obstacles: &'a [ObstacleSnapshot],
    ) -> AgentContext<'a> {
        AgentContext {
            pose: Pose::at(position),
            state,
            player_position: player,
            obstacles,
            dt: DT,
        }
    }

    fn far_player() -> DVec3 {
        DVec3::new(1000.0, 35.0, 1000.0)
    }

    // ---- Player avoidance ----

    #[test]
    fn test_player_repulsion_is_linear_in_penetration() {
        let push = player_repulsion(DVec3::new(10.0, 0.0, 0.0), DVec3::ZERO, 40.0).unwrap();
        assert!((push - DVec3::new(30.0, 0.0, 0.0)).length() < 1e-12);

        let edge = player_repulsion(DVec3::new(39.999, 0.0, 0.0), DVec3::ZERO, 40.0).unwrap();
        assert!(edge.length() < 0.01);

        assert!(player_repulsion(DVec3::new(40.0, 0.0, 0.0), DVec3::ZERO, 40.0).is_none());
    }

    #[test]
    fn test_player_repulsion_coincident_is_zero_not_nan() {
        let push = player_repulsion(DVec3::ONE, DVec3::ONE, 40.0).unwrap();
        assert_eq!(push, DVec3::ZERO);
    }

    #[test]
    fn test_avoid_player_moves_away_and_faces_player() {
        let tuning = AgentTuning::default();
        let state = patrol_state(PatrolPattern::Circle);
        let player = DVec3::new(0.0, 35.0, 0.0);
        let ctx = context(DVec3::new(20.0, 35.0, 0.0), &state, player, &[]);

        let update = evaluate(&ctx, &tuning, FrameRateMode::PerTick);
        assert_eq!(update.state.behavior, BehaviorState::AvoidingPlayer);
        assert!(update.state.is_avoiding);
        // push = 20 along +x, eased by 0.1.
        assert!((update.pose.position.x - 22.0).abs() < 1e-9);
        assert!((update.state.target_position.x - 40.0).abs() < 1e-9);

        // Orientation rotated part of the way toward facing -x.
        let forward = update.pose.orientation * FORWARD;
        assert!(forward.x < 0.0);
        assert!((update.pose.orientation.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_player_avoidance_takes_priority_over_obstacles() {
        let tuning = AgentTuning::default();
        let state = patrol_state(PatrolPattern::Circle);
        let position = DVec3::new(10.0, 10.0, 0.0); // below min height too
        let player = DVec3::new(0.0, 10.0, 0.0);
        let obstacles = [ObstacleSnapshot::new(DVec3::new(10.0, 5.0, 5.0), 10.0)];

        let with_obstacles = evaluate(
            &context(position, &state, player, &obstacles),
            &tuning,
            FrameRateMode::PerTick,
        );
        let player_only = evaluate(
            &context(position, &state, player, &[]),
            &tuning,
            FrameRateMode::PerTick,
        );

        assert_eq!(with_obstacles.state.behavior, BehaviorState::AvoidingPlayer);
        assert_eq!(with_obstacles.pose.position, player_only.pose.position);
        assert_eq!(with_obstacles.state.avoidance_vector, player_only.state.avoidance_vector);
        // Patrol angle untouched while avoiding.
        assert_eq!(with_obstacles.state.patrol_angle, state.patrol_angle);
    }

    // ---- Obstacle avoidance ----

    #[test]
    fn test_obstacles_blend_into_fixed_magnitude_push() {
        let tuning = AgentTuning::default();
        let state = patrol_state(PatrolPattern::Circle);
        let position = DVec3::new(0.0, 30.0, 0.0);
        let obstacles = [
            ObstacleSnapshot::new(DVec3::new(-5.0, 10.0, 0.0), 25.0),
            ObstacleSnapshot::new(DVec3::new(-10.0, 10.0, 3.0), 25.0),
        ];

        let ctx = context(position, &state, far_player(), &obstacles);
        match decide(&ctx, &tuning) {
            Decision::AvoidObstacles { push: Some(push), altitude_bound: None } => {
                assert!((push.length() - 2.0).abs() < 1e-12);
                assert!(push.x > 0.0, "push should point away from both obstacles");
                assert_eq!(push.y, 0.0);
            }
            other => panic!("unexpected decision {other:?}"),
        }

        let update = evaluate(&ctx, &tuning, FrameRateMode::PerTick);
        assert_eq!(update.state.behavior, BehaviorState::AvoidingObstacle);
        let moved = update.pose.position - position;
        assert!((moved.length() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_obstacle_well_below_is_ignored() {
        let tuning = AgentTuning::default();
        let state = patrol_state(PatrolPattern::Circle);
        // Roof at 20 + clearance 10 = 30; agent cruises at 35.
        let obstacles = [ObstacleSnapshot::new(DVec3::new(2.0, 10.0, 0.0), 20.0)];
        let ctx = context(DVec3::new(0.0, 35.0, 0.0), &state, far_player(), &obstacles);
        assert_eq!(decide(&ctx, &tuning), Decision::Patrol);
    }

    #[test]
    fn test_altitude_below_band_eases_up() {
        let tuning = AgentTuning::default();
        let state = patrol_state(PatrolPattern::Circle);
        let ctx = context(DVec3::new(0.0, 10.0, 0.0), &state, far_player(), &[]);

        let update = evaluate(&ctx, &tuning, FrameRateMode::PerTick);
        assert_eq!(update.state.behavior, BehaviorState::AvoidingObstacle);
        assert!((update.pose.position.y - 11.5).abs() < 1e-12);
        assert_eq!(update.pose.position.x, 0.0);
        assert_eq!(update.state.target_position.y, 25.0);
    }

    #[test]
    fn test_altitude_above_band_eases_down() {
        let tuning = AgentTuning::default();
        let state = patrol_state(PatrolPattern::Circle);
        let ctx = context(DVec3::new(0.0, 65.0, 0.0), &state, far_player(), &[]);
        let update = evaluate(&ctx, &tuning, FrameRateMode::PerTick);
        assert!((update.pose.position.y - 63.0).abs() < 1e-12);
    }

    #[test]
    fn test_push_and_altitude_combine_in_one_tick() {
        let tuning = AgentTuning::default();
        let state = patrol_state(PatrolPattern::Circle);
        let obstacles = [ObstacleSnapshot::new(DVec3::new(0.0, 5.0, 5.0), 10.0)];
        let ctx = context(DVec3::new(0.0, 15.0, 0.0), &state, far_player(), &obstacles);

        let update = evaluate(&ctx, &tuning, FrameRateMode::PerTick);
        // Pushed toward -z by 0.2 and up by 0.1 * (25 - 15).
        assert!((update.pose.position.z + 0.2).abs() < 1e-12);
        assert!((update.pose.position.y - 16.0).abs() < 1e-12);
    }

    // ---- Patrol ----

    #[test]
    fn test_circle_patrol_is_periodic() {
        for angle in [0.0, 0.7, 2.5, 5.9] {
            let a = patrol_target(PatrolPattern::Circle, DVec3::ZERO, 60.0, 30.0, angle);
            let b = patrol_target(PatrolPattern::Circle, DVec3::ZERO, 60.0, 30.0, angle + TAU);
            assert!((a - b).length() < 1e-9);
            assert!((DVec3::new(a.x, 0.0, a.z).length() - 60.0).abs() < 1e-9);
            assert_eq!(a.y, 30.0);
        }
    }

    #[test]
    fn test_circle_patrol_respects_center() {
        let center = DVec3::new(10.0, 99.0, -20.0);
        let p = patrol_target(PatrolPattern::Circle, center, 5.0, 30.0, 0.0);
        assert_eq!(p, DVec3::new(15.0, 30.0, -20.0));
    }

    #[test]
    fn test_figure8_crosses_center() {
        let origin_a = patrol_target(PatrolPattern::Figure8, DVec3::ZERO, 60.0, 30.0, 0.0);
        let origin_b = patrol_target(PatrolPattern::Figure8, DVec3::ZERO, 60.0, 30.0, PI);
        assert!(DVec3::new(origin_a.x, 0.0, origin_a.z).length() < 1e-9);
        assert!(DVec3::new(origin_b.x, 0.0, origin_b.z).length() < 1e-9);

        let lobe = patrol_target(PatrolPattern::Figure8, DVec3::ZERO, 60.0, 30.0, PI / 4.0);
        assert!((lobe.z - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_patrol_advances_angle_and_heads_along_path() {
        let tuning = AgentTuning::default();
        let state = patrol_state(PatrolPattern::Circle);
        let start = patrol_target(PatrolPattern::Circle, DVec3::ZERO, 60.0, 35.0, 0.0);
        let ctx = context(start, &state, far_player(), &[]);

        let update = evaluate(&ctx, &tuning, FrameRateMode::PerTick);
        assert_eq!(update.state.behavior, BehaviorState::Patrolling);
        assert!(!update.state.is_avoiding);
        assert!((update.state.patrol_angle - 0.2 * DT).abs() < 1e-15);
        // Circle moves toward +z at angle 0.
        assert!(update.pose.position.z > 0.0);
        let heading = update.state.target_rotation * FORWARD;
        assert!(heading.z > 0.9);
    }

    #[test]
    fn test_patrol_angle_is_monotonic() {
        let tuning = AgentTuning::default();
        let mut state = patrol_state(PatrolPattern::Figure8);
        let mut pose = Pose::at(DVec3::new(0.0, 35.0, 0.0));
        let mut last_angle = state.patrol_angle;
        for _ in 0..600 {
            let ctx = AgentContext {
                pose,
                state: &state,
                player_position: far_player(),
                obstacles: &[],
                dt: DT,
            };
            let update = evaluate(&ctx, &tuning, FrameRateMode::PerTick);
            assert!(update.state.patrol_angle > last_angle);
            last_angle = update.state.patrol_angle;
            pose = update.pose;
            state = update.state;
            assert!((pose.orientation.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_state_changed_flags_transitions_only() {
        let tuning = AgentTuning::default();
        let state = patrol_state(PatrolPattern::Circle);
        let player = DVec3::new(0.0, 35.0, 0.0);
        let ctx = context(DVec3::new(5.0, 35.0, 0.0), &state, player, &[]);
        let first = evaluate(&ctx, &tuning, FrameRateMode::PerTick);
        assert!(first.state_changed);

        let ctx = AgentContext {
            pose: first.pose,
            state: &first.state,
            player_position: player,
            obstacles: &[],
            dt: DT,
        };
        let second = evaluate(&ctx, &tuning, FrameRateMode::PerTick);
        assert!(!second.state_changed);
    }

    #[test]
    fn test_dt_scaled_mode_eases_less_on_short_frames() {
        let tuning = AgentTuning::default();
        let state = patrol_state(PatrolPattern::Circle);
        let ctx = AgentContext {
            pose: Pose::new(DVec3::new(0.0, 10.0, 0.0), DQuat::IDENTITY),
            state: &state,
            player_position: far_player(),
            obstacles: &[],
            dt: DT / 2.0,
        };
        let scaled = evaluate(&ctx, &tuning, FrameRateMode::DtScaled { reference_dt: DT });
        let per_tick = evaluate(&ctx, &tuning, FrameRateMode::PerTick);
        assert!(scaled.pose.position.y > 10.0);
        assert!(scaled.pose.position.y < per_tick.pose.position.y);
    }

    #[test]
    fn test_hover_offset_bounded_by_amplitude() {
        for i in 0..100 {
            let t = i as f64 * 0.37;
            assert!(hover_offset(t, 1.3, 0.05, 1.0).abs() <= 0.05 + 1e-15);
        }
        assert!((hover_offset(0.0, PI / 2.0, 0.05, 1.0) - 0.05).abs() < 1e-15);
    }
}
