//! Player control systems
//!
//! Held buttons become an [`Intent`], and an intent becomes velocity and
//! state tags for anything with [`MovementAbility`]. Badnik AI can write
//! intents directly and skip the first step.

use crate::components::{Input, Intent, IntentState, JumpingTag, MovementAbility, PowerupKind, RollingTag, TemporaryPowerup};
use crate::config::{PlayerConfig, PowerupConfig};
use crate::context::RunnerContext;
use arcade_engine::ecs::components::Velocity;
use arcade_engine::ecs::{EcsError, Entity, Query, System, SystemPhase, World};

/// Turns held buttons into an intent
///
/// Jump wins over roll, roll wins over running. Both directions held
/// cancel out.
#[derive(Debug, Default)]
pub struct IntentSystem;

impl IntentSystem {
    /// System name in schedules
    pub const NAME: &'static str = "intent";

    /// Create the system
    pub const fn new() -> Self {
        Self
    }

    /// Intent for one set of held buttons
    pub const fn interpret(input: Input) -> IntentState {
        if input.jump_pressed {
            IntentState::Jump
        } else if input.roll_pressed {
            IntentState::Roll
        } else {
            match (input.left_pressed, input.right_pressed) {
                (true, false) => IntentState::MoveLeft,
                (false, true) => IntentState::MoveRight,
                _ => IntentState::None,
            }
        }
    }

    fn update(world: &mut World) {
        for entity in world.query(&Query::new().with::<Input>().with::<Intent>()) {
            let input = *world.component::<Input>(entity);
            world.component_mut::<Intent>(entity).current = Self::interpret(input);
        }
    }
}

impl System<RunnerContext> for IntentSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::PreUpdate
    }

    fn run(&mut self, world: &mut World, _context: &mut RunnerContext) -> Result<(), EcsError> {
        Self::update(world);
        Ok(())
    }
}

/// Applies intents to velocity, jumping and rolling
#[derive(Debug)]
pub struct ActionSystem {
    run_speed: f32,
    jump_speed: f32,
    boost_factor: f32,
}

impl ActionSystem {
    /// System name in schedules
    pub const NAME: &'static str = "action";

    /// Create the system
    pub const fn new(player: PlayerConfig, powerups: PowerupConfig) -> Self {
        Self {
            run_speed: player.run_speed,
            jump_speed: player.jump_speed,
            boost_factor: powerups.speed_boost_factor,
        }
    }

    fn speed_for(&self, world: &World, entity: Entity) -> f32 {
        let boosted = world
            .get_component::<TemporaryPowerup>(entity)
            .is_some_and(|powerup| powerup.is(PowerupKind::SpeedBoost));
        if boosted {
            self.run_speed * self.boost_factor
        } else {
            self.run_speed
        }
    }

    /// Apply every intent once
    pub fn act(&self, world: &mut World) -> Result<(), EcsError> {
        let query = Query::new().with::<MovementAbility>().with::<Intent>().with::<Velocity>();
        for entity in world.query(&query) {
            let intent = world.component::<Intent>(entity).current;
            let rolling = world.has_component::<RollingTag>(entity);
            let speed = self.speed_for(world, entity);

            match intent {
                IntentState::MoveLeft | IntentState::MoveRight => {
                    let direction = if intent == IntentState::MoveLeft { -1.0 } else { 1.0 };
                    world.component_mut::<Velocity>(entity).x = direction * speed;
                    world.remove_component::<RollingTag>(entity);
                }
                IntentState::Jump => {
                    if !world.has_component::<JumpingTag>(entity) {
                        world.component_mut::<Velocity>(entity).y = -self.jump_speed;
                        world.add_component(entity, JumpingTag)?;
                        log::trace!("Entity {} jumped", entity);
                    }
                }
                IntentState::Roll => {
                    if !rolling {
                        world.add_component(entity, RollingTag)?;
                    }
                }
                IntentState::None => {
                    if !rolling {
                        world.component_mut::<Velocity>(entity).x = 0.0;
                    } else if world.component::<Velocity>(entity).x.abs() < f32::EPSILON {
                        world.remove_component::<RollingTag>(entity);
                    }
                }
            }
        }
        Ok(())
    }
}

impl System<RunnerContext> for ActionSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::PreUpdate
    }

    fn dependencies(&self) -> &[&'static str] {
        &[IntentSystem::NAME]
    }

    fn run(&mut self, world: &mut World, _context: &mut RunnerContext) -> Result<(), EcsError> {
        self.act(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunnerConfig;
    use crate::factories::RunnerFactory;
    use approx::assert_relative_eq;

    fn setup() -> (World, Entity, ActionSystem) {
        let config = RunnerConfig::default();
        let mut world = World::new();
        let sonic = RunnerFactory::new(config).create_sonic(&mut world, 100.0, 512.0).unwrap();
        (world, sonic, ActionSystem::new(config.player, config.powerups))
    }

    fn act_on(world: &mut World, entity: Entity, system: &ActionSystem, intent: IntentState) {
        world.component_mut::<Intent>(entity).current = intent;
        system.act(world).unwrap();
    }

    #[test]
    fn test_intent_priority() {
        let all = Input {
            left_pressed: true,
            right_pressed: false,
            jump_pressed: true,
            roll_pressed: true,
        };
        assert_eq!(IntentSystem::interpret(all), IntentState::Jump);
        assert_eq!(
            IntentSystem::interpret(Input {
                jump_pressed: false,
                ..all
            }),
            IntentState::Roll
        );
        assert_eq!(
            IntentSystem::interpret(Input {
                left_pressed: true,
                right_pressed: true,
                ..Input::default()
            }),
            IntentState::None
        );
    }

    #[test]
    fn test_run_and_stop() {
        let (mut world, sonic, system) = setup();
        act_on(&mut world, sonic, &system, IntentState::MoveLeft);
        assert_relative_eq!(world.component::<Velocity>(sonic).x, -4.0);

        act_on(&mut world, sonic, &system, IntentState::None);
        assert_relative_eq!(world.component::<Velocity>(sonic).x, 0.0);
    }

    #[test]
    fn test_speed_boost_multiplies_run_speed() {
        let (mut world, sonic, system) = setup();
        *world.component_mut::<TemporaryPowerup>(sonic) = TemporaryPowerup::new(PowerupKind::SpeedBoost, 10);
        act_on(&mut world, sonic, &system, IntentState::MoveRight);
        assert_relative_eq!(world.component::<Velocity>(sonic).x, 8.0);
    }

    #[test]
    fn test_no_double_jump() {
        let (mut world, sonic, system) = setup();
        act_on(&mut world, sonic, &system, IntentState::Jump);
        assert_relative_eq!(world.component::<Velocity>(sonic).y, -12.0);
        assert!(world.has_component::<JumpingTag>(sonic));

        world.component_mut::<Velocity>(sonic).y = -3.0;
        act_on(&mut world, sonic, &system, IntentState::Jump);
        assert_relative_eq!(world.component::<Velocity>(sonic).y, -3.0);
    }

    #[test]
    fn test_roll_keeps_momentum_until_stopped() {
        let (mut world, sonic, system) = setup();
        act_on(&mut world, sonic, &system, IntentState::MoveRight);
        act_on(&mut world, sonic, &system, IntentState::Roll);
        act_on(&mut world, sonic, &system, IntentState::None);
        assert!(world.has_component::<RollingTag>(sonic));
        assert_relative_eq!(world.component::<Velocity>(sonic).x, 4.0);

        world.component_mut::<Velocity>(sonic).x = 0.0;
        act_on(&mut world, sonic, &system, IntentState::None);
        assert!(!world.has_component::<RollingTag>(sonic));
    }
}
