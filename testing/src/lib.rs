//! # Cantina Testing
//!
//! Testing utilities for the Cantina architecture.
//!
//! Provides:
//!
//! - [`ReducerTest`]: fluent Given-When-Then harness for reducer units
//! - [`FixedClock`]: deterministic clock for time-dependent logic
//! - [`assertions`]: common effect assertions

pub use reducer_test::{ReducerTest, assertions};

/// Deterministic test doubles for environment dependencies.
pub mod mocks {
    use cantina_core::environment::Clock;
    use chrono::{DateTime, TimeZone, Utc};

    /// Clock that always returns the same instant.
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a clock fixed at the given instant.
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// A `FixedClock` at a convenient reference instant.
    ///
    /// # Panics
    ///
    /// Never panics; the embedded timestamp is valid.
    #[must_use]
    #[allow(clippy::unwrap_used)] // constant timestamp is valid
    pub fn test_clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap())
    }
}

pub use mocks::{FixedClock, test_clock};

mod reducer_test {
    //! Ergonomic testing utilities for reducers with Given-When-Then syntax.

    use cantina_core::{effect::Effect, reducer::Reducer};

    /// Type alias for state assertion functions
    type StateAssertion<S> = Box<dyn FnOnce(&S)>;

    /// Type alias for effect assertion functions
    type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

    /// Fluent API for testing reducers with Given-When-Then syntax
    ///
    /// # Example
    ///
    /// ```ignore
    /// ReducerTest::new(AuthReducer::new())
    ///     .with_env(test_environment())
    ///     .given_state(AuthState::default())
    ///     .when_action(AuthAction::SwitchMode { mode: Mode::SignUp })
    ///     .then_state(|state| assert_eq!(state.mode, Mode::SignUp))
    ///     .then_effects(assertions::assert_no_effects)
    ///     .run();
    /// ```
    pub struct ReducerTest<R, S, A, E>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        reducer: R,
        environment: Option<E>,
        initial_state: Option<S>,
        action: Option<A>,
        state_assertions: Vec<StateAssertion<S>>,
        effect_assertions: Vec<EffectAssertion<A>>,
    }

    impl<R, S, A, E> ReducerTest<R, S, A, E>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        /// Create a new reducer test with the given reducer
        #[must_use]
        pub const fn new(reducer: R) -> Self {
            Self {
                reducer,
                environment: None,
                initial_state: None,
                action: None,
                state_assertions: Vec::new(),
                effect_assertions: Vec::new(),
            }
        }

        /// Set the environment for the test
        #[must_use]
        pub fn with_env(mut self, env: E) -> Self {
            self.environment = Some(env);
            self
        }

        /// Set the initial state (Given)
        #[must_use]
        pub fn given_state(mut self, state: S) -> Self {
            self.initial_state = Some(state);
            self
        }

        /// Set the action to test (When)
        #[must_use]
        pub fn when_action(mut self, action: A) -> Self {
            self.action = Some(action);
            self
        }

        /// Add an assertion about the resulting state (Then)
        #[must_use]
        pub fn then_state<F>(mut self, assertion: F) -> Self
        where
            F: FnOnce(&S) + 'static,
        {
            self.state_assertions.push(Box::new(assertion));
            self
        }

        /// Add an assertion about the resulting effects (Then)
        #[must_use]
        pub fn then_effects<F>(mut self, assertion: F) -> Self
        where
            F: FnOnce(&[Effect<A>]) + 'static,
        {
            self.effect_assertions.push(Box::new(assertion));
            self
        }

        /// Run the test and execute all assertions
        ///
        /// # Panics
        ///
        /// Panics if initial state, action, or environment is not set,
        /// or if any assertions fail.
        #[allow(clippy::panic)] // Test code can panic
        #[allow(clippy::expect_used)] // Test code can use expect
        pub fn run(self) {
            let mut state = self
                .initial_state
                .expect("Initial state must be set with given_state()");

            let action = self.action.expect("Action must be set with when_action()");

            let env = self
                .environment
                .expect("Environment must be set with with_env()");

            // Execute reducer
            let effects = self.reducer.reduce(&mut state, action, &env);

            // Run state assertions
            for assertion in self.state_assertions {
                assertion(&state);
            }

            // Run effect assertions
            for assertion in self.effect_assertions {
                assertion(&effects);
            }
        }
    }

    /// Helper assertions for effects
    pub mod assertions {
        use cantina_core::effect::Effect;

        /// Assert that there are no effects
        ///
        /// # Panics
        ///
        /// Panics if effects is not empty.
        #[allow(clippy::panic)] // Test assertion
        pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
            assert!(
                effects.is_empty() || matches!(effects, [Effect::None]),
                "Expected no effects, but found {}: {:?}",
                effects.len(),
                effects
            );
        }

        /// Assert the number of effects
        ///
        /// # Panics
        ///
        /// Panics if the number of effects doesn't match expected.
        #[allow(clippy::panic)] // Test assertion
        pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
            assert_eq!(
                effects.len(),
                expected,
                "Expected {expected} effects, but found {}",
                effects.len()
            );
        }

        /// Assert that exactly one `Future` effect was produced
        ///
        /// # Panics
        ///
        /// Panics unless effects is a single `Effect::Future`.
        #[allow(clippy::panic)] // Test assertion
        pub fn assert_single_future<A: std::fmt::Debug>(effects: &[Effect<A>]) {
            assert!(
                matches!(effects, [Effect::Future(_)]),
                "Expected a single Future effect, found: {effects:?}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::test_clock;
    use cantina_core::environment::Clock;

    #[test]
    fn fixed_clock_is_deterministic() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
    }
}
