//! # FSComics Core
//!
//! Core traits and types for the FSComics client.
//!
//! The client keeps all of its in-memory state in a single store that is
//! updated through named actions. This crate provides the building blocks of
//! that store without any I/O of its own:
//!
//! - **State**: Plain data owned by a slice (auth, reviews)
//! - **Action**: Every input a slice reacts to (UI transitions, requests, completions)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Description of a side effect (an HTTP round trip), run by the runtime
//! - **Environment**: Injected dependencies, most importantly the [`SessionStore`](crate::environment::SessionStore)
//!
//! ## Example
//!
//! ```
//! use fscomics_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct ModalState {
//!     open: bool,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum ModalAction {
//!     Opened,
//!     Closed,
//! }
//!
//! struct ModalReducer;
//!
//! impl Reducer for ModalReducer {
//!     type State = ModalState;
//!     type Action = ModalAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut ModalState,
//!         action: ModalAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<ModalAction>; 4]> {
//!         state.open = matches!(action, ModalAction::Opened);
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = ModalState::default();
//! let _ = ModalReducer.reduce(&mut state, ModalAction::Opened, &());
//! assert!(state.open);
//! ```

pub use smallvec::{smallvec, SmallVec};

/// Declarative helpers for building effects
pub mod effect_macros;

/// Reducer module - The core trait for state transitions
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They never perform I/O themselves; anything that talks to the network is
/// returned as an [`Effect`](crate::effect::Effect) for the runtime to execute.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The slice state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Updates `state` in place and returns effect descriptions that
        /// the runtime executes. Actions produced by those effects are fed
        /// back into the same reducer.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects are values, not execution. A reducer returns them and the store
/// runtime decides when and where to run them.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects concurrently
        Parallel(Vec<Effect<Action>>),

        /// Run effects one after another
        Sequential(Vec<Effect<Action>>),

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Returns `true` for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// Lift an effect into a parent action type
        ///
        /// Used when a slice reducer is embedded in the application reducer:
        /// every action the slice effect produces is wrapped with `lift`
        /// before it reaches the store.
        #[must_use]
        pub fn map<Parent>(self, lift: fn(Action) -> Parent) -> Effect<Parent>
        where
            Action: Send + 'static,
            Parent: Send + 'static,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Parallel(effects) => {
                    Effect::Parallel(effects.into_iter().map(|e| e.map(lift)).collect())
                },
                Effect::Sequential(effects) => {
                    Effect::Sequential(effects.into_iter().map(|e| e.map(lift)).collect())
                },
                Effect::Future(fut) => {
                    Effect::Future(Box::pin(async move { fut.await.map(lift) }))
                },
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All process-wide resources the reducers touch are abstracted behind
/// traits and injected via the Environment parameter.
pub mod environment {
    use thiserror::Error;

    /// Well-known key the session token is persisted under
    pub const SESSION_TOKEN_KEY: &str = "localJWT";

    /// Errors raised by a [`SessionStore`]
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum SessionError {
        /// The backing storage could not be read or written
        #[error("Session storage I/O failed: {0}")]
        Io(String),

        /// The backing storage holds data that cannot be decoded
        #[error("Session storage is corrupt: {0}")]
        Corrupt(String),

        /// A lock guarding the storage was poisoned
        #[error("Session storage lock poisoned")]
        LockPoisoned,
    }

    /// Session token holder
    ///
    /// The bearer token lives outside the state container so it survives a
    /// restart. It is written on successful authentication, cleared on
    /// logout, and read by every authenticated request.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - file backed, keyed by SESSION_TOKEN_KEY
    /// let session = FileSessionStore::open("~/.fscomics/session.json")?;
    ///
    /// // Test - in memory
    /// let session = InMemorySessionStore::new();
    /// session.set_token("abc")?;
    /// assert_eq!(session.token()?, Some("abc".to_string()));
    /// ```
    pub trait SessionStore: Send + Sync {
        /// Current token, `None` when unauthenticated
        ///
        /// # Errors
        ///
        /// Returns [`SessionError`] if the storage cannot be read.
        fn token(&self) -> Result<Option<String>, SessionError>;

        /// Persist a freshly issued token, replacing any previous one
        ///
        /// # Errors
        ///
        /// Returns [`SessionError`] if the storage cannot be written.
        fn set_token(&self, token: &str) -> Result<(), SessionError>;

        /// Forget the token
        ///
        /// # Errors
        ///
        /// Returns [`SessionError`] if the storage cannot be written.
        fn clear(&self) -> Result<(), SessionError>;

        /// Whether a token is present
        ///
        /// Storage errors count as "no session".
        fn is_authenticated(&self) -> bool {
            matches!(self.token(), Ok(Some(_)))
        }
    }
}
