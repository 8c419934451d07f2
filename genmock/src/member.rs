use crate::error::Error;

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

enum Stub<Args, Ret> {
    Value(Arc<dyn Fn() -> Ret + Send + Sync + 'static>),
    With(Arc<dyn Fn(&Args) -> Ret + Send + Sync + 'static>),
}

impl<Args, Ret> Clone for Stub<Args, Ret> {
    fn clone(&self) -> Self {
        match self {
            Stub::Value(f) => Stub::Value(Arc::clone(f)),
            Stub::With(f) => Stub::With(Arc::clone(f)),
        }
    }
}

/// Interception slot standing in for one trait member.
///
/// `Args` is the recorded argument type (a tuple for functions, the declared
/// type for properties) and `Ret` is the value handed back to the caller. For
/// members returning `Result`, `Ret` is `Result<T, genmock::Error>`.
///
/// Results are resolved in this order:
/// 1. values queued with [`returns_once`](Self::returns_once), first in first out;
/// 2. the value last assigned through [`setter`](Self::setter), or the stub
///    installed by [`returns`](Self::returns),
///    [`returns_with`](Self::returns_with) or [`fails`](Self::fails),
///    whichever came last.
///
/// An interception with neither configured panics.
///
/// ```
/// use genmock::MockMember;
///
/// let add: MockMember<(i32, i32), i32> = MockMember::new("add");
/// add.returns_once(0).returns_with(|(a, b)| a + b);
///
/// assert_eq!(add.execute((1, 2)), 0);
/// assert_eq!(add.execute((1, 2)), 3);
/// assert_eq!(add.calls(), vec![(1, 2), (1, 2)]);
/// ```
pub struct MockMember<Args, Ret> {
    name: &'static str,
    state: Mutex<State<Args, Ret>>,
}

struct State<Args, Ret> {
    calls: Vec<Args>,
    count: usize,
    queued: VecDeque<Ret>,
    stub: Option<Stub<Args, Ret>>,
    // Kept apart from `stub` so assigned values need not be `Send + Sync`.
    assigned: Option<(Box<Ret>, fn(&Ret) -> Ret)>,
}

impl<Args, Ret> MockMember<Args, Ret> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(State {
                calls: Vec::new(),
                count: 0,
                queued: VecDeque::new(),
                stub: None,
                assigned: None,
            }),
        }
    }

    /// Name of the member this slot stands in for
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns a clone of `value` on every interception.
    pub fn returns(&self, value: Ret) -> &Self
    where
        Ret: Clone + Send + Sync + 'static,
    {
        self.install(Stub::Value(Arc::new(move || value.clone())))
    }

    /// Queues `value` for a single interception.
    pub fn returns_once(&self, value: Ret) -> &Self {
        log::debug!("genmock: `{}` queued a one-shot result", self.name);
        self.lock().queued.push_back(value);
        self
    }

    /// Computes the result of every call from its arguments.
    ///
    /// Property reads carry no arguments, so [`getter`](Self::getter) panics
    /// when only this kind of stub is installed.
    pub fn returns_with<F>(&self, f: F) -> &Self
    where
        F: Fn(&Args) -> Ret + Send + Sync + 'static,
    {
        self.install(Stub::With(Arc::new(f)))
    }

    /// Intercepts a property read.
    pub fn getter(&self) -> Ret {
        log::trace!("genmock: `{}` getter", self.name);
        let stub = {
            let mut state = self.lock();
            state.count += 1;
            if let Some(value) = state.queued.pop_front() {
                return value;
            }
            if let Some((value, clone)) = &state.assigned {
                return clone(value);
            }
            self.expect_stub(&state)
        };

        match stub {
            Stub::Value(f) => f(),
            Stub::With(_) => panic!(
                "genmock: `{}` is read as a property but only has an argument-driven stub",
                self.name,
            ),
        }
    }

    /// Intercepts a function call, recording `args`.
    pub fn execute(&self, args: Args) -> Ret {
        log::trace!("genmock: `{}` executed", self.name);
        let stub = {
            let mut state = self.lock();
            let ret = match state.queued.pop_front() {
                Some(value) => Some(value),
                None => state.assigned.as_ref().map(|(value, clone)| clone(value)),
            };
            if let Some(value) = ret {
                state.count += 1;
                state.calls.push(args);
                return value;
            }
            self.expect_stub(&state)
        };

        // Stubs run unlocked so they may call back into the mock. The call
        // is recorded once the stub returns, count and arguments together.
        let ret = match stub {
            Stub::Value(f) => f(),
            Stub::With(f) => f(&args),
        };
        let mut state = self.lock();
        state.count += 1;
        state.calls.push(args);
        ret
    }

    /// Number of interceptions so far, setter calls excluded.
    pub fn call_count(&self) -> usize {
        self.lock().count
    }

    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Recorded arguments, oldest first. For properties these are the
    /// assigned values.
    pub fn calls(&self) -> Vec<Args>
    where
        Args: Clone,
    {
        self.lock().calls.clone()
    }

    /// Forgets recorded calls and every configured result.
    pub fn reset(&self) {
        log::debug!("genmock: `{}` reset", self.name);
        let mut state = self.lock();
        state.calls.clear();
        state.count = 0;
        state.queued.clear();
        state.stub = None;
        state.assigned = None;
    }

    fn install(&self, stub: Stub<Args, Ret>) -> &Self {
        log::debug!("genmock: `{}` stub replaced", self.name);
        let mut state = self.lock();
        state.assigned = None;
        state.stub = Some(stub);
        drop(state);
        self
    }

    fn lock(&self) -> MutexGuard<'_, State<Args, Ret>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn expect_stub(&self, state: &State<Args, Ret>) -> Stub<Args, Ret> {
        match &state.stub {
            Some(stub) => stub.clone(),
            None => panic!("genmock: no result configured for `{}`", self.name),
        }
    }
}

impl<T: Clone> MockMember<T, T> {
    /// Intercepts a property assignment: records `value` and returns it from
    /// every following read.
    pub fn setter(&self, value: T) {
        log::trace!("genmock: `{}` setter", self.name);
        let mut state = self.lock();
        state.calls.push(value.clone());
        state.stub = None;
        state.assigned = Some((Box::new(value), T::clone));
    }
}

impl<Args, T> MockMember<Args, Result<T, Error>> {
    /// Fails every interception with `error`.
    pub fn fails<E>(&self, error: E) -> &Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let error = Error::new(error);
        self.install(Stub::Value(Arc::new(move || Err(error.clone()))))
    }

    /// Fails the next interception only.
    pub fn fails_once<E>(&self, error: E) -> &Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.returns_once(Err(Error::new(error)))
    }
}

impl<Args, Ret> fmt::Debug for MockMember<Args, Ret> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("MockMember")
            .field("name", &self.name)
            .field("calls", &state.count)
            .field("queued", &state.queued.len())
            .field("stubbed", &(state.stub.is_some() || state.assigned.is_some()))
            .finish()
    }
}
