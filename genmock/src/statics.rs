use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

thread_local! {
    static REGISTRY: RefCell<HashMap<TypeId, Rc<dyn Any>>> = RefCell::new(HashMap::new());
}

/// Runs `f` against the calling thread's instance of `S`, creating it on
/// first use.
///
/// Generated mocks keep the recorders of receiver-less trait functions here,
/// so every test thread observes its own recorders.
pub fn with_statics<S, R, F>(f: F) -> R
where
    S: Default + 'static,
    F: FnOnce(&S) -> R,
{
    let statics = REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        let entry = registry.entry(TypeId::of::<S>()).or_insert_with(|| {
            log::debug!(
                "genmock: statics `{}` created",
                std::any::type_name::<S>()
            );
            Rc::new(S::default())
        });
        Rc::clone(entry)
    });

    // The registry borrow is released, `f` may reach other statics.
    match statics.downcast_ref::<S>() {
        Some(statics) => f(statics),
        None => unreachable!("statics registry keyed by the wrong type"),
    }
}
