//! Dependency tracking, effects, and effect scopes.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use crate::errors::EngineError;

/// Anything a signal can hold a subscriber edge to, type-erased so one
/// effect can depend on signals of many different `T`.
pub(crate) trait Observed {
    fn remove_subscriber(&self, id: usize);
}

pub(crate) struct EffectNode {
    pub(crate) id: usize,
    body: RefCell<Box<dyn FnMut()>>,
    /// Signals read during the last run, kept so they can be unsubscribed
    /// before the next run rebuilds the dependency set from scratch.
    pub(crate) deps: RefCell<Vec<Rc<dyn Observed>>>,
    active: Cell<bool>,
}

thread_local! {
    static NEXT_ID: Cell<usize> = Cell::new(1);
    /// Stack of tracking frames. `None` means "untracked" (pushed by
    /// `untracked()`); `Some(node)` attributes reads to that effect.
    static TRACKER_STACK: RefCell<Vec<Option<Rc<EffectNode>>>> = RefCell::new(Vec::new());
    static SCOPE_STACK: RefCell<Vec<Rc<ScopeNode>>> = RefCell::new(Vec::new());
    static RUNNING: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());
}

pub(crate) fn next_id() -> usize {
    NEXT_ID.with(|n| {
        let id = n.get();
        n.set(id + 1);
        id
    })
}

/// Records a dependency edge between the currently-running tracked node (if
/// any) and `signal`. Called by `Signal::get`.
pub(crate) fn track(signal: &Rc<dyn Observed>, subscribe: impl FnOnce(Rc<EffectNode>)) {
    TRACKER_STACK.with(|stack| {
        if let Some(Some(node)) = stack.borrow().last() {
            let node = node.clone();
            node.deps.borrow_mut().push(signal.clone());
            subscribe(node);
        }
    });
}

/// Runs `f` with dependency tracking suspended.
pub fn untracked<R>(f: impl FnOnce() -> R) -> R {
    TRACKER_STACK.with(|stack| stack.borrow_mut().push(None));
    let result = f();
    TRACKER_STACK.with(|stack| {
        stack.borrow_mut().pop();
    });
    result
}

pub(crate) fn run_effect_node(node: &Rc<EffectNode>) {
    if !node.active.get() {
        return;
    }
    let reentrant = RUNNING.with(|r| !r.borrow_mut().insert(node.id));
    if reentrant {
        panic!("{}", EngineError::ReactiveCycle(format!("effect {} re-entered itself", node.id)));
    }

    for dep in node.deps.borrow_mut().drain(..) {
        dep.remove_subscriber(node.id);
    }

    TRACKER_STACK.with(|stack| stack.borrow_mut().push(Some(node.clone())));
    (node.body.borrow_mut())();
    TRACKER_STACK.with(|stack| {
        stack.borrow_mut().pop();
    });

    RUNNING.with(|r| {
        r.borrow_mut().remove(&node.id);
    });
}

/// Opaque handle to a running effect. Dropping it does **not** stop the
/// effect (disposal is explicit, via an owning [`EffectScope`]); the handle
/// exists so call sites have something to bind so the compiler doesn't warn
/// about an unused value, matching how the engine's own primitives use it.
#[derive(Clone)]
pub struct EffectHandle(pub(crate) Rc<EffectNode>);

impl EffectHandle {
    /// Explicitly stop this effect: unsubscribe it from all dependencies so
    /// it will never run again.
    pub fn stop(&self) {
        self.0.active.set(false);
        for dep in self.0.deps.borrow_mut().drain(..) {
            dep.remove_subscriber(self.0.id);
        }
    }
}

/// Create an effect: `f` runs once immediately, then again every time a
/// signal it read changes, until explicitly stopped (directly via
/// [`EffectHandle::stop`] or by the [`EffectScope`] it was created in).
pub fn effect(f: impl FnMut() + 'static) -> EffectHandle {
    let node = Rc::new(EffectNode {
        id: next_id(),
        body: RefCell::new(Box::new(f)),
        deps: RefCell::new(Vec::new()),
        active: Cell::new(true),
    });

    SCOPE_STACK.with(|stack| {
        if let Some(scope) = stack.borrow().last() {
            scope.effects.borrow_mut().push(node.clone());
        }
    });

    run_effect_node(&node);
    EffectHandle(node)
}

struct ScopeNode {
    effects: RefCell<Vec<Rc<EffectNode>>>,
    dispose_callbacks: RefCell<Vec<Box<dyn FnOnce()>>>,
}

/// Groups the lifetime of effects (and arbitrary cleanup callbacks) created
/// while it is the "current" scope. Calling [`EffectScope::stop`] disposes
/// every effect created inside the matching `run` call and then runs
/// registered `on_scope_dispose` callbacks in LIFO order — last registered,
/// first torn down, mirroring ordinary stack unwinding.
#[derive(Clone)]
pub struct EffectScope(Rc<ScopeNode>);

pub fn effect_scope() -> EffectScope {
    EffectScope(Rc::new(ScopeNode {
        effects: RefCell::new(Vec::new()),
        dispose_callbacks: RefCell::new(Vec::new()),
    }))
}

impl EffectScope {
    /// Run `f` with this scope active: any `effect()` or `on_scope_dispose()`
    /// call made during `f` is attributed to this scope.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        SCOPE_STACK.with(|stack| stack.borrow_mut().push(self.0.clone()));
        let result = f();
        SCOPE_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
        result
    }

    /// Stop every effect owned by this scope and run its dispose callbacks.
    pub fn stop(&self) {
        for eff in self.0.effects.borrow_mut().drain(..) {
            eff.active.set(false);
            for dep in eff.deps.borrow_mut().drain(..) {
                dep.remove_subscriber(eff.id);
            }
        }
        while let Some(cb) = self.0.dispose_callbacks.borrow_mut().pop() {
            cb();
        }
    }
}

thread_local! {
    static BATCH_DEPTH: Cell<u32> = Cell::new(0);
    static PENDING: RefCell<Vec<Rc<EffectNode>>> = RefCell::new(Vec::new());
}

/// Notify `node` that a dependency changed. Inside a [`batch`], the run is
/// deferred and deduplicated until the outermost batch ends.
pub(crate) fn schedule(node: Rc<EffectNode>) {
    let batching = BATCH_DEPTH.with(|d| d.get() > 0);
    if batching {
        PENDING.with(|p| {
            let mut p = p.borrow_mut();
            if !p.iter().any(|n| n.id == node.id) {
                p.push(node);
            }
        });
    } else {
        run_effect_node(&node);
    }
}

/// Run `f`, coalescing every effect woken by writes inside it into a single
/// pass that runs once `f` returns (deduplicated by effect identity).
pub fn batch<R>(f: impl FnOnce() -> R) -> R {
    BATCH_DEPTH.with(|d| d.set(d.get() + 1));
    let result = f();
    let should_flush = BATCH_DEPTH.with(|d| {
        let n = d.get() - 1;
        d.set(n);
        n == 0
    });
    if should_flush {
        flush_pending();
    }
    result
}

/// Run `f`, then force any effects it scheduled to run before returning,
/// even if `f` ran inside an outer [`batch`].
pub fn flush_sync<R>(f: impl FnOnce() -> R) -> R {
    let result = f();
    flush_pending();
    result
}

fn flush_pending() {
    let pending: Vec<Rc<EffectNode>> = PENDING.with(|p| p.borrow_mut().drain(..).collect());
    for node in pending {
        run_effect_node(&node);
    }
}

/// Register `f` to run when the enclosing [`EffectScope`] is stopped. Must
/// be called while a scope is current (inside that scope's `run`); outside
/// of one, it is a no-op since there is no owner to dispose it.
pub fn on_scope_dispose(f: impl FnOnce() + 'static) {
    SCOPE_STACK.with(|stack| {
        if let Some(scope) = stack.borrow().last() {
            scope.dispose_callbacks.borrow_mut().push(Box::new(f));
        }
    });
}
